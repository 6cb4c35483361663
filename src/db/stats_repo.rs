// src/db/stats_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Acquire, Sqlite, SqliteConnection};

use crate::{
    common::error::AppError,
    models::stats::{GlobalStats, StoreStats, TopClientEntry, WindowStats},
};

/// Início de cada janela de tempo, calculado pelo serviço a partir de `now`.
#[derive(Debug, Clone, Copy)]
pub struct StatsWindows {
    pub today_start: DateTime<Utc>,
    pub last7_start: DateTime<Utc>,
    pub last30_start: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct StatsRepository;

impl StatsRepository {
    pub fn new() -> Self {
        Self
    }

    // 1. Visão geral (todas as lojas)
    pub async fn get_global_stats<'e, E>(
        &self,
        executor: E,
        windows: StatsWindows,
        pro_cutoff: DateTime<Utc>,
    ) -> Result<GlobalStats, AppError>
    where
        E: Acquire<'e, Database = Sqlite>,
    {
        // Transação só de leitura: todas as contagens veem o mesmo snapshot
        let mut tx = executor.begin().await?;

        let total_stores = count(&mut *tx, "SELECT COUNT(*) FROM stores").await?;

        // Só conta como pro quem ainda não venceu
        let pro_stores = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM stores WHERE plan = 'pro' AND plan_updated_at > $1",
        )
        .bind(pro_cutoff)
        .fetch_one(&mut *tx)
        .await?;

        let total_clients = count(&mut *tx, "SELECT COUNT(*) FROM clients").await?;
        let total_products = count(&mut *tx, "SELECT COUNT(*) FROM products").await?;

        let (total_orders, total_revenue) =
            sqlx::query_as::<_, (i64, f64)>("SELECT COUNT(*), TOTAL(total) FROM orders")
                .fetch_one(&mut *tx)
                .await?;

        let today = window(&mut *tx, None, windows.today_start).await?;
        let last7_days = window(&mut *tx, None, windows.last7_start).await?;
        let last30_days = window(&mut *tx, None, windows.last30_start).await?;

        tx.commit().await?;

        Ok(GlobalStats {
            total_stores,
            pro_stores,
            free_stores: total_stores - pro_stores,
            total_clients,
            total_products,
            total_orders,
            total_revenue,
            today,
            last7_days,
            last30_days,
        })
    }

    // 2. Painel de uma loja
    pub async fn get_store_stats<'e, E>(
        &self,
        executor: E,
        store_id: i64,
        windows: StatsWindows,
    ) -> Result<StoreStats, AppError>
    where
        E: Acquire<'e, Database = Sqlite>,
    {
        let mut tx = executor.begin().await?;

        let total_clients = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE store_id = $1")
            .bind(store_id)
            .fetch_one(&mut *tx)
            .await?;

        let total_products = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE store_id = $1")
            .bind(store_id)
            .fetch_one(&mut *tx)
            .await?;

        let (total_orders, total_revenue) = sqlx::query_as::<_, (i64, f64)>(
            "SELECT COUNT(*), TOTAL(total) FROM orders WHERE store_id = $1",
        )
        .bind(store_id)
        .fetch_one(&mut *tx)
        .await?;

        let delivered_orders = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE store_id = $1 AND delivered = 1",
        )
        .bind(store_id)
        .fetch_one(&mut *tx)
        .await?;

        let today = window(&mut *tx, Some(store_id), windows.today_start).await?;
        let last7_days = window(&mut *tx, Some(store_id), windows.last7_start).await?;
        let last30_days = window(&mut *tx, Some(store_id), windows.last30_start).await?;

        // 3. Top 3 clientes por gasto
        let top_clients = sqlx::query_as::<_, TopClientEntry>(
            r#"
            SELECT
                c.id AS client_id,
                c.name AS name,
                c.phone AS phone,
                COUNT(o.id) AS orders_count,
                TOTAL(o.total) AS total_spent
            FROM orders o
            JOIN clients c ON c.id = o.client_id
            WHERE o.store_id = $1
            GROUP BY c.id, c.name, c.phone
            ORDER BY total_spent DESC, orders_count DESC, c.id ASC
            LIMIT 3
            "#,
        )
        .bind(store_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(StoreStats {
            store_id,
            total_clients,
            total_products,
            total_orders,
            delivered_orders,
            pending_orders: total_orders - delivered_orders,
            total_revenue,
            today,
            last7_days,
            last30_days,
            top_clients,
        })
    }
}

async fn count(conn: &mut SqliteConnection, sql: &'static str) -> Result<i64, AppError> {
    Ok(sqlx::query_scalar::<_, i64>(sql).fetch_one(conn).await?)
}

// Pedidos e faturamento desde `since`; `store_id = None` soma todas as lojas
async fn window(
    conn: &mut SqliteConnection,
    store_id: Option<i64>,
    since: DateTime<Utc>,
) -> Result<WindowStats, AppError> {
    let stats = sqlx::query_as::<_, WindowStats>(
        r#"
        SELECT COUNT(*) AS orders, TOTAL(total) AS revenue
        FROM orders
        WHERE created_at >= $1
          AND ($2 IS NULL OR store_id = $2)
        "#,
    )
    .bind(since)
    .bind(store_id)
    .fetch_one(conn)
    .await?;

    Ok(stats)
}
