// src/db/order_repo.rs

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, SqlitePool};

use crate::{
    common::error::AppError,
    models::order::{NewOrder, Order, STATUS_DELIVERED, STATUS_PENDING},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_order(
        &self,
        store_id: i64,
        order: &NewOrder,
        now: DateTime<Utc>,
    ) -> Result<Order, AppError> {
        // A lista de itens é serializada aqui, então a coluna sempre guarda JSON válido
        let products = Json(Value::Array(order.products.clone()));

        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                store_id, client_id, name, phone_number,
                latitude, longitude, total, products,
                status, delivered, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, $10)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(order.client_id)
        .bind(&order.name)
        .bind(&order.phone_number)
        .bind(order.latitude)
        .bind(order.longitude)
        .bind(order.total)
        .bind(products)
        .bind(STATUS_PENDING)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    pub async fn list_orders(&self, store_id: i64) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE store_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    pub async fn confirm_delivery(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE orders SET delivered = 1, status = $1 WHERE id = $2")
            .bind(STATUS_DELIVERED)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
