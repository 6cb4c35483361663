// src/db/store_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::{db_utils::is_unique_violation, error::AppError},
    models::store::{Plan, Store},
};

// O repositório de lojas, responsável por todas as interações com a tabela 'stores'
#[derive(Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Tenta inserir a loja com o código informado.
    /// Devolve `None` se o código já estiver em uso, para o serviço gerar outro.
    pub async fn try_create_store<'e, E>(
        &self,
        executor: E,
        name: &str,
        address: Option<&str>,
        phone: Option<&str>,
        activity: Option<&str>,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Store>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query_as::<_, Store>(
            r#"
            INSERT INTO stores (name, address, phone, activity, code, plan, plan_updated_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(activity)
        .bind(code)
        .bind(Plan::Free)
        .bind(now)
        .fetch_one(executor)
        .await;

        match result {
            Ok(store) => Ok(Some(store)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Store>, AppError> {
        let store = sqlx::query_as::<_, Store>("SELECT * FROM stores WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(store)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT EXISTS (SELECT 1 FROM stores WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists != 0)
    }

    pub async fn list_stores(&self) -> Result<Vec<Store>, AppError> {
        let stores = sqlx::query_as::<_, Store>("SELECT * FROM stores ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(stores)
    }

    /// Troca o plano e reinicia o relógio de expiração.
    pub async fn update_plan<'e, E>(
        &self,
        executor: E,
        code: &str,
        plan: Plan,
        now: DateTime<Utc>,
    ) -> Result<Option<Store>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let store = sqlx::query_as::<_, Store>(
            r#"
            UPDATE stores
            SET plan = $1, plan_updated_at = $2
            WHERE code = $3
            RETURNING *
            "#,
        )
        .bind(plan)
        .bind(now)
        .bind(code)
        .fetch_optional(executor)
        .await?;

        Ok(store)
    }

    // Clientes, produtos (e imagens) e pedidos vão junto via ON DELETE CASCADE
    pub async fn delete_store(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
