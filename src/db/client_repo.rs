// src/db/client_repo.rs

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{common::error::AppError, models::client::Client};

#[derive(Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_phone(&self, store_id: i64, phone: &str) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE store_id = $1 AND phone = $2",
        )
        .bind(store_id)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Insere o cliente. Se o telefone já existir na loja (corrida entre dois cadastros),
    /// o `ON CONFLICT` não insere nada e devolve `None`.
    pub async fn create_client(
        &self,
        store_id: i64,
        name: &str,
        phone: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (store_id, name, phone, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (store_id, phone) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(phone)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn list_clients(&self, store_id: i64) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE store_id = $1 ORDER BY name ASC, id ASC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    // Os pedidos do cliente ficam, com client_id = NULL (ON DELETE SET NULL)
    pub async fn delete_client(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
