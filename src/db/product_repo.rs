// src/db/product_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::product::{Product, ProductImage},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        store_id: i64,
        name: &str,
        price: f64,
        description: Option<&str>,
        category: Option<&str>,
        is_new: bool,
        now: DateTime<Utc>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (store_id, name, price, description, category, is_new, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(store_id)
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(category)
        .bind(is_new)
        .bind(now)
        .fetch_one(executor)
        .await?;

        Ok(product)
    }

    pub async fn add_image<'e, E>(
        &self,
        executor: E,
        product_id: i64,
        image_data: &str,
        now: DateTime<Utc>,
    ) -> Result<ProductImage, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let image = sqlx::query_as::<_, ProductImage>(
            r#"
            INSERT INTO product_images (product_id, image_data, created_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(image_data)
        .bind(now)
        .fetch_one(executor)
        .await?;

        Ok(image)
    }

    pub async fn list_products(&self, store_id: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE store_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    // Todas as imagens da loja numa query só (agrupadas por produto no serviço)
    pub async fn list_images_for_store(&self, store_id: i64) -> Result<Vec<ProductImage>, AppError> {
        let images = sqlx::query_as::<_, ProductImage>(
            r#"
            SELECT pi.*
            FROM product_images pi
            JOIN products p ON p.id = pi.product_id
            WHERE p.store_id = $1
            ORDER BY pi.product_id, pi.id ASC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    // As imagens somem junto (ON DELETE CASCADE)
    pub async fn delete_product(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
