// src/services/product_service.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::ProductRepository,
    models::product::{NewProduct, ProductWithImages},
    services::image_service::ImageService,
};

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
    image_service: ImageService,
    pool: SqlitePool, // Usamos a pool para iniciar transações
}

impl ProductService {
    pub fn new(repo: ProductRepository, image_service: ImageService, pool: SqlitePool) -> Self {
        Self { repo, image_service, pool }
    }

    /// Processa as imagens e grava produto + imagens numa única transação.
    /// Uma imagem inválida aborta o cadastro inteiro antes de tocar no banco.
    pub async fn create_product(
        &self,
        store_id: i64,
        product: NewProduct,
        now: DateTime<Utc>,
    ) -> Result<ProductWithImages, AppError> {
        let mut encoded_images = Vec::with_capacity(product.images.len());
        for raw in product.images {
            encoded_images.push(self.image_service.encode_for_storage(raw).await?);
        }

        let mut tx = self.pool.begin().await?;

        let created = self
            .repo
            .create_product(
                &mut *tx,
                store_id,
                &product.name,
                product.price,
                product.description.as_deref(),
                product.category.as_deref(),
                product.is_new,
                now,
            )
            .await?;

        for data in &encoded_images {
            self.repo.add_image(&mut *tx, created.id, data, now).await?;
        }

        tx.commit().await?;

        tracing::info!(
            "📦 Produto {} criado na loja {} com {} imagem(ns)",
            created.id,
            store_id,
            encoded_images.len()
        );

        Ok(ProductWithImages::new(created, encoded_images))
    }

    pub async fn list_products(&self, store_id: i64) -> Result<Vec<ProductWithImages>, AppError> {
        let products = self.repo.list_products(store_id).await?;
        let images = self.repo.list_images_for_store(store_id).await?;

        let mut by_product: HashMap<i64, Vec<String>> = HashMap::new();
        for image in images {
            by_product.entry(image.product_id).or_default().push(image.image_data);
        }

        Ok(products
            .into_iter()
            .map(|product| {
                let images = by_product.remove(&product.id).unwrap_or_default();
                ProductWithImages::new(product, images)
            })
            .collect())
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        if !self.repo.delete_product(id).await? {
            return Err(AppError::NotFound("Product not found".to_string()));
        }
        Ok(())
    }
}
