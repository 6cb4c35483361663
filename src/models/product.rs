// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Produto (catálogo da loja) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub store_id: i64,
    #[schema(example = "Croissant")]
    pub name: String,
    #[schema(example = 120.0)]
    pub price: f64,
    pub description: Option<String>,
    #[schema(example = "Viennoiserie")]
    pub category: Option<String>,
    // Selo "novo" na vitrine
    #[serde(rename = "new")]
    pub is_new: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: i64,
    pub product_id: i64,
    // JPEG em base64
    pub image_data: String,
    pub created_at: DateTime<Utc>,
}

// Resposta da vitrine: produto + imagens
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithImages {
    #[serde(flatten)]
    pub product: Product,
    /// Primeira imagem, para quem só mostra uma foto.
    pub image: Option<String>,
    pub images: Vec<String>,
}

impl ProductWithImages {
    pub fn new(product: Product, images: Vec<String>) -> Self {
        Self {
            image: images.first().cloned(),
            product,
            images,
        }
    }
}

// Dados já validados do formulário de cadastro (imagens ainda cruas)
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    pub is_new: bool,
    pub images: Vec<Vec<u8>>,
}
