// src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_DELIVERED: &str = "delivered";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub store_id: i64,
    // Vira NULL quando o cliente é apagado
    pub client_id: Option<i64>,
    #[schema(example = "Yacine")]
    pub name: String,
    #[schema(example = "0770 11 22 33")]
    pub phone_number: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[schema(example = 450.0)]
    pub total: f64,
    // Itens do pedido, guardados como texto JSON
    #[schema(value_type = Vec<Object>)]
    pub products: Json<Value>,
    #[schema(example = "pending")]
    pub status: String,
    pub delivered: bool,
    pub created_at: DateTime<Utc>,
}

// Dados já validados para inserir um pedido
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client_id: Option<i64>,
    pub name: String,
    pub phone_number: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub total: f64,
    pub products: Vec<Value>,
}
