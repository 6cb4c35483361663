// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub store_id: i64,
    #[schema(example = "Amine")]
    pub name: String,
    // Único por loja
    #[schema(example = "0661 22 33 44")]
    pub phone: String,
    pub created_at: DateTime<Utc>,
}
