// src/models/store.rs

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ---
// Plano de assinatura da loja
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl Plan {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Plan::Free),
            "pro" => Some(Plan::Pro),
            _ => None,
        }
    }

    /// O plano que vale de fato em `now`: um `pro` com `duration` ou mais de idade volta a ser `free`.
    pub fn effective(self, updated_at: DateTime<Utc>, now: DateTime<Utc>, duration: Duration) -> Self {
        match self {
            Plan::Pro if now - updated_at >= duration => Plan::Free,
            plan => plan,
        }
    }
}

// ---
// Store (o tenant)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Boulangerie du Coin")]
    pub name: String,
    pub address: Option<String>,
    #[schema(example = "0550 12 34 56")]
    pub phone: Option<String>,
    #[schema(example = "Bakery")]
    pub activity: Option<String>,
    #[schema(example = "K7Q2M9XA")]
    pub code: String,
    pub plan: Plan,
    pub plan_updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
