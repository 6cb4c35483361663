// src/models/stats.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Pedidos e faturamento numa janela de tempo
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WindowStats {
    pub orders: i64,
    pub revenue: f64,
}

// 1. Visão geral da plataforma
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_stores: i64,
    pub pro_stores: i64,
    pub free_stores: i64,
    pub total_clients: i64,
    pub total_products: i64,
    pub total_orders: i64,
    pub total_revenue: f64,
    pub today: WindowStats,
    pub last7_days: WindowStats,
    pub last30_days: WindowStats,
}

// 2. Painel de uma loja
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub store_id: i64,
    pub total_clients: i64,
    pub total_products: i64,
    pub total_orders: i64,
    pub delivered_orders: i64,
    pub pending_orders: i64,
    pub total_revenue: f64,
    pub today: WindowStats,
    pub last7_days: WindowStats,
    pub last30_days: WindowStats,
    pub top_clients: Vec<TopClientEntry>,
}

// 3. Ranking de clientes por gasto
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopClientEntry {
    pub client_id: i64,
    pub name: String,
    pub phone: String,
    pub orders_count: i64,
    pub total_spent: f64,
}
