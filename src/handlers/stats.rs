// src/handlers/stats.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::store::StoreContext,
    models::stats::{GlobalStats, StoreStats},
};

// GET /api/stats
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Indicadores de toda a plataforma (hoje, 7 e 30 dias)", body = GlobalStats)
    )
)]
pub async fn get_global_stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.stats_service.get_global_stats(Utc::now()).await?;
    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/store_stats/{id}
#[utoipa::path(
    get,
    path = "/api/store_stats/{id}",
    tag = "Stats",
    responses(
        (status = 200, description = "Indicadores da loja e os 3 melhores clientes", body = StoreStats),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("id" = i64, Path, description = "ID da loja")
    )
)]
pub async fn get_store_stats(
    State(app_state): State<AppState>,
    store: StoreContext,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.stats_service.get_store_stats(store.0, Utc::now()).await?;
    Ok((StatusCode::OK, Json(stats)))
}
