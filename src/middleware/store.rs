// src/middleware/store.rs

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::{common::error::AppError, config::AppState};

// O nosso extrator de loja.
// Lê o id da loja do caminho (/products/{id}, /orders/{id}, ...) e garante que ela existe.
#[derive(Debug, Clone, Copy)]
pub struct StoreContext(pub i64);

impl FromRequestParts<AppState> for StoreContext {
    // Usamos AppError como rejeição, pois ele já implementa IntoResponse
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(store_id) = Path::<i64>::from_request_parts(parts, state).await?;

        if !state.store_service.exists(store_id).await? {
            return Err(AppError::NotFound("Store not found".to_string()));
        }

        Ok(StoreContext(store_id))
    }
}
