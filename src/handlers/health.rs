// src/handlers/health.rs

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ConnectionStatus {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "Server is running")]
    pub message: String,
}

// GET /test
#[utoipa::path(
    get,
    path = "/test",
    tag = "Health",
    responses(
        (status = 200, description = "Servidor no ar", body = ConnectionStatus)
    )
)]
pub async fn test_connection() -> Json<ConnectionStatus> {
    Json(ConnectionStatus {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}
