// src/common/error.rs

use axum::{
    extract::{multipart::MultipartError, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro único. Toda resposta de erro vira { "error": "..." }.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid image: {0}")]
    InvalidImage(#[from] image::ImageError),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Qualquer outro erro inesperado (join de tarefas, base64, etc.)
    #[error("Unexpected error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) | AppError::InvalidImage(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid JSON format: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            // Devolve a primeira mensagem como "error" e todas em "details".
            AppError::ValidationError(ref errors) => {
                let mut details = std::collections::BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("Invalid field: {}", field))
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let first = details
                    .values()
                    .flat_map(|messages| messages.first())
                    .next()
                    .cloned()
                    .unwrap_or_else(|| "One or more fields are invalid".to_string());

                tracing::warn!("Payload inválido: {}", first);
                json!({ "error": first, "details": details })
            }
            // Erro inesperado: devolve também a cadeia de causas (e o backtrace, se capturado)
            AppError::InternalServerError(ref err) => {
                tracing::error!("Erro Interno do Servidor: {:?}", err);
                json!({ "error": self.to_string(), "details": format!("{:?}", err) })
            }
            ref e if status.is_server_error() => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                json!({ "error": e.to_string() })
            }
            ref e => {
                tracing::warn!("Requisição rejeitada ({}): {}", status.as_u16(), e);
                json!({ "error": e.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}
