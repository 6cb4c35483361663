// src/handlers/clients.rs

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::store::StoreContext,
    models::client::Client,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClientPayload {
    #[validate(required(message = "Missing required field: storeId"))]
    #[schema(example = 1)]
    pub store_id: Option<i64>,

    #[validate(
        required(message = "Missing required field: name"),
        length(min = 1, message = "Missing required field: name")
    )]
    #[schema(example = "Amine")]
    pub name: Option<String>,

    #[validate(
        required(message = "Missing required field: phone"),
        length(min = 1, message = "Missing required field: phone")
    )]
    #[schema(example = "0661 22 33 44")]
    pub phone: Option<String>,
}

// POST /register_client
#[utoipa::path(
    post,
    path = "/register_client",
    tag = "Clients",
    request_body = RegisterClientPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Client),
        (status = 200, description = "Telefone já cadastrado na loja: devolve o cliente existente", body = Client),
        (status = 400, description = "Campo obrigatório ausente"),
        (status = 404, description = "Loja não encontrada")
    )
)]
pub async fn register_client(
    State(app_state): State<AppState>,
    payload: Result<Json<RegisterClientPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let (Some(store_id), Some(name), Some(phone)) = (payload.store_id, payload.name, payload.phone) else {
        return Err(AppError::BadRequest("Missing required field".to_string()));
    };
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Missing required field: name".to_string()));
    }
    if phone.trim().is_empty() {
        return Err(AppError::BadRequest("Missing required field: phone".to_string()));
    }

    let (client, created) = app_state
        .client_service
        .register(store_id, name.trim(), phone.trim(), Utc::now())
        .await?;

    let status = if created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(client)))
}

// GET /clients/{id}
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "Clients",
    responses(
        (status = 200, description = "Clientes da loja", body = Vec<Client>),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("id" = i64, Path, description = "ID da loja")
    )
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    store: StoreContext,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state.client_service.list_clients(store.0).await?;
    Ok((StatusCode::OK, Json(clients)))
}

// DELETE /clients/{id}
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "Clients",
    responses(
        (status = 200, description = "Cliente removido; os pedidos dele ficam sem cliente"),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(
        ("id" = i64, Path, description = "ID do cliente")
    )
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;

    app_state.client_service.delete_client(id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Client deleted successfully" }))))
}
