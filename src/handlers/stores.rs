// src/handlers/stores.rs

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
    models::store::{Plan, Store},
};

// ---
// 1. "Payload" de cadastro da loja
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStorePayload {
    #[validate(
        required(message = "Missing required field: name"),
        length(min = 1, message = "Missing required field: name")
    )]
    #[schema(example = "Boulangerie du Coin")]
    pub name: Option<String>,

    #[schema(example = "12 Rue Didouche Mourad, Alger")]
    pub address: Option<String>,

    #[schema(example = "0550 12 34 56")]
    pub phone: Option<String>,

    #[schema(example = "Bakery")]
    pub activity: Option<String>,
}

// POST /stores
#[utoipa::path(
    post,
    path = "/stores",
    tag = "Stores",
    request_body = CreateStorePayload,
    responses(
        (status = 201, description = "Loja criada com código único", body = Store),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_store(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateStorePayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::BadRequest("Missing required field: name".to_string()));
    }

    let store = app_state
        .store_service
        .create_store(
            name,
            payload.address.as_deref(),
            payload.phone.as_deref(),
            payload.activity.as_deref(),
            Utc::now(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(store)))
}

// GET /stores
#[utoipa::path(
    get,
    path = "/stores",
    tag = "Stores",
    responses(
        (status = 200, description = "Todas as lojas, mais novas primeiro, com o plano efetivo", body = Vec<Store>)
    )
)]
pub async fn list_stores(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stores = app_state.store_service.list_stores(Utc::now()).await?;
    Ok((StatusCode::OK, Json(stores)))
}

// GET /store/{code}
#[utoipa::path(
    get,
    path = "/store/{code}",
    tag = "Stores",
    responses(
        (status = 200, description = "Loja (com expiração do plano aplicada)", body = Store),
        (status = 404, description = "Código desconhecido")
    ),
    params(
        ("code" = String, Path, description = "Código curto da loja")
    )
)]
pub async fn get_store_by_code(
    State(app_state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(code) = path?;

    let store = app_state.store_service.get_by_code(&code, Utc::now()).await?;

    Ok((StatusCode::OK, Json(store)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePlanPayload {
    #[validate(required(message = "Missing required field: plan"))]
    #[schema(example = "pro")]
    pub plan: Option<String>,
}

// POST /store/plan/{code}
#[utoipa::path(
    post,
    path = "/store/plan/{code}",
    tag = "Stores",
    request_body = UpdatePlanPayload,
    responses(
        (status = 200, description = "Plano atualizado", body = Store),
        (status = 400, description = "Plano ausente ou inválido"),
        (status = 404, description = "Código desconhecido")
    ),
    params(
        ("code" = String, Path, description = "Código curto da loja")
    )
)]
pub async fn update_store_plan(
    State(app_state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdatePlanPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(code) = path?;
    let Json(payload) = payload?;
    payload.validate()?;

    let raw = payload.plan.unwrap_or_default();
    let plan = Plan::parse(&raw).ok_or_else(|| {
        AppError::BadRequest(format!("Invalid plan '{}': expected 'free' or 'pro'", raw))
    })?;

    let store = app_state.store_service.update_plan(&code, plan, Utc::now()).await?;

    tracing::info!("💳 Loja {} agora no plano {:?}", store.code, store.plan);
    Ok((StatusCode::OK, Json(store)))
}

// DELETE /stores/{id}
#[utoipa::path(
    delete,
    path = "/stores/{id}",
    tag = "Stores",
    responses(
        (status = 200, description = "Loja e tudo o que ela possui foram removidos"),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("id" = i64, Path, description = "ID da loja")
    )
)]
pub async fn delete_store(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;

    app_state.store_service.delete_store(id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Store deleted successfully" }))))
}
