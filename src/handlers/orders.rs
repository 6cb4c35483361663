// src/handlers/orders.rs

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::store::StoreContext,
    models::order::{NewOrder, Order},
};

// ---
// Payload do pedido feito na vitrine
// ---
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[schema(example = "Yacine")]
    pub name: Option<String>,

    #[schema(example = "0770 11 22 33")]
    pub phone_number: Option<String>,

    #[schema(value_type = Option<Vec<Object>>)]
    pub products: Option<Value>,

    // Aceita número ou texto numérico ("360")
    #[schema(value_type = Option<f64>, example = 450.0)]
    pub total: Option<Value>,

    #[schema(example = 36.7538)]
    pub latitude: Option<f64>,

    #[schema(example = 3.0588)]
    pub longitude: Option<f64>,

    pub client_id: Option<i64>,
}

impl CreateOrderPayload {
    // Os campos obrigatórios são checados nesta ordem; o primeiro ausente vira o erro
    fn into_new_order(self) -> Result<NewOrder, AppError> {
        let missing = |field: &str| AppError::BadRequest(format!("Missing required field: {}", field));

        let name = self
            .name
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| missing("name"))?;
        let phone_number = self
            .phone_number
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| missing("phoneNumber"))?;
        let products = self.products.ok_or_else(|| missing("products"))?;
        let total = self.total.ok_or_else(|| missing("total"))?;

        let products = match products {
            Value::Array(items) if !items.is_empty() => items,
            _ => return Err(AppError::BadRequest("Products must be a non-empty list".to_string())),
        };

        let total = parse_total(&total)?;
        if !total.is_finite() || total < 0.0 {
            return Err(AppError::BadRequest("Total must be a non-negative number".to_string()));
        }

        Ok(NewOrder {
            client_id: self.client_id,
            name,
            phone_number,
            latitude: self.latitude,
            longitude: self.longitude,
            total,
            products,
        })
    }
}

fn parse_total(value: &Value) -> Result<f64, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AppError::BadRequest("Total must be a number".to_string()))
}

// POST /orders/{id}
#[utoipa::path(
    post,
    path = "/orders/{id}",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado"),
        (status = 400, description = "Campo obrigatório ausente, lista de produtos vazia ou JSON inválido"),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("id" = i64, Path, description = "ID da loja")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    store: StoreContext,
    payload: Result<Json<CreateOrderPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let new_order = payload.into_new_order()?;

    let order = app_state
        .order_service
        .create_order(store.0, new_order, Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Order created successfully", "orderId": order.id })),
    ))
}

// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedidos da loja, mais recentes primeiro", body = Vec<Order>),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("id" = i64, Path, description = "ID da loja")
    )
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    store: StoreContext,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_orders(store.0).await?;
    Ok((StatusCode::OK, Json(orders)))
}

// POST /confirm_delivery/{id}
#[utoipa::path(
    post,
    path = "/confirm_delivery/{id}",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedido marcado como entregue"),
        (status = 404, description = "Pedido não encontrado")
    ),
    params(
        ("id" = i64, Path, description = "ID do pedido")
    )
)]
pub async fn confirm_delivery(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;

    app_state.order_service.confirm_delivery(id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Order confirmed as delivered" }))))
}
