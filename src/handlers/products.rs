// src/handlers/products.rs

use axum::{
    extract::{rejection::PathRejection, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::store::StoreContext,
    models::product::{NewProduct, ProductWithImages},
};

// ---
// Formulário multipart (só para a documentação; o parse é feito campo a campo)
// ---
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProductUploadForm {
    #[schema(example = "Croissant")]
    name: String,
    #[schema(example = "120")]
    price: String,
    description: Option<String>,
    category: Option<String>,
    /// 1/0, true/false, on/off
    #[schema(example = "1")]
    new: Option<String>,
    /// Arquivo de imagem; repita o campo para enviar várias
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
}

// Campos lidos do multipart, ainda sem validação
#[derive(Debug, Default)]
struct ProductForm {
    name: Option<String>,
    price: Option<String>,
    description: Option<String>,
    category: Option<String>,
    new: Option<String>,
    images: Vec<Vec<u8>>,
}

impl ProductForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ProductForm::default();

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().unwrap_or_default().to_string();

            match field_name.as_str() {
                "image" | "images" | "image[]" | "images[]" => {
                    let bytes = field.bytes().await?;
                    // Navegadores mandam uma parte vazia quando nenhum arquivo foi escolhido
                    if !bytes.is_empty() {
                        form.images.push(bytes.to_vec());
                    }
                }
                "name" => form.name = Some(field.text().await?),
                "price" => form.price = Some(field.text().await?),
                "description" => form.description = Some(field.text().await?),
                "category" => form.category = Some(field.text().await?),
                "new" => form.new = Some(field.text().await?),
                other => tracing::debug!("Campo multipart ignorado: {}", other),
            }
        }

        Ok(form)
    }

    fn into_new_product(self) -> Result<NewProduct, AppError> {
        let name = non_blank(self.name)
            .ok_or_else(|| AppError::BadRequest("Missing required field: name".to_string()))?;
        let raw_price = non_blank(self.price)
            .ok_or_else(|| AppError::BadRequest("Missing required field: price".to_string()))?;

        let price: f64 = raw_price
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Invalid price: '{}'", raw_price)))?;
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::BadRequest("Price must be a non-negative number".to_string()));
        }

        let is_new = match non_blank(self.new) {
            Some(flag) => parse_flag(&flag)
                .ok_or_else(|| AppError::BadRequest(format!("Invalid value for 'new': '{}'", flag)))?,
            None => false,
        };

        Ok(NewProduct {
            name,
            price,
            description: non_blank(self.description),
            category: non_blank(self.category),
            is_new,
            images: self.images,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

// POST /products/{id}
#[utoipa::path(
    post,
    path = "/products/{id}",
    tag = "Products",
    request_body(content = ProductUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Produto criado com as imagens comprimidas", body = ProductWithImages),
        (status = 400, description = "Campo ausente, preço inválido ou imagem ilegível"),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("id" = i64, Path, description = "ID da loja")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    store: StoreContext,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = ProductForm::read(multipart).await?;
    let new_product = form.into_new_product()?;

    let product = app_state
        .product_service
        .create_product(store.0, new_product, Utc::now())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product added successfully", "product": product })),
    ))
}

// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    responses(
        (status = 200, description = "Catálogo da loja com as imagens em base64", body = Vec<ProductWithImages>),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("id" = i64, Path, description = "ID da loja")
    )
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    store: StoreContext,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.product_service.list_products(store.0).await?;
    Ok((StatusCode::OK, Json(products)))
}

// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    responses(
        (status = 200, description = "Produto e imagens removidos"),
        (status = 404, description = "Produto não encontrado")
    ),
    params(
        ("id" = i64, Path, description = "ID do produto")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = path?;

    app_state.product_service.delete_product(id).await?;

    Ok((StatusCode::OK, Json(json!({ "message": "Product deleted successfully" }))))
}
