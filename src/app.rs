// src/app.rs

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

// Monta todas as rotas sobre o estado compartilhado
pub fn build_router(app_state: AppState) -> Router {
    let store_routes = Router::new()
        .route(
            "/stores",
            post(handlers::stores::create_store).get(handlers::stores::list_stores),
        )
        .route("/stores/{id}", delete(handlers::stores::delete_store))
        .route("/store/{code}", get(handlers::stores::get_store_by_code))
        .route("/store/plan/{code}", post(handlers::stores::update_store_plan));

    let client_routes = Router::new()
        .route("/register_client", post(handlers::clients::register_client))
        // GET usa o id da loja, DELETE o id do cliente
        .route(
            "/clients/{id}",
            get(handlers::clients::list_clients).delete(handlers::clients::delete_client),
        );

    let catalog_routes = Router::new()
        .route(
            "/products/{id}",
            get(handlers::products::list_products)
                .post(handlers::products::create_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/orders/{id}",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/confirm_delivery/{id}", post(handlers::orders::confirm_delivery));

    let stats_routes = Router::new()
        .route("/api/stats", get(handlers::stats::get_global_stats))
        .route("/api/store_stats/{id}", get(handlers::stats::get_store_stats));

    // A vitrine é servida de outra origem e sem credenciais
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let max_upload_bytes = app_state.config.max_upload_bytes;

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/test", get(handlers::health::test_connection))
        .merge(store_routes)
        .merge(client_routes)
        .merge(catalog_routes)
        .merge(stats_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
