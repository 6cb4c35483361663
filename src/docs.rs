// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Health ---
        handlers::health::test_connection,

        // --- Stores ---
        handlers::stores::create_store,
        handlers::stores::list_stores,
        handlers::stores::get_store_by_code,
        handlers::stores::update_store_plan,
        handlers::stores::delete_store,

        // --- Clients ---
        handlers::clients::register_client,
        handlers::clients::list_clients,
        handlers::clients::delete_client,

        // --- Products ---
        handlers::products::create_product,
        handlers::products::list_products,
        handlers::products::delete_product,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::confirm_delivery,

        // --- Stats ---
        handlers::stats::get_global_stats,
        handlers::stats::get_store_stats,
    ),
    components(
        schemas(
            // --- Stores ---
            models::store::Plan,
            models::store::Store,
            handlers::stores::CreateStorePayload,
            handlers::stores::UpdatePlanPayload,

            // --- Clients ---
            models::client::Client,
            handlers::clients::RegisterClientPayload,

            // --- Products ---
            models::product::Product,
            models::product::ProductWithImages,
            handlers::products::ProductUploadForm,

            // --- Orders ---
            models::order::Order,
            handlers::orders::CreateOrderPayload,

            // --- Stats ---
            models::stats::WindowStats,
            models::stats::GlobalStats,
            models::stats::StoreStats,
            models::stats::TopClientEntry,

            handlers::health::ConnectionStatus,
        )
    ),
    tags(
        (name = "Health", description = "Verificação do servidor"),
        (name = "Stores", description = "Lojas, código curto e plano"),
        (name = "Clients", description = "Clientes registrados por loja"),
        (name = "Products", description = "Catálogo e imagens dos produtos"),
        (name = "Orders", description = "Pedidos da vitrine e entrega"),
        (name = "Stats", description = "Indicadores da plataforma e das lojas")
    )
)]
pub struct ApiDoc;
