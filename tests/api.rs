// tests/api.rs

use std::io::Cursor;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_backend::{
    app::build_router,
    common::db_utils::{create_memory_pool, run_migrations},
    config::{AppConfig, AppState},
    models::order::NewOrder,
};

const BOUNDARY: &str = "storefront-test-boundary";

async fn setup() -> (Router, AppState) {
    let pool = create_memory_pool().await.unwrap();
    run_migrations(&pool).await.unwrap();

    let state = AppState::with_pool(pool, AppConfig::default());
    (build_router(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

fn post_raw(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn post_multipart(uri: &str, fields: &[(&str, &str)], images: &[Vec<u8>]) -> Request<Body> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    for (i, image) in images.iter().enumerate() {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo{i}.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    bytes.into_inner()
}

async fn create_store(app: &Router, name: &str) -> Value {
    let (status, body) = send(app, post_json("/stores", json!({ "name": name, "activity": "Bakery" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn new_order(client_id: Option<i64>, phone: &str, total: f64) -> NewOrder {
    NewOrder {
        client_id,
        name: "Walk-in".into(),
        phone_number: phone.into(),
        latitude: None,
        longitude: None,
        total,
        products: vec![json!({ "id": 1, "quantity": 1 })],
    }
}

// ---
// Health & docs
// ---

#[tokio::test]
async fn health_endpoints_respond() {
    let (app, _) = setup().await;

    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));

    let (status, body) = send(&app, get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/orders/{id}"].is_object());
}

// ---
// Stores
// ---

#[tokio::test]
async fn store_is_created_with_a_code_and_found_by_it() {
    let (app, _) = setup().await;

    let store = create_store(&app, "Boulangerie").await;
    let code = store["code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert_eq!(store["plan"], "free");

    let (status, found) = send(&app, get(&format!("/store/{code}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], store["id"]);
    assert_eq!(found["activity"], "Bakery");

    let (status, body) = send(&app, get("/store/NOPE1234")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Store not found");

    let (_, stores) = send(&app, get("/stores")).await;
    assert_eq!(stores.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn store_creation_rejects_bad_input() {
    let (app, _) = setup().await;

    let (status, body) = send(&app, post_json("/stores", json!({ "address": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: name");

    let (status, body) = send(&app, post_raw("/stores", "{ not json".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON format"));
}

#[tokio::test]
async fn pro_plan_is_set_and_expires_after_thirty_days() {
    let (app, state) = setup().await;

    let store = create_store(&app, "Pro Shop").await;
    let code = store["code"].as_str().unwrap().to_string();

    let (status, body) = send(&app, post_json(&format!("/store/plan/{code}"), json!({ "plan": "gold" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("gold"));

    let (status, body) = send(&app, post_json(&format!("/store/plan/{code}"), json!({ "plan": "pro" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"], "pro");

    let (_, stats) = send(&app, get("/api/stats")).await;
    assert_eq!(stats["proStores"], 1);

    // Envelhece a assinatura
    sqlx::query("UPDATE stores SET plan_updated_at = $1 WHERE code = $2")
        .bind(Utc::now() - Duration::days(31))
        .bind(&code)
        .execute(&state.db_pool)
        .await
        .unwrap();

    let (_, stats) = send(&app, get("/api/stats")).await;
    assert_eq!(stats["proStores"], 0);
    assert_eq!(stats["freeStores"], 1);

    // A listagem já mostra o plano efetivo, antes de qualquer leitura pelo código
    let (_, stores) = send(&app, get("/stores")).await;
    assert_eq!(stores[0]["code"], code.as_str());
    assert_eq!(stores[0]["plan"], "free");

    let (status, body) = send(&app, get(&format!("/store/{code}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"], "free");

    let stored: String = sqlx::query_scalar("SELECT plan FROM stores WHERE code = $1")
        .bind(&code)
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
    assert_eq!(stored, "free");

    let (status, _) = send(&app, post_json("/store/plan/UNKNOWN1", json!({ "plan": "pro" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---
// Clients
// ---

#[tokio::test]
async fn clients_are_unique_per_store_phone() {
    let (app, _) = setup().await;

    let a = create_store(&app, "A").await["id"].as_i64().unwrap();
    let b = create_store(&app, "B").await["id"].as_i64().unwrap();

    let payload = |store_id: i64| json!({ "storeId": store_id, "name": "Amine", "phone": "0661" });

    let (status, first) = send(&app, post_json("/register_client", payload(a))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, again) = send(&app, post_json("/register_client", payload(a))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["id"], first["id"]);

    let (status, other) = send(&app, post_json("/register_client", payload(b))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(other["id"], first["id"]);

    let (status, _) = send(&app, post_json("/register_client", payload(9999))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, post_json("/register_client", json!({ "storeId": a, "name": "X" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: phone");

    let (_, clients) = send(&app, get(&format!("/clients/{a}"))).await;
    assert_eq!(clients.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, get("/clients/9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---
// Products
// ---

#[tokio::test]
async fn product_upload_compresses_images_and_delete_cascades() {
    let (app, state) = setup().await;
    let store_id = create_store(&app, "Catalog").await["id"].as_i64().unwrap();
    let uri = format!("/products/{store_id}");

    let (status, body) = send(
        &app,
        post_multipart(
            &uri,
            &[("name", "Croissant"), ("price", "120"), ("category", "Viennoiserie"), ("new", "1")],
            &[png(1200, 600), png(100, 100)],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Product added successfully");

    let product = &body["product"];
    let product_id = product["id"].as_i64().unwrap();
    assert_eq!(product["new"], true);
    assert_eq!(product["images"].as_array().unwrap().len(), 2);
    assert_eq!(product["image"], product["images"][0]);

    let jpeg = STANDARD.decode(product["image"].as_str().unwrap()).unwrap();
    let decoded = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 400));
    assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);

    let (_, list) = send(&app, get(&uri)).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Croissant");
    assert_eq!(list[0]["images"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, delete(&format!("/products/{product_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let images_left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product_images WHERE product_id = $1")
        .bind(product_id)
        .fetch_one(&state.db_pool)
        .await
        .unwrap();
    assert_eq!(images_left, 0);

    let (status, body) = send(&app, delete(&format!("/products/{product_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn product_upload_rejects_bad_forms() {
    let (app, _) = setup().await;
    let store_id = create_store(&app, "Catalog").await["id"].as_i64().unwrap();
    let uri = format!("/products/{store_id}");

    let (status, body) = send(&app, post_multipart(&uri, &[("name", "Tea")], &[])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: price");

    let (status, _) = send(&app, post_multipart(&uri, &[("name", "Tea"), ("price", "-3")], &[])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        post_multipart(&uri, &[("name", "Tea"), ("price", "3")], &[b"definitely not an image".to_vec()]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid image"));

    // Nada foi gravado pelas tentativas inválidas
    let (_, list) = send(&app, get(&uri)).await;
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = send(&app, post_multipart("/products/9999", &[("name", "Tea"), ("price", "3")], &[])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---
// Orders
// ---

#[tokio::test]
async fn order_flow_links_client_and_confirms_delivery() {
    let (app, _) = setup().await;
    let store_id = create_store(&app, "Orders").await["id"].as_i64().unwrap();
    let uri = format!("/orders/{store_id}");

    let (_, client) = send(
        &app,
        post_json("/register_client", json!({ "storeId": store_id, "name": "Yacine", "phone": "0770" })),
    )
    .await;
    let client_id = client["id"].as_i64().unwrap();

    let (status, body) = send(&app, post_json(&uri, json!({ "phoneNumber": "0770" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: name");

    let (status, body) = send(
        &app,
        post_json(&uri, json!({ "name": "Yacine", "phoneNumber": "0770", "products": [], "total": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Products must be a non-empty list");

    let (status, body) = send(
        &app,
        post_json(
            &uri,
            json!({
                "name": "Yacine",
                "phoneNumber": "0770",
                "products": [{ "id": 1, "name": "Croissant", "quantity": 3 }],
                "total": 360.0,
                "latitude": 36.75,
                "longitude": 3.05
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Order created successfully");
    let order_id = body["orderId"].as_i64().unwrap();

    let (_, orders) = send(&app, get(&uri)).await;
    let order = &orders[0];
    assert_eq!(order["id"], order_id);
    assert_eq!(order["clientId"], client_id);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["delivered"], false);
    assert_eq!(order["products"][0]["quantity"], 3);

    let (status, body) = send(&app, post_json(&format!("/confirm_delivery/{order_id}"), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order confirmed as delivered");

    let (_, orders) = send(&app, get(&uri)).await;
    assert_eq!(orders[0]["delivered"], true);
    assert_eq!(orders[0]["status"], "delivered");

    let (status, body) = send(&app, post_json("/confirm_delivery/9999", json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");

    // Apagar o cliente mantém o pedido, sem vínculo
    let (status, _) = send(&app, delete(&format!("/clients/{client_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, orders) = send(&app, get(&uri)).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert!(orders[0]["clientId"].is_null());
}

#[tokio::test]
async fn order_total_may_be_numeric_text() {
    let (app, _) = setup().await;
    let store_id = create_store(&app, "Totals").await["id"].as_i64().unwrap();
    let uri = format!("/orders/{store_id}");
    let payload = |total: Value| json!({ "name": "A", "phoneNumber": "1", "products": [{ "id": 1 }], "total": total });

    let (status, _) = send(&app, post_json(&uri, payload(json!("360")))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json(&uri, payload(json!("lots")))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Total must be a number");

    let (_, orders) = send(&app, get(&uri)).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["total"], 360.0);
}

#[tokio::test]
async fn order_rejects_client_from_another_store() {
    let (app, _) = setup().await;
    let a = create_store(&app, "A").await["id"].as_i64().unwrap();
    let b = create_store(&app, "B").await["id"].as_i64().unwrap();

    let (_, client) = send(
        &app,
        post_json("/register_client", json!({ "storeId": b, "name": "Sara", "phone": "0555" })),
    )
    .await;

    let (status, body) = send(
        &app,
        post_json(
            &format!("/orders/{a}"),
            json!({
                "name": "Sara",
                "phoneNumber": "0555",
                "products": [{ "id": 7 }],
                "total": 15,
                "clientId": client["id"]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("does not belong"));
}

#[tokio::test]
async fn deleting_a_store_removes_everything_it_owns() {
    let (app, state) = setup().await;
    let store_id = create_store(&app, "Doomed").await["id"].as_i64().unwrap();

    send(&app, post_json("/register_client", json!({ "storeId": store_id, "name": "A", "phone": "1" }))).await;
    send(
        &app,
        post_multipart(&format!("/products/{store_id}"), &[("name", "Tea"), ("price", "3")], &[png(10, 10)]),
    )
    .await;
    send(
        &app,
        post_json(
            &format!("/orders/{store_id}"),
            json!({ "name": "A", "phoneNumber": "1", "products": [{ "id": 1 }], "total": 3 }),
        ),
    )
    .await;

    let (status, body) = send(&app, delete(&format!("/stores/{store_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Store deleted successfully");

    for table in ["clients", "products", "product_images", "orders"] {
        let remaining: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&state.db_pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0, "{table} not emptied");
    }

    let (status, _) = send(&app, get(&format!("/products/{store_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, delete(&format!("/stores/{store_id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---
// Stats
// ---

#[tokio::test]
async fn store_stats_split_windows_and_rank_top_clients() {
    let (_, state) = setup().await;
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
    let hours = Duration::hours;
    let days = Duration::days;

    let store = state
        .store_service
        .create_store("Stats", None, None, None, now - days(60))
        .await
        .unwrap();

    let mut ids = Vec::new();
    for (name, phone) in [("Alice", "1"), ("Bob", "2"), ("Carol", "3"), ("Dan", "4")] {
        let (client, _) = state
            .client_service
            .register(store.id, name, phone, now - days(60))
            .await
            .unwrap();
        ids.push(client.id);
    }
    let (alice, bob, carol, dan) = (ids[0], ids[1], ids[2], ids[3]);

    let orders = [
        (Some(alice), "1", 100.0, now - hours(1)),
        (Some(alice), "1", 50.0, now - days(3)),
        (Some(bob), "2", 300.0, now - days(10)),
        (Some(carol), "3", 20.0, now - days(40)),
        (Some(carol), "3", 20.0, now - hours(2)),
        (Some(dan), "4", 10.0, now - days(5)),
        (None, "0999", 5.0, now - days(20)),
    ];
    let mut order_ids = Vec::new();
    for (client_id, phone, total, at) in orders {
        let order = state
            .order_service
            .create_order(store.id, new_order(client_id, phone, total), at)
            .await
            .unwrap();
        order_ids.push(order.id);
    }
    state.order_service.confirm_delivery(order_ids[0]).await.unwrap();

    let stats = state.stats_service.get_store_stats(store.id, now).await.unwrap();

    assert_eq!(stats.total_clients, 4);
    assert_eq!(stats.total_orders, 7);
    assert_eq!(stats.delivered_orders, 1);
    assert_eq!(stats.pending_orders, 6);
    assert_eq!(stats.total_revenue, 505.0);

    assert_eq!((stats.today.orders, stats.today.revenue), (2, 120.0));
    assert_eq!((stats.last7_days.orders, stats.last7_days.revenue), (4, 180.0));
    assert_eq!((stats.last30_days.orders, stats.last30_days.revenue), (6, 485.0));

    let ranking: Vec<(&str, i64, f64)> = stats
        .top_clients
        .iter()
        .map(|c| (c.name.as_str(), c.orders_count, c.total_spent))
        .collect();
    assert_eq!(ranking, vec![("Bob", 1, 300.0), ("Alice", 2, 150.0), ("Carol", 2, 40.0)]);

    let global = state.stats_service.get_global_stats(now).await.unwrap();
    assert_eq!(global.total_stores, 1);
    assert_eq!(global.free_stores, 1);
    assert_eq!(global.total_orders, 7);
    assert_eq!(global.today.orders, 2);
}

#[tokio::test]
async fn store_stats_endpoint_for_empty_store() {
    let (app, _) = setup().await;
    let store_id = create_store(&app, "Empty").await["id"].as_i64().unwrap();

    let (status, body) = send(&app, get(&format!("/api/store_stats/{store_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storeId"], store_id);
    assert_eq!(body["totalOrders"], 0);
    assert_eq!(body["totalRevenue"], 0.0);
    assert_eq!(body["last7Days"]["orders"], 0);
    assert!(body["topClients"].as_array().unwrap().is_empty());

    let (status, _) = send(&app, get("/api/store_stats/9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
