// Test helpers are intentionally partially used
#![allow(dead_code)]

use actix_web::http::header;
use actix_web::test::TestRequest;
use essentia::auth::TokenService;
use essentia::config::UploadConfig;
use essentia::store::MemoryStore;
use essentia::upload::ImageStorage;
use essentia::AppState;
use serde_json::json;
use std::sync::Arc;

pub const SECRET: &str = "integration-test-secret";
pub const BASE_URL: &str = "http://localhost:4000";

/// Builds an initialised actix test service over the given state.
macro_rules! test_app {
    ($state:expr) => {{
        let state = $state.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(essentia::middleware::cors())
                .configure(move |cfg| essentia::configure(cfg, state)),
        )
        .await
    }};
}

/// Fresh in-memory state with its own upload directory.
pub fn test_state() -> AppState {
    let store = Arc::new(MemoryStore::new());
    let dir = std::env::temp_dir().join(format!("essentia-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create upload dir");

    AppState::new(
        store.clone(),
        store,
        TokenService::new(SECRET),
        ImageStorage::new(&UploadConfig {
            dir,
            public_base_url: BASE_URL.to_string(),
            max_bytes: 1024,
        }),
    )
}

pub fn signup_request(username: &str, email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/signup").set_json(json!({
        "username": username,
        "email": email,
        "password": password,
    }))
}

pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post().uri("/login").set_json(json!({
        "email": email,
        "password": password,
    }))
}

pub fn cart_request(path: &str, token: &str, item_id: u32) -> TestRequest {
    TestRequest::post()
        .uri(path)
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .set_json(json!({ "itemId": item_id }))
}

pub fn get_cart_request(token: &str) -> TestRequest {
    TestRequest::post()
        .uri("/getcart")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
}

pub fn add_product_request(name: &str, category: &str) -> TestRequest {
    TestRequest::post().uri("/add-product").set_json(json!({
        "name": name,
        "image": format!("{BASE_URL}/images/{name}.png"),
        "category": category,
        "new_price": 49.99,
        "old_price": 80.0,
    }))
}
