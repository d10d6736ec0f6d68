//! # Campus Board Binary
//!
//! The entry point that assembles the application based on
//! compile-time features.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use cb_api::handlers::AppState;
use cb_api::middleware;

#[cfg(feature = "store-memory")]
use cb_store_memory::MemoryBoardStore;

#[cfg(feature = "auth-simple")]
use cb_auth_simple::SimpleAuthProvider;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // 1. Initialize the store implementation
    #[cfg(feature = "store-memory")]
    let store = MemoryBoardStore::new();

    // 2. Initialize the auth implementation. Without a pinned salt,
    //    session ids rotate on every restart.
    #[cfg(feature = "auth-simple")]
    let auth = match std::env::var("CB_SESSION_SALT") {
        Ok(salt) => SimpleAuthProvider::new(&salt),
        Err(_) => SimpleAuthProvider::with_random_salt(),
    };

    // Admin endpoints stay disabled unless a password hash is provided.
    let admin_password_hash = std::env::var("CB_ADMIN_PASSWORD_HASH").ok();
    if admin_password_hash.is_none() {
        log::warn!("CB_ADMIN_PASSWORD_HASH not set; admin endpoints are disabled");
    }

    let state = web::Data::new(AppState {
        store: Arc::new(store),
        auth: Arc::new(auth),
        admin_password_hash,
    });

    let bind = std::env::var("CB_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    log::info!("🚀 Campus Board starting on http://{bind}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(cb_api::configure_routes)
    })
    .bind(bind)?
    .run()
    .await
}
