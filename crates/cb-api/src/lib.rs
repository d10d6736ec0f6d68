//! # cb-api
//!
//! The web routing and orchestration layer for Campus Board.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the board.
///
/// # Developer Note
/// We use a scoped configuration so the main binary can mount the API
/// under a different prefix if it ever needs to (e.g., /api/v1/).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Anonymous session bootstrap
            .route("/session", web::post().to(handlers::create_session))
            // The feed and post lifecycle
            .route("/posts", web::get().to(handlers::list_posts))
            .route("/posts", web::post().to(handlers::create_post))
            .route("/posts/{id}", web::delete().to(handlers::delete_post))
            .route("/posts/{id}/like", web::post().to(handlers::toggle_like))
            .route("/posts/{id}/report", web::post().to(handlers::report_post))
            // Admin surface
            .route("/reports", web::get().to(handlers::list_reports))
            .route("/reports/{id}/resolve", web::post().to(handlers::resolve_report))
            .route("/analytics", web::get().to(handlers::analytics)),
    );
}
