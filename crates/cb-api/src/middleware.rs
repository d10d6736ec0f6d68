//! campus-board/crates/cb-api/src/middleware.rs
//!
//! Shared middleware for logging and cross-origin traffic.

use actix_web::middleware::Logger;
use actix_cors::Cors;

// Standard request logger:
// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn standard_middleware() -> Logger {
    Logger::default()
}

// The board UI is a static page that may be served from a different
// origin than the API.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_header()
        .allowed_methods(vec!["GET", "POST", "DELETE"])
        .max_age(3600)
}
