//! campus-board/crates/cb-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Campus Board:
//! the feed composition and expiry engine, engagement and moderation
//! rules, the report resolver, and the ports the plugins implement.

pub mod admin;
pub mod engagement;
pub mod error;
pub mod feed;
pub mod models;
pub mod moderation;
pub mod stats;
pub mod submission;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
