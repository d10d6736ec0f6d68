//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.
//! The store owns the only shared mutable state; the core reconciles
//! through full-collection snapshots, never incremental mutation.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Result;
use crate::models::{Post, PostPatch, Report, ReportPatch};

/// Data persistence contract for posts and reports.
///
/// Each patch is a single independent last-write-wins write; the core
/// never assumes two mutations are applied atomically together.
#[async_trait]
pub trait BoardStore: Send + Sync {
    // Post operations
    async fn insert_post(&self, post: Post) -> Result<String>;
    async fn get_post(&self, id: &str) -> Result<Option<Post>>;
    async fn patch_post(&self, id: &str, patch: PostPatch) -> Result<()>;
    /// Idempotent: deleting a missing id is success, not an error.
    async fn delete_post(&self, id: &str) -> Result<()>;
    async fn list_posts(&self) -> Result<Vec<Post>>;
    /// Full-collection snapshot, re-delivered on every insert/patch/delete.
    fn subscribe_posts(&self) -> watch::Receiver<Vec<Post>>;

    // Report operations
    async fn file_report(&self, report: Report) -> Result<String>;
    async fn get_report(&self, id: &str) -> Result<Option<Report>>;
    async fn patch_report(&self, id: &str, patch: ReportPatch) -> Result<()>;
    async fn list_reports(&self) -> Result<Vec<Report>>;
    fn subscribe_reports(&self) -> watch::Receiver<Vec<Report>>;
}

/// Identity and admin-credential contract.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Generates a fresh anonymous session identity. Not a durable user
    /// identity: a returning client gets a new one each session.
    fn generate_session_id(&self, client_key: &str) -> String;

    /// Verifies the admin password against a stored Argon2 hash.
    async fn verify_admin_password(&self, password: &str, hash: &str) -> bool;
}
