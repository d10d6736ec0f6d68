//! # cb-store-memory
//!
//! In-memory implementation of `BoardStore`. Collections live in
//! `DashMap`s; every mutation republishes a full snapshot through a
//! `watch` channel, mirroring a realtime document store's
//! subscription semantics. Snapshots are sorted by (timestamp, id) so
//! identical contents always serialize identically.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::watch;
use uuid::Uuid;

use cb_core::error::{AppError, Result};
use cb_core::models::{Post, PostPatch, Report, ReportPatch};
use cb_core::traits::BoardStore;

pub struct MemoryBoardStore {
    posts: DashMap<String, Post>,
    reports: DashMap<String, Report>,
    posts_tx: watch::Sender<Vec<Post>>,
    reports_tx: watch::Sender<Vec<Report>>,
}

impl MemoryBoardStore {
    pub fn new() -> Self {
        let (posts_tx, _) = watch::channel(Vec::new());
        let (reports_tx, _) = watch::channel(Vec::new());
        Self {
            posts: DashMap::new(),
            reports: DashMap::new(),
            posts_tx,
            reports_tx,
        }
    }

    fn publish_posts(&self) {
        let mut snapshot: Vec<Post> = self.posts.iter().map(|e| e.value().clone()).collect();
        snapshot.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        // Send only fails when every receiver is gone; snapshots are
        // best-effort until someone subscribes.
        let _ = self.posts_tx.send(snapshot);
    }

    fn publish_reports(&self) {
        let mut snapshot: Vec<Report> = self.reports.iter().map(|e| e.value().clone()).collect();
        snapshot.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        let _ = self.reports_tx.send(snapshot);
    }
}

impl Default for MemoryBoardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BoardStore for MemoryBoardStore {
    /// Assigns a UUID v7 id when the record arrives without one, so
    /// ids stay time-ordered like the rest of the snapshot.
    async fn insert_post(&self, mut post: Post) -> Result<String> {
        if post.id.is_empty() {
            post.id = Uuid::now_v7().to_string();
        }
        let id = post.id.clone();
        self.posts.insert(id.clone(), post);
        self.publish_posts();
        log::debug!("post {id} inserted");
        Ok(id)
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.posts.get(id).map(|e| e.value().clone()))
    }

    async fn patch_post(&self, id: &str, patch: PostPatch) -> Result<()> {
        {
            let mut entry = self
                .posts
                .get_mut(id)
                .ok_or_else(|| AppError::NotFound("post".to_string(), id.to_string()))?;
            if let Some(likes) = patch.likes {
                entry.likes = likes;
            }
            if let Some(user) = patch.add_liked_by {
                entry.liked_by.insert(user);
            }
            if let Some(user) = patch.remove_liked_by {
                entry.liked_by.remove(&user);
            }
        }
        self.publish_posts();
        Ok(())
    }

    async fn delete_post(&self, id: &str) -> Result<()> {
        if self.posts.remove(id).is_some() {
            self.publish_posts();
            log::debug!("post {id} deleted");
        }
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.posts_tx.borrow().clone())
    }

    fn subscribe_posts(&self) -> watch::Receiver<Vec<Post>> {
        self.posts_tx.subscribe()
    }

    async fn file_report(&self, mut report: Report) -> Result<String> {
        if report.id.is_empty() {
            report.id = Uuid::now_v7().to_string();
        }
        let id = report.id.clone();
        self.reports.insert(id.clone(), report);
        self.publish_reports();
        log::debug!("report {id} filed");
        Ok(id)
    }

    async fn get_report(&self, id: &str) -> Result<Option<Report>> {
        Ok(self.reports.get(id).map(|e| e.value().clone()))
    }

    async fn patch_report(&self, id: &str, patch: ReportPatch) -> Result<()> {
        {
            let mut entry = self
                .reports
                .get_mut(id)
                .ok_or_else(|| AppError::NotFound("report".to_string(), id.to_string()))?;
            if let Some(status) = patch.status {
                entry.status = status;
            }
            if let Some(at) = patch.admin_action {
                entry.admin_action = Some(at);
            }
        }
        self.publish_reports();
        Ok(())
    }

    async fn list_reports(&self) -> Result<Vec<Report>> {
        Ok(self.reports_tx.borrow().clone())
    }

    fn subscribe_reports(&self) -> watch::Receiver<Vec<Report>> {
        self.reports_tx.subscribe()
    }
}
