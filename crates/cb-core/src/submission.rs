//! # Submission Boundary
//!
//! Turns raw client input into a well-formed [`Post`]: required-field
//! validation, the moderation gate, length truncation, and TTL
//! stamping. Fails fast; nothing is written on rejection.

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{post_ttl, Category, Post, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::moderation::{moderate, Verdict};

/// Raw submission payload before validation.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: Category,
}

/// Validates and moderates a submission, then builds the post record.
/// The store assigns the id on insert; `id` is left empty here.
pub fn prepare_post(new: NewPost, author_id: &str, now: DateTime<Utc>) -> Result<Post> {
    let title = new.title.trim();
    let content = new.content.trim();

    if title.is_empty() || content.is_empty() {
        return Err(AppError::ValidationError(
            "title and content are required".to_string(),
        ));
    }
    if author_id.is_empty() {
        return Err(AppError::ValidationError(
            "anonymous user id is required".to_string(),
        ));
    }

    // Moderate the full text before truncation.
    if let Verdict::Rejected { reason } = moderate(title, content) {
        return Err(AppError::ModerationRejected(reason));
    }

    Ok(Post {
        id: String::new(),
        title: truncate_chars(title, TITLE_MAX_CHARS),
        content: truncate_chars(content, CONTENT_MAX_CHARS),
        category: new.category,
        timestamp: now,
        expires_at: now + post_ttl(),
        anonymous_user_id: author_id.to_string(),
        likes: 0,
        liked_by: Default::default(),
        is_active: true,
    })
}

/// Truncate on character boundaries, not bytes.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
