//! # Engagement
//!
//! Like-toggle and report-submission state transitions. Both emit data
//! for the store rather than mutating in place: likes become a
//! last-write-wins [`PostPatch`], reports become a pending [`Report`].

use chrono::{DateTime, Utc};

use crate::models::{Post, PostPatch, Report};

/// Emits the patch for one like toggle.
///
/// A `(user, post)` pair contributes at most one like: toggling twice
/// in succession returns the post to its original state. The counter
/// saturates at zero, so a stale removal can never drive it negative.
///
/// Concurrent toggles by *different* users touch disjoint `liked_by`
/// entries and commute. A user racing against their own toggle is not
/// serialized here and may double-count; the store's next snapshot is
/// the reconciliation point.
pub fn toggle_like(post: &Post, user_id: &str) -> PostPatch {
    if post.has_liked(user_id) {
        PostPatch {
            likes: Some(post.likes.saturating_sub(1)),
            remove_liked_by: Some(user_id.to_string()),
            ..Default::default()
        }
    } else {
        PostPatch {
            likes: Some(post.likes + 1),
            add_liked_by: Some(user_id.to_string()),
            ..Default::default()
        }
    }
}

/// Builds a pending report against a post. The reason may be one of
/// [`crate::models::REPORT_REASONS`] or free text; there is no rate
/// limiting, so a user may file any number of reports.
pub fn submit_report(
    post_id: &str,
    reported_by: &str,
    reason: &str,
    now: DateTime<Utc>,
) -> Report {
    Report::new(post_id, reported_by, reason, now)
}
