//! Board-level counters for the admin dashboard.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Post, Report};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub active_posts: usize,
    pub total_likes: u64,
    pub unique_authors: usize,
    pub pending_reports: usize,
}

/// Computes dashboard counters from the current snapshots. Likes and
/// authors count across *all* posts (expired included); only the post
/// count is expiry-filtered.
pub fn board_stats(posts: &[Post], reports: &[Report], now: DateTime<Utc>) -> BoardStats {
    let active_posts = posts.iter().filter(|p| p.is_live(now)).count();
    let total_likes = posts.iter().map(|p| p.likes as u64).sum();
    let unique_authors = posts
        .iter()
        .map(|p| p.anonymous_user_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let pending_reports = reports.iter().filter(|r| !r.status.is_terminal()).count();

    BoardStats {
        active_posts,
        total_likes,
        unique_authors,
        pending_reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{post_ttl, Category, ReportStatus};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn post(id: &str, author: &str, likes: u32, age: Duration) -> Post {
        let timestamp = now() - age;
        Post {
            id: id.to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
            category: Category::General,
            timestamp,
            expires_at: timestamp + post_ttl(),
            anonymous_user_id: author.to_string(),
            likes,
            liked_by: Default::default(),
            is_active: true,
        }
    }

    #[test]
    fn counters_reflect_snapshots() {
        let posts = vec![
            post("a", "u1", 5, Duration::hours(1)),
            post("b", "u1", 3, Duration::hours(2)),
            post("c", "u2", 1, Duration::hours(30)), // expired
        ];
        let mut resolved = Report::new("a", "u3", "Spam", now());
        resolved.status = ReportStatus::Approved;
        let reports = vec![Report::new("b", "u3", "Harassment", now()), resolved];

        let stats = board_stats(&posts, &reports, now());
        assert_eq!(stats.active_posts, 2);
        assert_eq!(stats.total_likes, 9);
        assert_eq!(stats.unique_authors, 2);
        assert_eq!(stats.pending_reports, 1);
    }
}
