//! # Feed Composition
//!
//! Pure functions over a post snapshot: expiry filtering first, then
//! category selection and ranking. The composer never checks expiry
//! itself; callers chain [`filter_live`] into [`compose_feed`].

use chrono::{DateTime, Utc};

use crate::models::{trending_window, CategorySelection, Post, RankingMode};

/// Returns the subsequence of posts whose `expires_at` is still in the
/// future. Pure and total; expired posts never come back.
pub fn filter_live(posts: &[Post], now: DateTime<Utc>) -> Vec<Post> {
    posts.iter().filter(|p| p.is_live(now)).cloned().collect()
}

/// Applies category selection and ranking, producing the display order.
///
/// All three modes use a stable sort, so ties keep their relative input
/// order. The trending score is a point-in-time snapshot against `now`,
/// recomputed on every call as the 6-hour window slides.
pub fn compose_feed(
    posts: &[Post],
    selection: &CategorySelection,
    mode: RankingMode,
    now: DateTime<Utc>,
) -> Vec<Post> {
    let mut feed: Vec<Post> = posts
        .iter()
        .filter(|p| selection.matches(p.category))
        .cloned()
        .collect();

    match mode {
        RankingMode::Newest => {
            feed.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
        RankingMode::Best => {
            feed.sort_by(|a, b| b.likes.cmp(&a.likes));
        }
        RankingMode::Trending => {
            let window_start = now - trending_window();
            feed.sort_by(|a, b| {
                trending_score(b, window_start).cmp(&trending_score(a, window_start))
            });
        }
    }
    feed
}

/// Likes count double while the post is inside the recency window.
fn trending_score(post: &Post, window_start: DateTime<Utc>) -> u64 {
    if post.timestamp > window_start {
        post.likes as u64 * 2
    } else {
        post.likes as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{post_ttl, Category};
    use chrono::{Duration, TimeZone};

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn post(id: &str, category: Category, likes: u32, timestamp: DateTime<Utc>) -> Post {
        Post {
            id: id.to_string(),
            title: format!("title {id}"),
            content: format!("content {id}"),
            category,
            timestamp,
            expires_at: timestamp + post_ttl(),
            anonymous_user_id: "author".to_string(),
            likes,
            liked_by: Default::default(),
            is_active: true,
        }
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let created = at(1_700_000_000_000);
        let p = post("p1", Category::General, 0, created);

        // Live one minute before the 24h mark, gone one second after.
        assert!(p.is_live(created + Duration::hours(23) + Duration::minutes(59)));
        assert!(!p.is_live(created + Duration::hours(24) + Duration::seconds(1)));
        // `expires_at > now` is strict: exactly at the boundary is expired.
        assert!(!p.is_live(created + Duration::hours(24)));
    }

    #[test]
    fn filter_live_drops_expired_posts() {
        let now = at(1_700_000_000_000);
        let fresh = post("fresh", Category::General, 0, now - Duration::hours(1));
        let stale = post("stale", Category::General, 0, now - Duration::hours(25));
        let live = filter_live(&[fresh, stale], now);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, "fresh");
    }

    #[test]
    fn expiry_is_monotonic() {
        let now = at(1_700_000_000_000);
        let p = post("p1", Category::General, 0, now);
        let t1 = now + Duration::hours(24);
        let t2 = t1 + Duration::hours(5);
        assert!(!p.is_live(t1));
        assert!(!p.is_live(t2));
    }

    #[test]
    fn newest_orders_by_timestamp_descending() {
        let now = at(1_700_000_000_000);
        let older = post("older", Category::General, 9, now - Duration::hours(2));
        let newer = post("newer", Category::General, 1, now - Duration::hours(1));
        let feed = compose_feed(
            &[older, newer],
            &CategorySelection::All,
            RankingMode::Newest,
            now,
        );
        assert_eq!(feed[0].id, "newer");
        assert_eq!(feed[1].id, "older");
    }

    #[test]
    fn best_orders_by_likes_with_stable_ties() {
        let now = at(1_700_000_000_000);
        let a = post("a", Category::General, 3, now - Duration::hours(1));
        let b = post("b", Category::General, 5, now - Duration::hours(2));
        let c = post("c", Category::General, 3, now - Duration::hours(3));
        let feed = compose_feed(
            &[a, b, c],
            &CategorySelection::All,
            RankingMode::Best,
            now,
        );
        assert_eq!(feed[0].id, "b");
        // Tied posts keep their input order.
        assert_eq!(feed[1].id, "a");
        assert_eq!(feed[2].id, "c");
    }

    #[test]
    fn trending_doubles_recent_posts() {
        let now = at(1_700_000_000_000);
        // A: 5 likes, 1h old -> 10. B: 3 likes, 30m old -> 6.
        let a = post("a", Category::General, 5, now - Duration::hours(1));
        let b = post("b", Category::General, 3, now - Duration::minutes(30));
        let feed = compose_feed(
            &[b.clone(), a.clone()],
            &CategorySelection::All,
            RankingMode::Trending,
            now,
        );
        assert_eq!(feed[0].id, "a");
        assert_eq!(feed[1].id, "b");
    }

    #[test]
    fn trending_window_outranks_stale_likes() {
        let now = at(1_700_000_000_000);
        // Recent post with 4 likes scores 8, beating an older post with 7.
        let recent = post("recent", Category::General, 4, now - Duration::hours(2));
        let stale = post("stale", Category::General, 7, now - Duration::hours(10));
        let feed = compose_feed(
            &[stale, recent],
            &CategorySelection::All,
            RankingMode::Trending,
            now,
        );
        assert_eq!(feed[0].id, "recent");
    }

    #[test]
    fn category_selection_filters_the_feed() {
        let now = at(1_700_000_000_000);
        let food = post("food", Category::Food, 0, now);
        let sports = post("sports", Category::Sports, 0, now);
        let general = post("general", Category::General, 0, now);

        let selection = CategorySelection::from_slugs(["food", "sports"]);
        let feed = compose_feed(
            &[food, sports, general],
            &selection,
            RankingMode::Newest,
            now,
        );
        assert_eq!(feed.len(), 2);
        assert!(feed.iter().all(|p| p.id != "general"));
    }

    #[test]
    fn composition_is_deterministic() {
        let now = at(1_700_000_000_000);
        let posts = vec![
            post("a", Category::Food, 2, now - Duration::hours(1)),
            post("b", Category::Sports, 2, now - Duration::hours(2)),
            post("c", Category::Food, 8, now - Duration::hours(7)),
        ];
        let first = compose_feed(&posts, &CategorySelection::All, RankingMode::Trending, now);
        let second = compose_feed(&posts, &CategorySelection::All, RankingMode::Trending, now);
        let ids = |v: &[Post]| v.iter().map(|p| p.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let now = at(1_700_000_000_000);
        assert!(compose_feed(&[], &CategorySelection::All, RankingMode::Best, now).is_empty());
        assert!(filter_live(&[], now).is_empty());
    }
}
