//! # Domain Models
//!
//! Core entities of Campus Board: ephemeral anonymous posts and the
//! reports filed against them. Wire format is camelCase JSON with
//! epoch-millisecond instants (the shape the realtime store emits).

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Posts live for 24 hours from creation.
pub const POST_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// A post counts as "recent" for trending if younger than 6 hours.
pub const TRENDING_WINDOW_MS: i64 = 6 * 60 * 60 * 1000;

/// Titles are truncated (not rejected) at this many characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Post bodies are truncated at this many characters.
pub const CONTENT_MAX_CHARS: usize = 500;

/// Report reasons offered by the UI. `Report::reason` stays free text,
/// so clients may send anything; this list is advisory.
pub const REPORT_REASONS: [&str; 7] = [
    "Breaks the Content Policy",
    "Harassment",
    "Threatening violence",
    "Spam",
    "Sharing personal information",
    "Impersonation",
    "Prohibited transaction",
];

pub fn post_ttl() -> Duration {
    Duration::milliseconds(POST_TTL_MS)
}

pub fn trending_window() -> Duration {
    Duration::milliseconds(TRENDING_WINDOW_MS)
}

/// The fixed set of campus categories. Unknown or absent values
/// deserialize to `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Academic,
    Social,
    Events,
    CampusLife,
    Food,
    Housing,
    Technology,
    Sports,
    Clubs,
    #[serde(other)]
    General,
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

impl Category {
    /// Strict slug lookup, used for category *selection* where an
    /// unrecognized slug should be ignored rather than defaulted.
    pub fn from_slug(slug: &str) -> Option<Category> {
        match slug {
            "academic" => Some(Category::Academic),
            "social" => Some(Category::Social),
            "events" => Some(Category::Events),
            "campus-life" => Some(Category::CampusLife),
            "food" => Some(Category::Food),
            "housing" => Some(Category::Housing),
            "technology" => Some(Category::Technology),
            "sports" => Some(Category::Sports),
            "clubs" => Some(Category::Clubs),
            "general" => Some(Category::General),
            _ => None,
        }
    }

    pub fn as_slug(&self) -> &'static str {
        match self {
            Category::Academic => "academic",
            Category::Social => "social",
            Category::Events => "events",
            Category::CampusLife => "campus-life",
            Category::Food => "food",
            Category::Housing => "housing",
            Category::Technology => "technology",
            Category::Sports => "sports",
            Category::Clubs => "clubs",
            Category::General => "general",
        }
    }
}

/// Feed ordering requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    Newest,
    Best,
    Trending,
}

impl Default for RankingMode {
    /// The board opens on the "best" tab.
    fn default() -> Self {
        RankingMode::Best
    }
}

impl RankingMode {
    /// Unrecognized values fall through to `Newest`, matching the
    /// composer's fallback branch.
    pub fn parse(s: &str) -> RankingMode {
        match s {
            "best" => RankingMode::Best,
            "trending" => RankingMode::Trending,
            _ => RankingMode::Newest,
        }
    }
}

/// Category filter: the "all" sentinel or a non-empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    All,
    Only(BTreeSet<Category>),
}

impl CategorySelection {
    /// Builds a selection from raw slugs. The "all" sentinel, an empty
    /// list, or a list with no recognizable slugs all collapse to `All`.
    pub fn from_slugs<'a, I>(slugs: I) -> CategorySelection
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = BTreeSet::new();
        for slug in slugs {
            let slug = slug.trim();
            if slug == "all" {
                return CategorySelection::All;
            }
            if let Some(category) = Category::from_slug(slug) {
                set.insert(category);
            }
        }
        if set.is_empty() {
            CategorySelection::All
        } else {
            CategorySelection::Only(set)
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Only(set) => set.contains(&category),
        }
    }
}

/// An anonymous confession. Expiry is derived from `expires_at`; the
/// `is_active` flag is a legacy field from the document-store schema and
/// is never consulted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Assigned by the store on insert; empty until then.
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Category,
    #[serde(with = "instant_millis")]
    pub timestamp: DateTime<Utc>,
    #[serde(with = "instant_millis")]
    pub expires_at: DateTime<Utc>,
    /// Session identity of the author, used only for delete authorization.
    pub anonymous_user_id: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub liked_by: HashSet<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Post {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn has_liked(&self, user_id: &str) -> bool {
        self.liked_by.contains(user_id)
    }
}

fn default_true() -> bool {
    true
}

/// Field deltas for a post, applied last-write-wins by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_liked_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_liked_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReportStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReportStatus::Pending)
    }
}

/// A user report against a post. `post_id` is a weak reference: the
/// post may already be gone when the report is adjudicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub id: String,
    pub post_id: String,
    pub reported_by: String,
    pub reason: String,
    #[serde(with = "instant_millis")]
    pub timestamp: DateTime<Utc>,
    pub status: ReportStatus,
    /// Set when an admin resolves the report.
    #[serde(default, with = "instant_millis_opt")]
    pub admin_action: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new(post_id: &str, reported_by: &str, reason: &str, now: DateTime<Utc>) -> Report {
        Report {
            id: String::new(),
            post_id: post_id.to_string(),
            reported_by: reported_by.to_string(),
            reason: reason.to_string(),
            timestamp: now,
            status: ReportStatus::Pending,
            admin_action: None,
        }
    }
}

/// Field deltas for a report, applied last-write-wins by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReportStatus>,
    #[serde(default, with = "instant_millis_opt")]
    pub admin_action: Option<DateTime<Utc>>,
}

/// Instants serialize as epoch milliseconds, but upstream data may carry
/// either a numeric epoch or an RFC 3339 string. Deserialization
/// normalizes both forms before any comparison happens.
pub mod instant_millis {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawInstant {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(dt.timestamp_millis())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawInstant::deserialize(d)? {
            RawInstant::Millis(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| de::Error::custom("epoch milliseconds out of range")),
            RawInstant::Text(text) => text
                .parse::<DateTime<Utc>>()
                .map_err(de::Error::custom),
        }
    }
}

/// Optional variant of [`instant_millis`].
pub mod instant_millis_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MaybeInstant {
        Some(#[serde(with = "super::instant_millis")] DateTime<Utc>),
        None,
    }

    pub fn serialize<S: Serializer>(
        dt: &Option<DateTime<Utc>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => s.serialize_i64(dt.timestamp_millis()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match MaybeInstant::deserialize(d)? {
            MaybeInstant::Some(dt) => Some(dt),
            MaybeInstant::None => None,
        })
    }
}
