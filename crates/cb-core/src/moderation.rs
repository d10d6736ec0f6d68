//! # Moderation Gate
//!
//! Case-insensitive substring matching against a fixed denylist. This
//! is a best-effort courtesy filter, not a security boundary: no
//! tokenization, no stemming, no evasion resistance.

/// Terms that reject a submission. Matching is on the lowercased
/// concatenation of title and content.
pub const BANNED_TERMS: [&str; 18] = [
    "spam",
    "scam",
    "fraud",
    "hate",
    "violence",
    "bullying",
    "harassment",
    "abuse",
    "discrimination",
    "threat",
    "illegal",
    "explicit",
    "nsfw",
    "offensive",
    "inappropriate",
    "drugs",
    "alcohol",
    "gambling",
];

/// The matched term is deliberately not disclosed to the caller.
pub const REJECTION_MESSAGE: &str =
    "Content contains inappropriate language. Please revise your post.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected { reason: String },
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }
}

/// Tests a submission against the denylist. First match short-circuits.
pub fn moderate(title: &str, content: &str) -> Verdict {
    let text = format!("{} {}", title, content).to_lowercase();

    for term in BANNED_TERMS {
        if text.contains(term) {
            return Verdict::Rejected {
                reason: REJECTION_MESSAGE.to_string(),
            };
        }
    }

    Verdict::Allowed
}
