//! crates/recovery_companion_core/src/domain.rs
//!
//! Defines the pure, core data structures for the recovery companion engine.
//! These structs are independent of any storage technology; the generated
//! documents derive serde only because the persistence boundary requires
//! round-trip fidelity (save then load reproduces an equal document).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// A generated document older than this is treated as stale and regenerated.
pub const STALE_AFTER_HOURS: i64 = 24;

/// The set of section titles the user has favorited, persisted independently
/// of any single guide so favorite status survives regeneration.
pub type FavoriteSet = HashSet<String>;

/// Emotional tone assigned to a single user chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Mixed,
}

impl Sentiment {
    /// The label used in prompts and expected back from the classifier.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Mixed => "mixed",
        }
    }

    /// Maps a raw classifier response onto a sentiment label.
    ///
    /// The response is lowercased, whitespace-trimmed, and stripped of any
    /// surrounding punctuation before matching, so `"Positive!!"` still
    /// counts as `Positive`. Anything unrecognized maps to `Neutral`.
    pub fn from_response(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        match lowered.trim_matches(|c: char| !c.is_ascii_alphabetic()) {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            "mixed" => Sentiment::Mixed,
            _ => Sentiment::Neutral,
        }
    }
}

/// The role that produced one conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in a chat session, kept only as prompt context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
}

/// One titled section of a generated recovery guide.
///
/// Identity is the generated `id`, but favorite matching is by `title`
/// (exact string equality) so that favorites survive regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideSection {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub is_favorite: bool,
}

impl GuideSection {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            is_favorite: false,
        }
    }
}

/// A complete generated recovery guide for one topic.
///
/// `sections` preserves the order headings appeared in the generated text.
/// Superseded wholesale on regeneration, never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideDocument {
    pub topic: String,
    pub sections: Vec<GuideSection>,
    pub generated_at: DateTime<Utc>,
}

impl GuideDocument {
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.generated_at > Duration::hours(STALE_AFTER_HOURS)
    }
}

/// One mitigation method in a generated resource document.
///
/// `is_expanded` is UI-only state and plays no part in cache validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMethod {
    pub id: Uuid,
    pub title: String,
    pub content: Vec<String>,
    pub is_expanded: bool,
}

/// One withdrawal symptom in a generated resource document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalSymptom {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

/// A complete generated resource document for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDocument {
    pub topic: String,
    pub introduction: String,
    pub encouragement: String,
    pub methods: Vec<ResourceMethod>,
    pub symptoms: Vec<WithdrawalSymptom>,
    pub generated_at: DateTime<Utc>,
}

impl ResourceDocument {
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.generated_at > Duration::hours(STALE_AFTER_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_from_response_matches_case_insensitively() {
        assert_eq!(Sentiment::from_response("POSITIVE"), Sentiment::Positive);
        assert_eq!(Sentiment::from_response("  negative \n"), Sentiment::Negative);
        assert_eq!(Sentiment::from_response("Mixed"), Sentiment::Mixed);
    }

    #[test]
    fn sentiment_from_response_strips_surrounding_punctuation() {
        assert_eq!(Sentiment::from_response("Positive!!"), Sentiment::Positive);
        assert_eq!(Sentiment::from_response("\"neutral\"."), Sentiment::Neutral);
    }

    #[test]
    fn sentiment_from_response_defaults_to_neutral() {
        assert_eq!(Sentiment::from_response("unknown"), Sentiment::Neutral);
        assert_eq!(Sentiment::from_response(""), Sentiment::Neutral);
        assert_eq!(
            Sentiment::from_response("somewhat positive overall"),
            Sentiment::Neutral
        );
    }

    #[test]
    fn guide_document_staleness_is_a_pure_function_of_now() {
        let generated_at = Utc::now();
        let doc = GuideDocument {
            topic: "smoking".to_string(),
            sections: vec![],
            generated_at,
        };
        assert!(!doc.is_stale(generated_at + Duration::hours(23)));
        assert!(!doc.is_stale(generated_at + Duration::hours(24)));
        assert!(doc.is_stale(generated_at + Duration::hours(25)));
    }

    #[test]
    fn guide_document_round_trips_through_json() {
        let doc = GuideDocument {
            topic: "smoking".to_string(),
            sections: vec![GuideSection::new("Coping Strategies", "Take a walk.")],
            generated_at: Utc::now(),
        };
        let encoded = serde_json::to_string(&doc).unwrap();
        let decoded: GuideDocument = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, doc);
    }
}
