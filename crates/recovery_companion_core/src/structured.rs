//! crates/recovery_companion_core/src/structured.rs
//!
//! Parses a generated JSON text blob into a validated resource document.
//! Validation is strict and all-or-nothing: a missing key, a wrong value
//! type, or malformed JSON fails the whole parse, so callers never see
//! partially valid content.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{ResourceDocument, ResourceMethod, WithdrawalSymptom};
use crate::error::{EngineError, EngineResult};

// Wire schema as requested from the generative service. Ids are assigned
// locally and are not part of the external format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResourceContent {
    introduction: String,
    encouragement: String,
    methods: Vec<RawMethod>,
    withdrawal_symptoms: Vec<RawSymptom>,
}

#[derive(Debug, Deserialize)]
struct RawMethod {
    title: String,
    content: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSymptom {
    title: String,
    description: String,
}

/// Parses raw generated text as a resource document for `topic`.
///
/// Every method and symptom receives a fresh id, and methods start
/// collapsed (`is_expanded = false`).
pub fn parse_resources(
    raw: &str,
    topic: &str,
    generated_at: DateTime<Utc>,
) -> EngineResult<ResourceDocument> {
    let parsed: RawResourceContent =
        serde_json::from_str(raw).map_err(|e| EngineError::ContentFormat(e.to_string()))?;

    Ok(ResourceDocument {
        topic: topic.to_string(),
        introduction: parsed.introduction,
        encouragement: parsed.encouragement,
        methods: parsed
            .methods
            .into_iter()
            .map(|m| ResourceMethod {
                id: Uuid::new_v4(),
                title: m.title,
                content: m.content,
                is_expanded: false,
            })
            .collect(),
        symptoms: parsed
            .withdrawal_symptoms
            .into_iter()
            .map(|s| WithdrawalSymptom {
                id: Uuid::new_v4(),
                title: s.title,
                description: s.description,
            })
            .collect(),
        generated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "introduction": "i",
        "encouragement": "e",
        "methods": [{"title": "t", "content": ["a"]}],
        "withdrawalSymptoms": [{"title": "s", "description": "d"}]
    }"#;

    #[test]
    fn parses_a_minimal_valid_document() {
        let doc = parse_resources(MINIMAL, "smoking", Utc::now()).unwrap();
        assert_eq!(doc.topic, "smoking");
        assert_eq!(doc.introduction, "i");
        assert_eq!(doc.encouragement, "e");
        assert_eq!(doc.methods.len(), 1);
        assert_eq!(doc.methods[0].title, "t");
        assert_eq!(doc.methods[0].content, vec!["a"]);
        assert!(!doc.methods[0].is_expanded);
        assert_eq!(doc.symptoms.len(), 1);
        assert_eq!(doc.symptoms[0].description, "d");
    }

    #[test]
    fn assigns_fresh_ids_to_methods_and_symptoms() {
        let a = parse_resources(MINIMAL, "smoking", Utc::now()).unwrap();
        let b = parse_resources(MINIMAL, "smoking", Utc::now()).unwrap();
        assert_ne!(a.methods[0].id, b.methods[0].id);
        assert_ne!(a.symptoms[0].id, b.symptoms[0].id);
    }

    #[test]
    fn missing_top_level_key_fails() {
        for key in ["introduction", "encouragement", "methods", "withdrawalSymptoms"] {
            let mut value: serde_json::Value = serde_json::from_str(MINIMAL).unwrap();
            value.as_object_mut().unwrap().remove(key);
            let raw = value.to_string();
            let err = parse_resources(&raw, "smoking", Utc::now()).unwrap_err();
            assert!(
                matches!(err, EngineError::ContentFormat(_)),
                "expected ContentFormat when {key} is missing, got {err:?}"
            );
        }
    }

    #[test]
    fn wrong_value_type_fails() {
        let raw = r#"{
            "introduction": "i",
            "encouragement": "e",
            "methods": [{"title": "t", "content": "not a list"}],
            "withdrawalSymptoms": []
        }"#;
        assert!(matches!(
            parse_resources(raw, "smoking", Utc::now()),
            Err(EngineError::ContentFormat(_))
        ));
    }

    #[test]
    fn non_json_text_fails() {
        assert!(matches!(
            parse_resources("Here are your resources!", "smoking", Utc::now()),
            Err(EngineError::ContentFormat(_))
        ));
    }
}
