//! crates/recovery_companion_core/src/journal.rs
//!
//! Parses the generated journal-prompt list and holds the fixed fallback
//! prompts used when generation fails.

use crate::error::{EngineError, EngineResult};

/// Shown when journal-prompt generation fails. Falling back here instead of
/// surfacing an error is the one intentional degrade-gracefully path in the
/// engine.
pub const FALLBACK_JOURNAL_PROMPTS: [&str; 7] = [
    "What moment today made you feel strongest in your recovery?",
    "Describe a craving you faced recently. What helped you get through it?",
    "Who in your life supports your recovery, and how can you lean on them this week?",
    "What is one habit you could build tomorrow that would make staying on track easier?",
    "Write about a time you were proud of yourself since starting recovery.",
    "What emotions have been hardest to sit with lately, and what do they tell you?",
    "What does a good day look like for you one year from now?",
];

/// Parses raw generated text as a JSON array of prompt strings.
/// An empty array counts as a format failure so the caller falls back.
pub fn parse_journal_prompts(raw: &str) -> EngineResult<Vec<String>> {
    let prompts: Vec<String> =
        serde_json::from_str(raw).map_err(|e| EngineError::ContentFormat(e.to_string()))?;
    if prompts.is_empty() {
        return Err(EngineError::ContentFormat(
            "journal prompt list was empty".to_string(),
        ));
    }
    Ok(prompts)
}

/// The fallback prompt list as owned strings.
pub fn fallback_prompts() -> Vec<String> {
    FALLBACK_JOURNAL_PROMPTS.iter().map(|p| p.to_string()).collect()
}
