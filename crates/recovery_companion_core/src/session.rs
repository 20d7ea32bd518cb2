//! crates/recovery_companion_core/src/session.rs
//!
//! Maintains the bounded, ordered turn history for one chat session and
//! builds the next therapy prompt from it. The session is volatile: it is
//! never persisted and resets when its owner is torn down.

use std::collections::VecDeque;

use crate::domain::{ConversationTurn, Sentiment, Speaker};
use crate::prompts;

/// Maximum number of turns kept as prompt context; oldest dropped first.
pub const HISTORY_CAPACITY: usize = 5;

/// One chat session's bounded turn history plus the most recent sentiment.
///
/// Callers must serialize use of one session: record the user turn, await
/// the reply, then record the assistant turn. Sentiment is computed per
/// user turn but not stored in the history itself.
#[derive(Debug)]
pub struct ChatSession {
    history: VecDeque<ConversationTurn>,
    capacity: usize,
    last_sentiment: Sentiment,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            last_sentiment: Sentiment::Neutral,
        }
    }

    /// Appends a user turn tagged with its classified sentiment, trimming
    /// the oldest turns once the capacity is exceeded.
    pub fn record_user_turn(&mut self, text: impl Into<String>, sentiment: Sentiment) {
        self.last_sentiment = sentiment;
        self.push(Speaker::User, text.into());
    }

    /// Appends an assistant turn, trimming as above.
    pub fn record_assistant_turn(&mut self, text: impl Into<String>) {
        self.push(Speaker::Assistant, text.into());
    }

    fn push(&mut self, speaker: Speaker, text: String) {
        self.history.push_back(ConversationTurn { speaker, text });
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }

    /// Composes the next therapy request from the fixed framing, the most
    /// recent sentiment, the topic, and the trimmed history oldest-first.
    /// Deterministic given the same history and sentiment.
    pub fn build_prompt(&self, topic: &str) -> String {
        let transcript: Vec<String> = self
            .history
            .iter()
            .map(|turn| match turn.speaker {
                Speaker::User => format!("User: {}", turn.text),
                Speaker::Assistant => format!("Therapist: {}", turn.text),
            })
            .collect();
        let latest = self
            .history
            .iter()
            .rev()
            .find(|turn| turn.speaker == Speaker::User)
            .map(|turn| turn.text.as_str())
            .unwrap_or_default();

        prompts::therapy_prompt(
            topic,
            self.last_sentiment.label(),
            &transcript.join("\n"),
            latest,
        )
    }

    /// Empties the history; favorites and cached content are untouched.
    pub fn clear(&mut self) {
        self.history.clear();
        self.last_sentiment = Sentiment::Neutral;
    }

    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appending_past_capacity_keeps_the_last_turns_in_order() {
        let mut session = ChatSession::new();
        for i in 1..=6 {
            if i % 2 == 1 {
                session.record_user_turn(format!("u{i}"), Sentiment::Neutral);
            } else {
                session.record_assistant_turn(format!("a{i}"));
            }
        }
        let texts: Vec<&str> = session.turns().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a2", "u3", "a4", "u5", "a6"]);
    }

    #[test]
    fn build_prompt_is_a_pure_function_of_history_and_sentiment() {
        let mut a = ChatSession::new();
        let mut b = ChatSession::new();
        for session in [&mut a, &mut b] {
            session.record_user_turn("I had a rough day", Sentiment::Negative);
            session.record_assistant_turn("Tell me more about it.");
            session.record_user_turn("I almost gave in", Sentiment::Mixed);
        }
        assert_eq!(a.build_prompt("smoking"), b.build_prompt("smoking"));
    }

    #[test]
    fn build_prompt_includes_topic_sentiment_and_transcript() {
        let mut session = ChatSession::new();
        session.record_user_turn("I feel awful", Sentiment::Negative);
        let prompt = session.build_prompt("gambling");
        assert!(prompt.contains("gambling addiction recovery"));
        assert!(prompt.contains("a negative emotional tone"));
        assert!(prompt.contains("User: I feel awful"));
        assert!(prompt.contains("User's latest message: I feel awful"));
    }

    #[test]
    fn clear_empties_history_and_resets_sentiment() {
        let mut session = ChatSession::new();
        session.record_user_turn("hi", Sentiment::Positive);
        session.record_assistant_turn("hello");
        session.clear();
        assert!(session.is_empty());
        assert!(session.build_prompt("smoking").contains("a neutral emotional tone"));
    }
}
