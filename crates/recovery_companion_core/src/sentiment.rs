//! crates/recovery_companion_core/src/sentiment.rs
//!
//! Classifies free text into one of four sentiment labels using the
//! completion service with a constrained prompt.

use std::sync::Arc;

use crate::domain::Sentiment;
use crate::ports::CompletionService;
use crate::prompts;

/// Maps free text to a sentiment label via the completion boundary.
pub struct SentimentClassifier {
    completion: Arc<dyn CompletionService>,
}

impl SentimentClassifier {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    /// Classifies `text`, falling back to `Neutral` when the service fails
    /// or answers with anything other than the four known labels.
    pub async fn classify(&self, text: &str) -> Sentiment {
        match self.completion.complete(&prompts::sentiment_prompt(text)).await {
            Ok(raw) => Sentiment::from_response(&raw),
            Err(e) => {
                tracing::warn!("sentiment classification failed, defaulting to neutral: {e}");
                Sentiment::Neutral
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EngineError, EngineResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedCompletion {
        responses: Mutex<Vec<EngineResult<String>>>,
    }

    impl ScriptedCompletion {
        fn new(responses: Vec<EngineResult<String>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl CompletionService for ScriptedCompletion {
        async fn complete(&self, _prompt: &str) -> EngineResult<String> {
            self.responses
                .lock()
                .expect("scripted completion mutex should not be poisoned")
                .remove(0)
        }
    }

    fn classifier(responses: Vec<EngineResult<String>>) -> SentimentClassifier {
        SentimentClassifier::new(Arc::new(ScriptedCompletion::new(responses)))
    }

    #[tokio::test]
    async fn recognized_label_is_returned() {
        let c = classifier(vec![Ok("negative".to_string())]);
        assert_eq!(c.classify("I relapsed today").await, Sentiment::Negative);
    }

    #[tokio::test]
    async fn noisy_label_still_matches() {
        let c = classifier(vec![Ok("Positive!!".to_string())]);
        assert_eq!(c.classify("feeling great").await, Sentiment::Positive);
    }

    #[tokio::test]
    async fn unrecognized_label_falls_back_to_neutral() {
        let c = classifier(vec![Ok("unknown".to_string())]);
        assert_eq!(c.classify("hmm").await, Sentiment::Neutral);
    }

    #[tokio::test]
    async fn service_failure_falls_back_to_neutral() {
        let c = classifier(vec![Err(EngineError::Network("timeout".to_string()))]);
        assert_eq!(c.classify("hello").await, Sentiment::Neutral);
    }
}
