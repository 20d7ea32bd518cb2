//! services/companion/src/adapters/completion_llm.rs
//!
//! This module contains the adapter for the text-generation service.
//! It implements the `CompletionService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use recovery_companion_core::{CompletionService, EngineError, EngineResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` using an OpenAI-compatible
/// LLM. One prompt in, raw text out; the engine never sees the wire format.
#[derive(Clone)]
pub struct OpenAiCompletionAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionAdapter {
    /// Creates a new `OpenAiCompletionAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

/// Maps client errors onto the engine's taxonomy: credential rejections are
/// fatal, everything else is a transient network failure. The adapter never
/// retries; that is the caller's decision.
fn map_openai_error(err: OpenAIError) -> EngineError {
    match err {
        OpenAIError::ApiError(api) => {
            let lowered = api.message.to_lowercase();
            if lowered.contains("api key") || lowered.contains("unauthorized") {
                EngineError::Unauthorized
            } else {
                EngineError::Network(api.message)
            }
        }
        other => EngineError::Network(other.to_string()),
    }
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for OpenAiCompletionAdapter {
    /// Issues a single prompt/response exchange and returns the raw text.
    async fn complete(&self, prompt: &str) -> EngineResult<String> {
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(map_openai_error)?
            .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(map_openai_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        // Extract the text content from the first choice in the response.
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        match text {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(EngineError::EmptyResponse),
        }
    }
}
