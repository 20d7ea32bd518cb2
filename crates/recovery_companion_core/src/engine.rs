//! crates/recovery_companion_core/src/engine.rs
//!
//! The orchestrator behind the UI-facing API: checks the cache, requests
//! new content from the completion boundary when needed, runs the parsers,
//! reconciles favorites, and drives the chat session.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cache::ContentCache;
use crate::domain::{FavoriteSet, GuideDocument, ResourceDocument};
use crate::error::{EngineError, EngineResult};
use crate::favorites;
use crate::journal;
use crate::ports::{CompletionService, ContentStore};
use crate::prompts;
use crate::sections;
use crate::sentiment::SentimentClassifier;
use crate::session::ChatSession;
use crate::structured;

//=========================================================================================
// The Engine
//=========================================================================================

/// Content orchestration engine for one installation.
///
/// Holds the only mutable shared state in the core: the two cached
/// documents (behind the store) and the volatile chat session. The session
/// sits behind a mutex held across one full user/assistant exchange, which
/// enforces the required turn ordering even if a caller misbehaves.
pub struct Engine {
    completion: Arc<dyn CompletionService>,
    store: Arc<dyn ContentStore>,
    cache: ContentCache,
    classifier: SentimentClassifier,
    chat: Mutex<ChatSession>,
}

impl Engine {
    pub fn new(completion: Arc<dyn CompletionService>, store: Arc<dyn ContentStore>) -> Self {
        Self {
            cache: ContentCache::new(store.clone()),
            classifier: SentimentClassifier::new(completion.clone()),
            completion,
            store,
            chat: Mutex::new(ChatSession::new()),
        }
    }

    /// Returns the recovery guide for `topic`, regenerating on cache miss
    /// or when `force` is set.
    ///
    /// Zero parsed sections is a valid (if unhelpful) result, cached and
    /// returned as "no sections yet" rather than an error.
    pub async fn request_guide(&self, topic: &str, force: bool) -> EngineResult<GuideDocument> {
        if topic.is_empty() {
            return Err(EngineError::EmptyTopic);
        }

        let favorite_set = self.store.load_favorites().await?;
        if !force {
            if let Some(mut cached) = self.cache.get_guide(topic, Utc::now()).await? {
                cached.sections = favorites::reconcile(cached.sections, &favorite_set);
                return Ok(cached);
            }
        }

        let ticket = self.cache.begin_guide_generation(force);
        info!(topic, force, "generating recovery guide");
        let raw = self.completion.complete(&prompts::guide_prompt(topic)).await?;

        let parsed = sections::parse_sections(&raw);
        if parsed.is_empty() {
            warn!(topic, "generated guide contained no parseable sections");
        }
        let document = GuideDocument {
            topic: topic.to_string(),
            sections: favorites::reconcile(parsed, &favorite_set),
            generated_at: Utc::now(),
        };
        self.cache.put_guide(&document, ticket).await?;
        Ok(document)
    }

    /// Returns the resource document for `topic`, regenerating on cache
    /// miss or when `force` is set. A schema-invalid response fails with
    /// `ContentFormat` and caches nothing.
    pub async fn request_resources(
        &self,
        topic: &str,
        force: bool,
    ) -> EngineResult<ResourceDocument> {
        if topic.is_empty() {
            return Err(EngineError::EmptyTopic);
        }

        if !force {
            if let Some(cached) = self.cache.get_resources(topic, Utc::now()).await? {
                return Ok(cached);
            }
        }

        let ticket = self.cache.begin_resource_generation(force);
        info!(topic, force, "generating recovery resources");
        let raw = self
            .completion
            .complete(&prompts::resources_prompt(topic))
            .await?;

        let document = structured::parse_resources(&raw, topic, Utc::now())?;
        self.cache.put_resources(&document, ticket).await?;
        Ok(document)
    }

    /// Toggles `section_title` in the persisted favorite set and returns
    /// the new favorite state. The set is saved before this returns;
    /// flipping the flag on any in-memory section is the caller's concern,
    /// and cache reads re-apply the set so flags stay consistent.
    pub async fn toggle_favorite(&self, section_title: &str) -> EngineResult<bool> {
        let mut favorite_set = self.store.load_favorites().await?;
        let now_favorite = if favorite_set.remove(section_title) {
            false
        } else {
            favorite_set.insert(section_title.to_string());
            true
        };
        self.store.save_favorites(&favorite_set).await?;
        Ok(now_favorite)
    }

    /// The persisted favorite titles.
    pub async fn favorites(&self) -> EngineResult<FavoriteSet> {
        self.store.load_favorites().await
    }

    /// Runs one chat exchange: classify the message's sentiment (falling
    /// back to neutral), record the user turn, build the therapy prompt
    /// from the trimmed history, and record the reply.
    pub async fn send_chat_message(&self, text: &str, topic: &str) -> EngineResult<String> {
        if topic.is_empty() {
            return Err(EngineError::EmptyTopic);
        }

        let sentiment = self.classifier.classify(text).await;

        // The lock is held across the exchange so turns land in order.
        let mut chat = self.chat.lock().await;
        chat.record_user_turn(text, sentiment);
        let prompt = chat.build_prompt(topic);
        let reply = self.completion.complete(&prompt).await?;
        chat.record_assistant_turn(reply.clone());
        Ok(reply)
    }

    /// Empties the chat history; favorites and cached content are untouched.
    pub async fn clear_chat_session(&self) {
        self.chat.lock().await.clear();
    }

    /// Generates the journal prompt list, degrading to the fixed built-in
    /// prompts on any failure instead of surfacing an error.
    pub async fn generate_journal_prompts(&self) -> Vec<String> {
        let generated = self
            .completion
            .complete(prompts::JOURNAL_PROMPTS_REQUEST)
            .await
            .and_then(|raw| journal::parse_journal_prompts(&raw));
        match generated {
            Ok(prompts) => prompts,
            Err(e) => {
                warn!("journal prompt generation failed, using built-in prompts: {e}");
                journal::fallback_prompts()
            }
        }
    }

    /// Drops both cached documents, forcing regeneration on next request.
    pub async fn invalidate_content(&self) -> EngineResult<()> {
        self.cache.invalidate().await
    }
}
