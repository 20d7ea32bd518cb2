pub mod cache;
pub mod domain;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod journal;
pub mod ports;
pub mod prompts;
pub mod sections;
pub mod sentiment;
pub mod session;
pub mod structured;

pub use domain::{
    ConversationTurn, FavoriteSet, GuideDocument, GuideSection, ResourceDocument, ResourceMethod,
    Sentiment, Speaker, WithdrawalSymptom,
};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use ports::{CompletionService, ContentStore};
pub use session::ChatSession;
