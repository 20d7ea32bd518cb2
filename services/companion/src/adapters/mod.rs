pub mod completion_llm;
pub mod store;

pub use completion_llm::OpenAiCompletionAdapter;
pub use store::JsonFileStore;
