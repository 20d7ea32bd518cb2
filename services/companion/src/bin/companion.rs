//! services/companion/src/bin/companion.rs
//!
//! Small CLI front end for the content engine: generates the guide,
//! resources, and journal prompts for a topic, toggles favorites, and runs
//! an interactive therapy chat. This binary is a thin collaborator; all
//! invariants live in `recovery_companion_core`.

use companion_lib::{
    adapters::{JsonFileStore, OpenAiCompletionAdapter},
    config::{Config, ConfigError},
    error::AppError,
};
use async_openai::{config::OpenAIConfig, Client};
use recovery_companion_core::Engine;
use std::io::Write;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: companion <command>

commands:
  guide <topic> [--force]       generate or reuse the recovery guide
  resources <topic> [--force]   generate or reuse the resource document
  favorite <section-title>      toggle a guide section's favorite flag
  journal                       generate journal prompts
  chat <topic>                  interactive therapy chat (quit/clear)
  invalidate                    drop cached content";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- 2. Initialize Boundary Adapters & the Engine ---
    let api_key = config
        .openai_api_key
        .as_ref()
        .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;
    let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
    let completion = Arc::new(OpenAiCompletionAdapter::new(
        openai_client,
        config.completion_model.clone(),
    ));
    let store = Arc::new(JsonFileStore::new(&config.data_dir));
    let engine = Engine::new(completion, store);
    info!(data_dir = %config.data_dir.display(), "engine ready");

    // --- 3. Dispatch ---
    let args: Vec<String> = std::env::args().skip(1).collect();
    let force = args.iter().any(|a| a == "--force");
    match args.first().map(String::as_str) {
        Some("guide") => {
            let topic = positional(&args, 1)?;
            let document = engine.request_guide(&topic, force).await?;
            if document.sections.is_empty() {
                println!("No sections yet. Try regenerating with --force.");
            }
            for section in &document.sections {
                let marker = if section.is_favorite { " *" } else { "" };
                println!("# {}{marker}\n{}\n", section.title, section.body);
            }
        }
        Some("resources") => {
            let topic = positional(&args, 1)?;
            let document = engine.request_resources(&topic, force).await?;
            println!("{}\n", document.introduction);
            for method in &document.methods {
                println!("## {}", method.title);
                for step in &method.content {
                    println!("  - {step}");
                }
            }
            println!("\nWithdrawal symptoms:");
            for symptom in &document.symptoms {
                println!("  {}: {}", symptom.title, symptom.description);
            }
            println!("\n{}", document.encouragement);
        }
        Some("favorite") => {
            let title = positional(&args, 1)?;
            let now_favorite = engine.toggle_favorite(&title).await?;
            println!(
                "'{title}' is {} a favorite",
                if now_favorite { "now" } else { "no longer" }
            );
        }
        Some("journal") => {
            for prompt in engine.generate_journal_prompts().await {
                println!("- {prompt}");
            }
        }
        Some("chat") => {
            let topic = positional(&args, 1)?;
            run_chat(&engine, &topic).await?;
        }
        Some("invalidate") => {
            engine.invalidate_content().await?;
            println!("Cached content dropped.");
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn positional(args: &[String], index: usize) -> Result<String, AppError> {
    args.iter()
        .filter(|a| !a.starts_with("--"))
        .nth(index)
        .cloned()
        .ok_or_else(|| AppError::Internal(format!("missing argument\n{USAGE}")))
}

/// Reads messages from stdin one at a time. Input is read serially, so at
/// most one exchange is ever in flight per session.
async fn run_chat(engine: &Engine, topic: &str) -> Result<(), AppError> {
    println!("Therapy chat about {topic}. Type 'quit' to leave, 'clear' to start over.");
    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        match message {
            "quit" | "exit" => break,
            "clear" => {
                engine.clear_chat_session().await;
                println!("Conversation cleared.");
            }
            _ => match engine.send_chat_message(message, topic).await {
                Ok(reply) => println!("\n{reply}\n"),
                Err(e) => eprintln!("error: {e}"),
            },
        }
    }
    Ok(())
}
