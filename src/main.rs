//! aura-chat demo CLI
//!
//! Asks one question against a JSON snapshot of the work-item graph, with
//! the configured qdrant index and (optionally) Ollama model wired in.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use aura_chat::config::Config;
use aura_chat::engine::ChatEngine;
use aura_chat::model::{ChatModel, OllamaClient};
use aura_chat::stores::memory::InMemoryWorkItemStore;
use aura_chat::stores::qdrant::QdrantVectorStore;
use aura_chat::types::WorkItem;

#[derive(Parser, Debug)]
#[command(name = "aura-chat", version, about = "Ask a grounded question about tracked work")]
struct Args {
    /// The question to answer
    #[arg(required = true, trailing_var_arg = true)]
    question: Vec<String>,

    /// JSON file holding the work-item snapshot
    #[arg(long)]
    data: Option<PathBuf>,

    /// Prior conversation turns, oldest first (repeatable)
    #[arg(long = "history")]
    history: Vec<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "aura_chat=debug" } else { "aura_chat=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let config = Config::load()?;
    let question = args.question.join(" ");

    let items: Vec<WorkItem> = match &args.data {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => Vec::new(),
    };
    let store = Arc::new(InMemoryWorkItemStore::from_items(items));

    let ollama = Arc::new(OllamaClient::new(
        &config.model.base_url,
        &config.model.embedding_model,
        config.model.timeout(),
    )?);
    let vectors = Arc::new(QdrantVectorStore::new(&config.vector.url, ollama.clone())?);

    let model: Option<Arc<dyn ChatModel>> = if config.model.enabled {
        Some(ollama)
    } else {
        None
    };

    let engine = ChatEngine::new(store, vectors, model, &config);
    let response = engine.answer(&question, &args.history).await;

    println!("{}", response.message);
    if !response.sources.is_empty() {
        println!();
        println!("{} {}", "Sources:".bold(), response.sources.join(", ").dimmed());
    }
    println!(
        "{} {}",
        "Confidence:".bold(),
        format!("{:.2}", response.confidence).cyan()
    );

    Ok(())
}
