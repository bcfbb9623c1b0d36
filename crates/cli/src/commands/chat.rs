//! `genius chat` — Interactive or single-message chat mode.

use crate::session::ChatSession;
use genius_config::AppConfig;
use genius_context::{PromptTemplate, WindowPolicy};
use genius_core::history::HistoryStore;
use genius_history::{RecencyCache, SqliteHistory};
use genius_providers::OllamaProvider;
use std::io::Write;
use std::sync::Arc;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let store: Arc<dyn HistoryStore> =
        Arc::new(SqliteHistory::open(&config.history.database_path).await?);

    let provider = Arc::new(OllamaProvider::new(
        Some(&config.provider.base_url),
        config.provider.timeout_secs,
    )?);

    let template = match &config.template.prompt_override {
        Some(t) => PromptTemplate::new(t),
        None => PromptTemplate::default(),
    };

    let mut session = ChatSession::new(
        RecencyCache::new(store),
        WindowPolicy::new(config.context.default_window),
        template,
        provider,
        &config.default_model,
        config.provider.temperature,
        config.history.recent_limit,
    );

    if let Some(msg) = message {
        // Single message mode
        let result = session.turn(&msg).await;
        session.close().await;
        println!("{}", result?);
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Genius — {} via {}", config.default_model, config.provider.base_url);
    println!("  Hi, I'm Genius. How can I help you?");
    println!("  Type 'quit' or 'exit' to end the session.");
    println!();

    let stdin = std::io::stdin();
    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let read = stdin.read_line(&mut line);
        match read {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                session.close().await;
                return Err(e.into());
            }
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            println!();
            println!("  Genius > Goodbye! Have a great day!");
            break;
        }

        match session.turn(input).await {
            Ok(reply) => {
                println!();
                for line in reply.lines() {
                    println!("  Genius > {line}");
                }
                println!();
            }
            Err(e) => {
                eprintln!();
                eprintln!("  [Error] {e}");
                eprintln!("  Ensure the Ollama server is running and accessible.");
                break;
            }
        }
    }

    session.close().await;
    Ok(())
}
