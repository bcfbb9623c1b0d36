//! `genius doctor` — Diagnose configuration and provider health.

use genius_config::AppConfig;
use genius_core::provider::Provider;
use genius_providers::OllamaProvider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!();
    println!("  Genius Doctor");
    println!();
    println!("  Config file:  {}", AppConfig::config_dir().join("config.toml").display());
    println!("  Model:        {}", config.default_model);
    println!("  Database:     {}", config.history.database_path);
    println!("  Recent limit: {}", config.history.recent_limit);
    println!("  Default win:  {}", config.context.default_window);
    println!("  Ollama URL:   {}", config.provider.base_url);
    println!();

    let provider = OllamaProvider::new(
        Some(&config.provider.base_url),
        config.provider.timeout_secs,
    )?;

    print!("  Ollama reachable... ");
    use std::io::Write;
    std::io::stdout().flush()?;
    match provider.health_check().await {
        Ok(true) => println!("OK"),
        Ok(false) => println!("FAILED (server responded with an error)"),
        Err(e) => println!("FAILED ({e})"),
    }
    println!();

    Ok(())
}
