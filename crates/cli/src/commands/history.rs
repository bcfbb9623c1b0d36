//! `genius history` — Show recent conversation turns.

use genius_config::AppConfig;
use genius_core::history::HistoryStore;
use genius_history::SqliteHistory;

pub async fn run(limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let store = SqliteHistory::open(&config.history.database_path).await?;
    let result = async {
        let total = store.count().await?;
        let turns = store.recent(limit).await?;
        Ok::<_, genius_core::HistoryError>((total, turns))
    }
    .await;
    store.close().await;

    let (total, turns) = result?;

    if turns.is_empty() {
        println!("No conversation history yet.");
        return Ok(());
    }

    println!("Showing {} of {} turns:", turns.len(), total);
    println!();
    for turn in turns {
        println!("  [{:>5}] {} > {}", turn.id, turn.role, turn.message);
    }

    Ok(())
}
