// src/main.rs

use std::str::FromStr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cardtrack::config::CONFIG;
use cardtrack::state::AppState;
use cardtrack::tasks::TaskManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let level = Level::from_str(&CONFIG.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cardtrack");
    info!(
        "Default priority update schedule: {}",
        CONFIG.default_update_schedule()
    );
    info!("Max cards for today: {}", CONFIG.max_cards_for_today);
    info!("Refill interval: {}s", CONFIG.refill_interval_secs);

    let state = AppState::new(&CONFIG);

    let mut task_manager = TaskManager::new(state, &CONFIG);
    task_manager.start();

    // The HTTP adapter layer plugs in here; the core itself just parks until
    // it is asked to stop.
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    task_manager.shutdown();
    Ok(())
}
