mod config;
mod coordinator;
mod provider;
mod snapshot;
mod tui;
mod views;

use anyhow::Result;
use config::Config;
use coordinator::RenderCoordinator;
use provider::{DataProvider, HttpSource};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tui::state::AppState;
use tui::TuiRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal belongs to the TUI, so logs go to a file.
    let log_file = std::fs::File::create("ops-dash.log")?;
    tracing_subscriber::fmt()
        .with_env_filter("ops_dash=debug")
        .with_writer(log_file)
        .init();

    let config = Config::load_or_default(Path::new("config.toml"))?;
    tracing::debug!(url = %config.source.url, interval_s = config.refresh.interval_s, "starting");

    let source = HttpSource::new(&config.source.url, config.source.request_timeout_ms)?;
    let provider = DataProvider::new(Box::new(source));

    let (state_tx, state_rx) = watch::channel(AppState::new());
    let renderer = Arc::new(TuiRenderer::new(state_tx));

    let coordinator = Arc::new(RenderCoordinator::new(
        provider,
        renderer,
        Duration::from_secs(config.refresh.interval_s),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh_task = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.run(shutdown_rx).await })
    };

    // Blocks until the user quits.
    tui::run_tui(state_rx).await?;

    // Stop the timer; an in-flight cycle finishes before the task returns.
    let _ = shutdown_tx.send(true);
    let _ = refresh_task.await;

    tracing::debug!("shutting down");
    Ok(())
}
