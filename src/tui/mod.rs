pub mod render;
pub mod state;

use crate::coordinator::Renderer;
use crate::views::{BoardView, HighlightsView, QueueView, SummaryView};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use state::AppState;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::watch;

/// Publishes view models into the shared TUI state. Each setter replaces one
/// region; the draw loop picks the change up through the watch channel.
pub struct TuiRenderer {
    state_tx: watch::Sender<AppState>,
}

impl TuiRenderer {
    pub fn new(state_tx: watch::Sender<AppState>) -> Self {
        Self { state_tx }
    }
}

impl Renderer for TuiRenderer {
    fn render_queue(&self, view: &QueueView) {
        let view = view.clone();
        self.state_tx.send_modify(|s| s.queue = view);
    }

    fn render_board(&self, view: &BoardView) {
        let view = view.clone();
        self.state_tx.send_modify(|s| s.board = view);
    }

    fn render_highlights(&self, view: &HighlightsView) {
        let view = view.clone();
        self.state_tx.send_modify(|s| s.highlights = view);
    }

    fn render_summary(&self, view: &SummaryView) {
        let view = view.clone();
        self.state_tx.send_modify(|s| {
            s.summary = view;
            s.cycles += 1;
            s.last_refresh = Some(chrono::Local::now().format("%H:%M:%S").to_string());
        });
    }

    fn render_source_status(&self, is_live: bool) {
        self.state_tx.send_modify(|s| s.is_live = is_live);
    }
}

/// Run the TUI. Reads state from `state_rx`; returns when the user quits.
pub async fn run_tui(state_rx: watch::Receiver<AppState>) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state_rx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state_rx: watch::Receiver<AppState>,
) -> Result<()> {
    loop {
        let state = state_rx.borrow().clone();
        terminal.draw(|f| render::draw(f, &state))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Char('q') {
                    return Ok(());
                }
            }
        }

        // Redraw on state change, or after a short wait so the uptime and
        // key handling stay responsive.
        let _ = tokio::time::timeout(Duration::from_millis(200), state_rx.changed()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fallback_snapshot;
    use crate::views::ViewModels;

    #[test]
    fn test_renderer_publishes_all_regions() {
        let (state_tx, state_rx) = watch::channel(AppState::new());
        let renderer = TuiRenderer::new(state_tx);
        let views = ViewModels::build(fallback_snapshot());

        renderer.render_queue(&views.queue);
        renderer.render_board(&views.board);
        renderer.render_highlights(&views.highlights);
        renderer.render_summary(&views.summary);
        renderer.render_source_status(false);

        let state = state_rx.borrow();
        assert_eq!(state.queue.entries.len(), 4);
        assert_eq!(state.highlights.blocked, "Trend Scan");
        assert_eq!(state.summary.total_queued, 4);
        assert_eq!(state.cycles, 1);
        assert!(state.last_refresh.is_some());
        assert!(!state.is_live);
    }
}
