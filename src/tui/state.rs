use crate::views::{BoardView, HighlightsView, QueueView, SummaryView, TeamLoad};
use std::time::Instant;

/// Everything the terminal draws: the four current view models plus a little
/// session bookkeeping. Published whole through a watch channel; the draw
/// loop only ever sees a complete state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub queue: QueueView,
    pub board: BoardView,
    pub highlights: HighlightsView,
    pub summary: SummaryView,
    pub is_live: bool,
    pub cycles: u64,
    pub last_refresh: Option<String>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            queue: QueueView {
                entries: Vec::new(),
            },
            board: BoardView {
                columns: Vec::new(),
            },
            highlights: HighlightsView {
                next_automation: "Unknown".to_string(),
                blocked: "None".to_string(),
                in_progress_tasks: 0,
            },
            summary: SummaryView {
                total_queued: 0,
                ready: 0,
                tasks_total: 0,
                load: TeamLoad::Stable,
            },
            is_live: false,
            cycles: 0,
            last_refresh: None,
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        format!("{}h {:02}m", h, m)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
