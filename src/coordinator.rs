use crate::provider::DataProvider;
use crate::views::{BoardView, HighlightsView, QueueView, SummaryView, ViewModels};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Presentational output surface, one method per display region. Methods are
/// infallible: whatever the renderer does with a view model, no error comes
/// back into the refresh pipeline.
pub trait Renderer: Send + Sync {
    fn render_queue(&self, view: &QueueView);
    fn render_board(&self, view: &BoardView);
    fn render_highlights(&self, view: &HighlightsView);
    fn render_summary(&self, view: &SummaryView);

    /// Live-vs-fallback indicator. Default no-op so renderers that do not
    /// show it need no change.
    fn render_source_status(&self, _is_live: bool) {}
}

/// Drives the refresh loop: acquire a snapshot, build the four view models,
/// dispatch them in a fixed order. At most one cycle is in flight at a time;
/// a timer tick that lands mid-cycle is dropped, not queued.
pub struct RenderCoordinator {
    provider: DataProvider,
    renderer: Arc<dyn Renderer>,
    interval: Duration,
    refreshing: AtomicBool,
}

impl RenderCoordinator {
    pub fn new(provider: DataProvider, renderer: Arc<dyn Renderer>, interval: Duration) -> Self {
        Self {
            provider,
            renderer,
            interval,
            refreshing: AtomicBool::new(false),
        }
    }

    /// Refresh loop. The first interval tick fires immediately, giving the
    /// eager startup cycle. Returns once `shutdown` flips to true; a cycle
    /// that is mid-flight at that point completes before return, so the four
    /// regions are never left half-updated.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !self.try_refresh().await {
                        tracing::debug!("refresh still in flight, dropping tick");
                    }
                }
                changed = shutdown.changed() => {
                    // A closed channel means the owner is gone; stop too.
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("refresh loop stopped");
                        return;
                    }
                }
            }
        }
    }

    /// Run one cycle unless one is already in flight. Returns false when the
    /// cycle was dropped by the single-flight guard.
    pub async fn try_refresh(&self) -> bool {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        self.refresh_cycle().await;
        self.refreshing.store(false, Ordering::Release);
        true
    }

    /// One complete acquire -> derive -> render pass. Dispatch order is
    /// fixed (queue, board, highlights, summary) for deterministic tests.
    async fn refresh_cycle(&self) {
        let acquired = self.provider.acquire().await;
        let views = ViewModels::build(&acquired.snapshot);

        self.renderer.render_queue(&views.queue);
        self.renderer.render_board(&views.board);
        self.renderer.render_highlights(&views.highlights);
        self.renderer.render_summary(&views.summary);
        self.renderer.render_source_status(acquired.is_live);

        tracing::debug!(
            live = acquired.is_live,
            queued = views.summary.total_queued,
            tasks = views.summary.tasks_total,
            "refresh cycle complete"
        );
    }
}
