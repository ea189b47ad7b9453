use crate::snapshot::{BoardItem, RecordStatus, Snapshot};

/// Display-ready derivations of one snapshot. Pure and total: every
/// snapshot, including an empty one, builds four complete view models.

#[derive(Debug, Clone, PartialEq)]
pub struct QueueView {
    pub entries: Vec<QueueEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    pub order: u32,
    pub name: String,
    pub status: RecordStatus,
    pub status_label: String,
    pub action_hint: String,
    pub next_run: String,
    pub notes: String,
    pub rrule: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub name: String,
    pub item_count: usize,
    pub items: Vec<BoardItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightsView {
    /// First queue record as "name next_run", or "Unknown" when the queue
    /// is empty.
    pub next_automation: String,
    /// Name of the first blocked record, or "None".
    pub blocked: String,
    /// Item count of the first column whose name contains "progress"
    /// (case-insensitive); 0 when no column matches.
    pub in_progress_tasks: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamLoad {
    High,
    Stable,
}

impl TeamLoad {
    pub fn label(&self) -> &'static str {
        match self {
            TeamLoad::High => "High",
            TeamLoad::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub total_queued: usize,
    pub ready: usize,
    pub tasks_total: usize,
    pub load: TeamLoad,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModels {
    pub queue: QueueView,
    pub board: BoardView,
    pub highlights: HighlightsView,
    pub summary: SummaryView,
}

/// Ready records at or above this count flip the load indicator to High.
const HIGH_LOAD_READY_THRESHOLD: usize = 3;

/// Columns whose name contains this token (case-insensitive) count as the
/// in-progress column.
const IN_PROGRESS_TOKEN: &str = "progress";

pub fn status_label(status: &RecordStatus) -> String {
    match status {
        RecordStatus::Ready => "Ready".to_string(),
        RecordStatus::Running => "Running".to_string(),
        RecordStatus::Blocked => "Blocked".to_string(),
        RecordStatus::Other(_) => "Unknown".to_string(),
    }
}

fn action_hint(status: &RecordStatus) -> &'static str {
    match status {
        RecordStatus::Blocked => "Requires input",
        _ => "Pending",
    }
}

pub fn build_queue_view(snapshot: &Snapshot) -> QueueView {
    let entries = snapshot
        .queue
        .iter()
        .map(|rec| QueueEntry {
            order: rec.order,
            name: rec.name.clone(),
            status: rec.status.clone(),
            status_label: status_label(&rec.status),
            action_hint: action_hint(&rec.status).to_string(),
            next_run: rec.next_run.clone().unwrap_or_else(|| "Unknown".to_string()),
            notes: rec.notes.clone().unwrap_or_default(),
            rrule: rec.rrule.clone().unwrap_or_default(),
        })
        .collect();
    QueueView { entries }
}

pub fn build_board_view(snapshot: &Snapshot) -> BoardView {
    let columns = snapshot
        .columns
        .iter()
        .map(|col| ColumnView {
            name: col.name.clone(),
            item_count: col.items.len(),
            items: col.items.clone(),
        })
        .collect();
    BoardView { columns }
}

pub fn build_highlights_view(snapshot: &Snapshot) -> HighlightsView {
    let next_automation = match snapshot.queue.first() {
        Some(rec) => match &rec.next_run {
            Some(next) => format!("{} {}", rec.name, next),
            None => rec.name.clone(),
        },
        None => "Unknown".to_string(),
    };

    let blocked = snapshot
        .queue
        .iter()
        .find(|rec| rec.status == RecordStatus::Blocked)
        .map(|rec| rec.name.clone())
        .unwrap_or_else(|| "None".to_string());

    let in_progress_tasks = snapshot
        .columns
        .iter()
        .find(|col| col.name.to_lowercase().contains(IN_PROGRESS_TOKEN))
        .map(|col| col.items.len())
        .unwrap_or(0);

    HighlightsView {
        next_automation,
        blocked,
        in_progress_tasks,
    }
}

pub fn build_summary_view(snapshot: &Snapshot) -> SummaryView {
    let ready = snapshot
        .queue
        .iter()
        .filter(|rec| rec.status == RecordStatus::Ready)
        .count();
    let tasks_total = snapshot.columns.iter().map(|col| col.items.len()).sum();

    let load = if ready >= HIGH_LOAD_READY_THRESHOLD {
        TeamLoad::High
    } else {
        TeamLoad::Stable
    };

    SummaryView {
        total_queued: snapshot.queue.len(),
        ready,
        tasks_total,
        load,
    }
}

impl ViewModels {
    pub fn build(snapshot: &Snapshot) -> Self {
        Self {
            queue: build_queue_view(snapshot),
            board: build_board_view(snapshot),
            highlights: build_highlights_view(snapshot),
            summary: build_summary_view(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BoardColumn, QueueRecord};

    fn record(order: u32, name: &str, status: RecordStatus) -> QueueRecord {
        QueueRecord {
            order,
            name: name.to_string(),
            status,
            next_run: Some(format!("2026-02-0{} 08:00", order)),
            last_run: None,
            notes: None,
            rrule: None,
        }
    }

    fn column(name: &str, item_count: usize) -> BoardColumn {
        BoardColumn {
            name: name.to_string(),
            items: (0..item_count)
                .map(|i| BoardItem {
                    title: format!("task {}", i),
                    tag: "ops".to_string(),
                    owner: "JG".to_string(),
                    due: "Friday".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_queue_view_preserves_order_and_length() {
        let snap = Snapshot {
            queue: vec![
                record(7, "C", RecordStatus::Ready),
                record(1, "A", RecordStatus::Running),
                record(4, "B", RecordStatus::Blocked),
            ],
            columns: vec![],
        };
        let view = build_queue_view(&snap);
        assert_eq!(view.entries.len(), 3);
        let names: Vec<&str> = view.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        // Display rank is carried through, not re-sorted by.
        assert_eq!(view.entries[0].order, 7);
    }

    #[test]
    fn test_queue_view_labels_and_hints() {
        let snap = Snapshot {
            queue: vec![
                record(1, "A", RecordStatus::Blocked),
                record(2, "B", RecordStatus::Ready),
                record(3, "C", RecordStatus::Other("paused".to_string())),
            ],
            columns: vec![],
        };
        let view = build_queue_view(&snap);
        assert_eq!(view.entries[0].status_label, "Blocked");
        assert_eq!(view.entries[0].action_hint, "Requires input");
        assert_eq!(view.entries[1].action_hint, "Pending");
        assert_eq!(view.entries[2].status_label, "Unknown");
        assert_eq!(view.entries[2].action_hint, "Pending");
    }

    #[test]
    fn test_queue_view_fills_placeholders() {
        let snap = Snapshot {
            queue: vec![QueueRecord {
                order: 1,
                name: "A".to_string(),
                status: RecordStatus::Ready,
                next_run: None,
                last_run: None,
                notes: None,
                rrule: None,
            }],
            columns: vec![],
        };
        let view = build_queue_view(&snap);
        assert_eq!(view.entries[0].next_run, "Unknown");
        assert_eq!(view.entries[0].notes, "");
    }

    #[test]
    fn test_board_view_counts_items() {
        let snap = Snapshot {
            queue: vec![],
            columns: vec![column("Backlog", 5), column("Done", 0)],
        };
        let view = build_board_view(&snap);
        assert_eq!(view.columns.len(), 2);
        assert_eq!(view.columns[0].item_count, 5);
        assert_eq!(view.columns[1].item_count, 0);
    }

    #[test]
    fn test_highlights_blocked_picks_first_match() {
        let snap = Snapshot {
            queue: vec![
                record(1, "A", RecordStatus::Ready),
                record(2, "B", RecordStatus::Blocked),
                record(3, "C", RecordStatus::Blocked),
            ],
            columns: vec![],
        };
        let view = build_highlights_view(&snap);
        assert_eq!(view.blocked, "B");
    }

    #[test]
    fn test_highlights_next_is_first_record() {
        let snap = Snapshot {
            queue: vec![
                record(9, "First", RecordStatus::Running),
                record(1, "Second", RecordStatus::Ready),
            ],
            columns: vec![],
        };
        let view = build_highlights_view(&snap);
        assert_eq!(view.next_automation, "First 2026-02-09 08:00");
    }

    #[test]
    fn test_highlights_in_progress_matches_case_insensitively() {
        let snap = Snapshot {
            queue: vec![],
            columns: vec![
                column("Backlog", 5),
                column("IN PROGRESS", 2),
                column("Done", 1),
            ],
        };
        let view = build_highlights_view(&snap);
        assert_eq!(view.in_progress_tasks, 2);
    }

    #[test]
    fn test_highlights_in_progress_picks_first_matching_column() {
        let snap = Snapshot {
            queue: vec![],
            columns: vec![column("In Progress", 3), column("Progress (review)", 8)],
        };
        let view = build_highlights_view(&snap);
        assert_eq!(view.in_progress_tasks, 3);
    }

    #[test]
    fn test_empty_snapshot_is_safe() {
        let snap = Snapshot::empty();
        let views = ViewModels::build(&snap);
        assert!(views.queue.entries.is_empty());
        assert!(views.board.columns.is_empty());
        assert_eq!(views.highlights.next_automation, "Unknown");
        assert_eq!(views.highlights.blocked, "None");
        assert_eq!(views.highlights.in_progress_tasks, 0);
        assert_eq!(views.summary.total_queued, 0);
        assert_eq!(views.summary.ready, 0);
        assert_eq!(views.summary.tasks_total, 0);
        assert_eq!(views.summary.load, TeamLoad::Stable);
    }

    #[test]
    fn test_load_threshold_boundary_at_three() {
        let two_ready = Snapshot {
            queue: vec![
                record(1, "A", RecordStatus::Ready),
                record(2, "B", RecordStatus::Ready),
                record(3, "C", RecordStatus::Running),
            ],
            columns: vec![],
        };
        assert_eq!(build_summary_view(&two_ready).load, TeamLoad::Stable);

        let three_ready = Snapshot {
            queue: vec![
                record(1, "A", RecordStatus::Ready),
                record(2, "B", RecordStatus::Ready),
                record(3, "C", RecordStatus::Ready),
            ],
            columns: vec![],
        };
        let summary = build_summary_view(&three_ready);
        assert_eq!(summary.ready, 3);
        assert_eq!(summary.load, TeamLoad::High);
    }

    #[test]
    fn test_summary_totals() {
        let snap = Snapshot {
            queue: vec![
                record(1, "A", RecordStatus::Ready),
                record(2, "B", RecordStatus::Blocked),
            ],
            columns: vec![column("Backlog", 4), column("In Progress", 2)],
        };
        let summary = build_summary_view(&snap);
        assert_eq!(summary.total_queued, 2);
        assert_eq!(summary.ready, 1);
        assert_eq!(summary.tasks_total, 6);
    }
}
