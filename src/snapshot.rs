use serde::Deserialize;

/// One refresh cycle's worth of truth: the automation queue plus the kanban
/// board, exactly as the source document describes them. Constructed fresh
/// each cycle and discarded at cycle end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub queue: Vec<QueueRecord>,
    #[serde(default)]
    pub columns: Vec<BoardColumn>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            queue: Vec::new(),
            columns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueueRecord {
    /// Display rank. Not required to be contiguous or to match sequence
    /// position; "next automation" is sequence position, not rank.
    pub order: u32,
    pub name: String,
    pub status: RecordStatus,
    #[serde(default)]
    pub next_run: Option<String>,
    #[serde(default)]
    pub last_run: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rrule: Option<String>,
}

/// Queue record status. Unrecognized values are carried through in `Other`
/// so they can still render with a generic label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum RecordStatus {
    Ready,
    Running,
    Blocked,
    Other(String),
}

impl From<String> for RecordStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "ready" => RecordStatus::Ready,
            "running" => RecordStatus::Running,
            "blocked" => RecordStatus::Blocked,
            _ => RecordStatus::Other(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardColumn {
    #[serde(rename = "column")]
    pub name: String,
    #[serde(default)]
    pub items: Vec<BoardItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardItem {
    pub title: String,
    pub tag: String,
    pub owner: String,
    pub due: String,
}
