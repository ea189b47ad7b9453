use crate::snapshot::{QueueRecord, RecordStatus, Snapshot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// A place snapshots come from. One read attempt per call, no internal
/// retry; the next scheduled cycle is the retry.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<Snapshot>;
}

/// Fetches the snapshot document over HTTP. Sends no-cache headers so each
/// cycle observes the freshest state the source can give.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: &str, request_timeout_ms: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms))
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch(&self) -> Result<Snapshot> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("snapshot request failed: {}", self.url))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("snapshot source returned {}: {}", status, self.url);
        }

        let snapshot: Snapshot = resp
            .json()
            .await
            .context("failed to parse snapshot document")?;

        Ok(snapshot)
    }
}

/// What one acquisition produced: a snapshot that is always renderable, and
/// whether it came from the live source or the embedded fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquired {
    pub snapshot: Snapshot,
    pub is_live: bool,
}

/// Resolve a fetch outcome to something renderable. Transport failures,
/// non-success statuses, and undecodable bodies all land here the same way.
pub fn resolve(result: Result<Snapshot>) -> Acquired {
    match result {
        Ok(snapshot) => Acquired {
            snapshot,
            is_live: true,
        },
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "snapshot fetch failed, using fallback");
            Acquired {
                snapshot: fallback_snapshot().clone(),
                is_live: false,
            }
        }
    }
}

/// Never fails: tries the source, degrades to the fallback snapshot.
pub struct DataProvider {
    source: Box<dyn SnapshotSource>,
}

impl DataProvider {
    pub fn new(source: Box<dyn SnapshotSource>) -> Self {
        Self { source }
    }

    pub async fn acquire(&self) -> Acquired {
        resolve(self.source.fetch().await)
    }
}

fn sample_record(
    order: u32,
    name: &str,
    status: RecordStatus,
    next_run: &str,
    last_run: &str,
    notes: &str,
    rrule: &str,
) -> QueueRecord {
    QueueRecord {
        order,
        name: name.to_string(),
        status,
        next_run: Some(next_run.to_string()),
        last_run: Some(last_run.to_string()),
        notes: Some(notes.to_string()),
        rrule: Some(rrule.to_string()),
    }
}

/// The embedded sample data shown when the source is unreachable or
/// malformed. Built once; every fallback cycle renders the same snapshot.
pub fn fallback_snapshot() -> &'static Snapshot {
    static FALLBACK: OnceLock<Snapshot> = OnceLock::new();
    FALLBACK.get_or_init(|| Snapshot {
        queue: vec![
            sample_record(
                1,
                "Daily News Summary",
                RecordStatus::Running,
                "2026-02-03 07:30",
                "Today 07:10",
                "news_bot.py",
                "FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR,SA,SU;BYHOUR=7;BYMINUTE=30",
            ),
            sample_record(
                2,
                "Generate X Post",
                RecordStatus::Ready,
                "2026-02-03 07:45",
                "Yesterday 20:05",
                "x_post.py",
                "FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR;BYHOUR=7;BYMINUTE=45",
            ),
            sample_record(
                3,
                "Trend Scan",
                RecordStatus::Blocked,
                "2026-02-03 08:15",
                "Yesterday 17:40",
                "news_bot.py",
                "FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR;BYHOUR=8;BYMINUTE=15",
            ),
            sample_record(
                4,
                "Weekly Report",
                RecordStatus::Ready,
                "2026-02-07 16:00",
                "Friday 15:55",
                "reporter.py",
                "FREQ=WEEKLY;BYDAY=FR;BYHOUR=16;BYMINUTE=0",
            ),
        ],
        columns: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ok_is_live() {
        let snap = Snapshot::empty();
        let acquired = resolve(Ok(snap.clone()));
        assert!(acquired.is_live);
        assert_eq!(acquired.snapshot, snap);
    }

    #[test]
    fn test_resolve_err_yields_exact_fallback() {
        let acquired = resolve(Err(anyhow::anyhow!("connection refused")));
        assert!(!acquired.is_live);
        assert_eq!(&acquired.snapshot, fallback_snapshot());
    }

    #[test]
    fn test_fallback_shape() {
        let snap = fallback_snapshot();
        assert_eq!(snap.queue.len(), 4);
        assert!(snap.columns.is_empty());
        assert_eq!(snap.queue[2].status, RecordStatus::Blocked);
    }

    #[tokio::test]
    async fn test_provider_degrades_on_source_error() {
        struct FailingSource;

        #[async_trait]
        impl SnapshotSource for FailingSource {
            async fn fetch(&self) -> Result<Snapshot> {
                anyhow::bail!("503 Service Unavailable")
            }
        }

        let provider = DataProvider::new(Box::new(FailingSource));
        let acquired = provider.acquire().await;
        assert!(!acquired.is_live);
        assert_eq!(&acquired.snapshot, fallback_snapshot());
    }
}
