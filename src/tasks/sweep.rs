//! Retention Sweep Task
//!
//! Background task that periodically deletes stale files from the uploads and
//! outputs areas. Fire-and-forget: it has no caller and no result channel,
//! and every per-file failure is logged and skipped.

use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::storage::FileStore;

// == Retention Policy ==
/// Pure value describing how long stored files may live.
///
/// Applied uniformly to both storage areas.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    /// Files whose age exceeds this are reclaimed
    pub max_age: Duration,
}

impl RetentionPolicy {
    /// Creates a policy from a threshold in seconds.
    pub fn from_secs(max_age_secs: u64) -> Self {
        Self {
            max_age: Duration::from_secs(max_age_secs),
        }
    }
}

/// Duration until the next wall-clock boundary of the cadence. For a cadence
/// of 3600 this is the time remaining until the top of the next hour, so the
/// sweep fires hourly-on-the-hour regardless of when the process started.
pub fn delay_until_next_sweep(now: DateTime<Utc>, cadence_secs: u64) -> Duration {
    let cadence = cadence_secs.max(1);
    let epoch = now.timestamp().max(0) as u64;
    Duration::from_secs(cadence - epoch % cadence)
}

/// Spawns the background sweep task.
///
/// The task runs for the lifetime of the process, sleeping until each
/// wall-clock cadence boundary and then sweeping both storage areas.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(
    store: FileStore,
    policy: RetentionPolicy,
    cadence_secs: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting retention sweep task: cadence {}s, max age {}s",
            cadence_secs,
            policy.max_age.as_secs()
        );

        loop {
            // Recomputed each cycle so the schedule self-corrects after a
            // slow sweep
            let delay = delay_until_next_sweep(Utc::now(), cadence_secs);
            tokio::time::sleep(delay).await;

            let removed = sweep_dir(store.upload_dir(), policy.max_age).await
                + sweep_dir(store.output_dir(), policy.max_age).await;

            if removed > 0 {
                info!("Retention sweep removed {} stale file(s)", removed);
            } else {
                debug!("Retention sweep found no stale files");
            }
        }
    })
}

/// Sweeps one directory, deleting every file older than `max_age`.
///
/// Best-effort: enumeration, stat and delete failures are logged and the
/// sweep continues with the remaining files. Returns the number of files
/// actually deleted.
pub async fn sweep_dir(dir: &Path, max_age: Duration) -> usize {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read {}: {}", dir.display(), e);
            return 0;
        }
    };

    let now = SystemTime::now();
    let mut removed = 0;

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to enumerate {}: {}", dir.display(), e);
                break;
            }
        };

        let path = entry.path();
        let modified = match entry.metadata().await.and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                warn!("Failed to stat {}: {}", path.display(), e);
                continue;
            }
        };

        // A file with an mtime in the future has age zero, never stale
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age <= max_age {
            continue;
        }

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted stale file {}", path.display());
                removed += 1;
            }
            // The file may have been consumed by a request meanwhile
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Stale file {} already gone", path.display());
            }
            Err(e) => warn!("Failed to delete {}: {}", path.display(), e),
        }
    }

    removed
}
