//! Runs filesystem jobs off the UI thread.
//!
//! Each job runs on tokio's blocking pool; its outcome comes back to the
//! main loop over an unbounded channel and is handed to the controller
//! there, so state is still only touched from one place.

use std::path::PathBuf;

use skiff_core::{CoreResult, FsJob};
use tokio::sync::mpsc::UnboundedSender;

/// Outcome of a background job.
#[derive(Debug)]
pub struct JobMessage {
    pub job: FsJob,
    pub result: CoreResult<Option<PathBuf>>,
}

/// Spawns `job` on the blocking pool. Exactly one [`JobMessage`] is sent
/// back when it finishes.
pub fn spawn_job(job: FsJob, tx: UnboundedSender<JobMessage>) {
    tracing::debug!(job = %job.describe(), "job started");
    tokio::task::spawn_blocking(move || {
        let result = job.run();
        let _ = tx.send(JobMessage { job, result });
    });
}
