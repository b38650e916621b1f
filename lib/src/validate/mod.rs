//! Concurrent link validation.
//!
//! One producer reads `(id, url)` rows from the store and hands each to a fixed
//! set of probe workers over a rendezvous channel, so it blocks until a worker is
//! idle. Every worker sends one result per row on a shared channel. A single
//! consumer drains that channel and keeps the counts. Nothing touches the store
//! until every probe has finished; the outcomes are then written in one short
//! transaction, so a run is all-or-nothing.

pub mod probe;
pub mod report;

pub use probe::{HttpProber, Probe, ProbeOutcome};
pub use report::ValidationReport;

use crate::config::Config;
use crate::db::BookmarkDb;
use crate::error::{BookmarkError, Result};
use crate::models::StatusUpdate;
use std::path::PathBuf;
use std::sync::mpsc::{channel, sync_channel, Receiver};
use std::sync::{Mutex, PoisonError};
use std::thread;

/// Either a probed row or the reason a row could not be read
type RowResult = std::result::Result<StatusUpdate, String>;

#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Maximum number of probes in flight
    pub workers: usize,
    /// Where to write the summary once updates are committed
    pub report_path: Option<PathBuf>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ValidateOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            workers: config.workers,
            report_path: Some(config.report_path.clone()),
        }
    }
}

/// Probe every stored bookmark and persist the outcomes atomically.
///
/// `on_result` is called from the consumer thread once per probed row, in
/// completion order. If any row cannot be read the run is aborted and the store
/// is left unchanged.
pub fn validate_bookmarks<P, F>(
    db: &BookmarkDb,
    prober: &P,
    options: &ValidateOptions,
    on_result: F,
) -> Result<ValidationReport>
where
    P: Probe + ?Sized,
    F: Fn(&StatusUpdate) + Sync,
{
    let (updates, report) =
        db.with_urls(|rows| run_probes(rows, prober, options.workers, &on_result))??;

    let applied = db.update_status_batch(&updates)?;
    log::info!(
        "Validated {} bookmark(s): {} valid, {} dead, {} redirect(s)",
        applied,
        report.valid,
        report.dead,
        report.redirects
    );

    if let Some(path) = &options.report_path {
        report.write_to_path(path)?;
        log::info!("Validation report written to {}", path.display());
    }

    Ok(report)
}

fn run_probes<P, F>(
    rows: &mut dyn Iterator<Item = rusqlite::Result<(usize, String)>>,
    prober: &P,
    workers: usize,
    on_result: &F,
) -> Result<(Vec<StatusUpdate>, ValidationReport)>
where
    P: Probe + ?Sized,
    F: Fn(&StatusUpdate) + Sync,
{
    // Zero capacity: a send completes only when an idle worker takes the job
    let (job_tx, job_rx) = sync_channel::<(usize, String)>(0);
    let job_rx = Mutex::new(job_rx);
    let (result_tx, result_rx) = channel::<RowResult>();

    thread::scope(|s| {
        let consumer = s.spawn(move || collect_results(result_rx, on_result));

        for _ in 0..workers.max(1) {
            let job_rx = &job_rx;
            let tx = result_tx.clone();
            s.spawn(move || loop {
                let job = {
                    let lock = job_rx.lock().unwrap_or_else(PoisonError::into_inner);
                    lock.recv()
                };
                let Ok((id, url)) = job else {
                    break; // Producer finished
                };
                let update = prober.probe(&url).into_update(id);
                if tx.send(Ok(update)).is_err() {
                    break;
                }
            });
        }

        for row in rows {
            match row {
                Ok(job) => {
                    if job_tx.send(job).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::error!("Failed to read bookmark row: {}", e);
                    // Only fails if the consumer is gone, which join reports below
                    let _ = result_tx.send(Err(e.to_string()));
                    break;
                }
            }
        }

        // Workers exit once the job channel is closed and drained; the result
        // channel closes when the last worker drops its sender.
        drop(job_tx);
        drop(result_tx);

        consumer
            .join()
            .unwrap_or_else(|_| Err(BookmarkError::Other("result collector panicked".into())))
    })
}

fn collect_results<F>(
    results: Receiver<RowResult>,
    on_result: &F,
) -> Result<(Vec<StatusUpdate>, ValidationReport)>
where
    F: Fn(&StatusUpdate),
{
    let mut report = ValidationReport::default();
    let mut updates = Vec::new();
    let mut failure = None;

    for result in results {
        match result {
            Ok(update) if failure.is_none() => {
                report.record(&update);
                on_result(&update);
                updates.push(update);
            }
            // Keep draining so in-flight probes can finish
            Ok(_) => {}
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
    }

    match failure {
        Some(e) => Err(BookmarkError::ValidationScan(e)),
        None => Ok((updates, report)),
    }
}
