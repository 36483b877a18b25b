//! Daily scan schedule using tokio-cron-scheduler.
//!
//! One cron job built from the configured HH:MM. Every trigger goes
//! through [`ScanJob::trigger`], which holds a try-lock guard so a scan
//! still in flight makes the next trigger skip instead of overlapping it
//! (the sink must never see interleaved partial reports).

use anyhow::Result;
use chrono::{NaiveTime, Timelike};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};

use crate::listing::ListingFetcher;
use crate::notify::{deliver_report, Notifier};
use crate::scan::Scanner;

/// Everything one trigger needs: the scanner, the sink, and the id list.
pub struct ScanJob<F> {
    scanner: Scanner<F>,
    notifier: Arc<dyn Notifier>,
    extension_ids: Vec<String>,
    guard: Mutex<()>,
}

impl<F: ListingFetcher> ScanJob<F> {
    pub fn new(scanner: Scanner<F>, notifier: Arc<dyn Notifier>, extension_ids: Vec<String>) -> Self {
        Self {
            scanner,
            notifier,
            extension_ids,
            guard: Mutex::new(()),
        }
    }

    /// Run one scan unless another is still in flight.
    pub async fn trigger(&self) {
        let Ok(_running) = self.guard.try_lock() else {
            warn!("Previous scan still running, skipping this trigger");
            return;
        };

        match self.scanner.run(&self.extension_ids).await {
            Some(body) => deliver_report(self.notifier.as_ref(), &body).await,
            None => info!("No recent updates, nothing to send"),
        }
    }
}

/// Start the daily schedule
pub async fn start_scheduler<F>(job: Arc<ScanJob<F>>, check_time: NaiveTime) -> Result<JobScheduler>
where
    F: ListingFetcher + 'static,
{
    let scheduler = JobScheduler::new().await?;

    let cron = format!("0 {} {} * * *", check_time.minute(), check_time.hour());
    let scan_job = job.clone();
    let daily = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let job = scan_job.clone();
        Box::pin(async move {
            job.trigger().await;
        })
    })?;

    scheduler.add(daily).await?;
    scheduler.start().await?;

    info!(at = %check_time.format("%H:%M"), "Daily scan scheduled");
    Ok(scheduler)
}
