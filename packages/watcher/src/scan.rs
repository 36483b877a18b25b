//! Drives one scan: fetch every configured listing, pick out the recent
//! updates, and render the aggregated report.
//!
//! ```text
//! ids ──► fetch ──► extract ──► normalize ──► window check ──► events
//!            (per item, sequential, paced)                └──► report body
//! ```
//!
//! Per-item failures never abort the scan: a failed fetch degrades to an
//! all-absent snapshot and an unparsable date excludes the item from the
//! report. Only the configured id list decides how long the run takes.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::dates::normalize_update_date;
use crate::listing::{extract_snapshot, ListingFetcher};
use crate::pacing;
use crate::report::render_report;
use crate::types::{ListingSnapshot, UpdateEvent};

/// Knobs for one scan run.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Updates at most this many days old make the report.
    pub window_days: i64,
    /// Pacing gap lower bound, seconds.
    pub min_delay_secs: u64,
    /// Pacing gap upper bound, seconds.
    pub max_delay_secs: u64,
}

/// Sequential scan over a fixed id list.
pub struct Scanner<F> {
    fetcher: F,
    options: ScanOptions,
}

impl<F: ListingFetcher> Scanner<F> {
    pub fn new(fetcher: F, options: ScanOptions) -> Self {
        Self { fetcher, options }
    }

    /// Scan every id and build the aggregated report body.
    ///
    /// Returns `None` when nothing updated within the window; a `None` run
    /// must not produce a notification.
    pub async fn run(&self, extension_ids: &[String]) -> Option<String> {
        // One frozen date for every window comparison in this run.
        let today = Utc::now().date_naive();
        self.run_with_date(extension_ids, today).await
    }

    /// Same as [`Scanner::run`] with the comparison date injected.
    pub async fn run_with_date(
        &self,
        extension_ids: &[String],
        today: NaiveDate,
    ) -> Option<String> {
        info!(
            total = extension_ids.len(),
            window_days = self.options.window_days,
            "Scan starting"
        );

        let total = extension_ids.len();
        let mut events: Vec<UpdateEvent> = Vec::new();

        for (index, extension_id) in extension_ids.iter().enumerate() {
            let snapshot = self.snapshot(extension_id).await;

            info!(
                "{} | {} | {} | {}",
                snapshot.name.as_deref().unwrap_or("Unknown"),
                extension_id,
                snapshot.version.as_deref().unwrap_or("Unknown"),
                snapshot.last_updated_raw.as_deref().unwrap_or("Unknown"),
            );

            if let Some(date) = snapshot
                .last_updated_raw
                .as_deref()
                .and_then(normalize_update_date)
            {
                if is_recent(today, date, self.options.window_days) {
                    events.push(UpdateEvent {
                        extension_id: extension_id.clone(),
                        snapshot,
                    });
                }
            }

            // Courtesy gap between consecutive items, never after the last.
            if index + 1 < total {
                pacing::pause(self.options.min_delay_secs, self.options.max_delay_secs).await;
            }
        }

        info!(matched = events.len(), "Scan finished");
        render_report(&events, self.options.window_days)
    }

    /// Fetch + extract one listing; a failed fetch degrades to an
    /// all-absent snapshot so the scan continues.
    async fn snapshot(&self, extension_id: &str) -> ListingSnapshot {
        match self.fetcher.fetch_listing(extension_id).await {
            Ok(html) => extract_snapshot(&html),
            Err(e) => {
                warn!(extension_id = %extension_id, error = %e, "Failed to fetch listing");
                ListingSnapshot::missing()
            }
        }
    }
}

/// Updated within the window, measured against the run's frozen date.
fn is_recent(today: NaiveDate, date: NaiveDate, window_days: i64) -> bool {
    (today - date).num_days() <= window_days
}
