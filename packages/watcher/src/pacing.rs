//! Randomized pacing between consecutive listing fetches.
//!
//! A courtesy gap toward the store, not a rate limiter: each gap is an
//! independent uniform draw, and the wait is an async suspension so the
//! scheduler keeps running while a scan sleeps.

use rand::Rng;
use std::time::Duration;

/// Uniform draw from `[min_secs, max_secs]`, millisecond granularity.
pub fn uniform_delay(min_secs: u64, max_secs: u64) -> Duration {
    let mut rng = rand::thread_rng();
    let ms = rng.gen_range((min_secs * 1000)..=(max_secs * 1000));
    Duration::from_millis(ms)
}

/// Sleep for one pacing gap.
pub async fn pause(min_secs: u64, max_secs: u64) {
    tokio::time::sleep(uniform_delay(min_secs, max_secs)).await;
}
