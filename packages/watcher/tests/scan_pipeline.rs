//! Integration tests for the scan pipeline over mock collaborators.
//!
//! These exercise the full path: fetch → extract → normalize → window
//! filter → report rendering → notification, with canned markup instead of
//! the live store and a recording sink instead of Telegram.

use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;
use watcher::{
    testing::{MockFetcher, RecordingNotifier},
    ScanJob, ScanOptions, Scanner,
};

/// Canned listing page in the shape the extractor expects.
fn listing_html(name: &str, version: &str, updated: &str) -> String {
    format!(
        r#"
        <html><body>
        <main>
          <section>
            <h1>{name}</h1>
            <section>
              <ul>
                <li><div>Version</div><div>{version}</div></li>
                <li><div>Updated</div><div>{updated}</div></li>
              </ul>
            </section>
          </section>
        </main>
        </body></html>
        "#
    )
}

fn options() -> ScanOptions {
    ScanOptions {
        window_days: 7,
        min_delay_secs: 0,
        max_delay_secs: 0,
    }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

/// A hyphen-format date N days before the real current date, for tests
/// that go through `Scanner::run` (which freezes its own "today").
fn days_ago(days: i64) -> String {
    (Utc::now().date_naive() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

#[tokio::test]
async fn test_recent_update_is_reported() {
    let fetcher = MockFetcher::new().with_page(
        "aaa",
        listing_html("Dark Reader", "4.9.80", "2024-01-04"),
    );
    let scanner = Scanner::new(fetcher, options());

    let body = scanner
        .run_with_date(&ids(&["aaa"]), fixed_today())
        .await
        .unwrap();

    assert!(body.starts_with("Detected extensions updated in the last 7 days:"));
    assert!(body.contains("Extension <b>Dark Reader</b>"));
    assert!(body.contains("ID: <code>aaa</code>"));
    assert!(body.contains("Version: 4.9.80"));
}

#[tokio::test]
async fn test_stale_update_is_excluded() {
    let fetcher = MockFetcher::new().with_page(
        "aaa",
        listing_html("Dark Reader", "4.9.80", "2023-12-30"),
    );
    let scanner = Scanner::new(fetcher, options());

    let report = scanner.run_with_date(&ids(&["aaa"]), fixed_today()).await;

    assert_eq!(report, None);
}

#[tokio::test]
async fn test_mixed_batch_preserves_input_order() {
    let fetcher = MockFetcher::new()
        .with_page("aaa", listing_html("First", "1.0", "2024-01-04"))
        .with_page("bbb", listing_html("Stale", "0.1", "2023-01-01"))
        .with_page("ccc", listing_html("Second", "2.0", "January 9, 2024"));
    let scanner = Scanner::new(fetcher, options());

    let body = scanner
        .run_with_date(&ids(&["aaa", "bbb", "ccc"]), fixed_today())
        .await
        .unwrap();

    assert_eq!(body.matches("Extension <b>").count(), 2);
    assert!(!body.contains("Stale"));
    let first = body.find("First").unwrap();
    let second = body.find("Second").unwrap();
    assert!(first < second);
}

#[tokio::test]
async fn test_fetch_failure_does_not_abort_the_run() {
    let fetcher = MockFetcher::new()
        .with_failure("broken")
        .with_page("aaa", listing_html("Survivor", "1.0", "2024-01-09"));
    let scanner = Scanner::new(fetcher, options());

    let body = scanner
        .run_with_date(&ids(&["broken", "aaa"]), fixed_today())
        .await
        .unwrap();

    assert!(body.contains("Survivor"));
    assert!(!body.contains("broken"));
}

#[tokio::test]
async fn test_every_id_is_fetched_in_input_order() {
    let fetcher = MockFetcher::new()
        .with_page("aaa", listing_html("A", "1.0", "2024-01-04"))
        .with_failure("bbb")
        .with_page("ccc", listing_html("C", "3.0", "2024-01-04"));
    let handle = fetcher.clone();
    let scanner = Scanner::new(fetcher, options());

    let _ = scanner
        .run_with_date(&ids(&["aaa", "bbb", "ccc"]), fixed_today())
        .await;

    assert_eq!(handle.calls(), vec!["aaa", "bbb", "ccc"]);
}

#[tokio::test]
async fn test_unparsable_date_is_excluded() {
    let fetcher = MockFetcher::new().with_page(
        "aaa",
        listing_html("Garbled", "1.0", "sometime last week"),
    );
    let scanner = Scanner::new(fetcher, options());

    let report = scanner.run_with_date(&ids(&["aaa"]), fixed_today()).await;

    assert_eq!(report, None);
}

#[tokio::test]
async fn test_missing_fields_render_unknown() {
    // Page with the details list but no heading
    let html = r#"
        <main><section><section>
          <ul>
            <li><div>Version</div><div></div></li>
            <li><div>Updated</div><div>2024-01-09</div></li>
          </ul>
        </section></section></main>
    "#;
    let fetcher = MockFetcher::new().with_page("aaa", html);
    let scanner = Scanner::new(fetcher, options());

    let body = scanner
        .run_with_date(&ids(&["aaa"]), fixed_today())
        .await
        .unwrap();

    assert!(body.contains("Extension <b>Unknown</b>"));
    assert!(body.contains("Version: Unknown"));
}

#[tokio::test]
async fn test_trigger_sends_one_message_for_matches() {
    let fetcher = MockFetcher::new()
        .with_page("aaa", listing_html("Fresh", "1.0", &days_ago(2)))
        .with_page("bbb", listing_html("Fresher", "2.0", &days_ago(0)));
    let notifier = Arc::new(RecordingNotifier::new());
    let job = ScanJob::new(
        Scanner::new(fetcher, options()),
        notifier.clone(),
        ids(&["aaa", "bbb"]),
    );

    job.trigger().await;

    let bodies = notifier.bodies();
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].contains("Fresh"));
    assert!(bodies[0].contains("Fresher"));
}

#[tokio::test]
async fn test_trigger_never_notifies_without_matches() {
    let fetcher = MockFetcher::new()
        .with_page("aaa", listing_html("Old", "1.0", &days_ago(400)))
        .with_failure("bbb");
    let notifier = Arc::new(RecordingNotifier::new());
    let job = ScanJob::new(
        Scanner::new(fetcher, options()),
        notifier.clone(),
        ids(&["aaa", "bbb"]),
    );

    job.trigger().await;

    assert!(notifier.bodies().is_empty());
}

#[tokio::test]
async fn test_delivery_failure_does_not_panic_the_run() {
    let fetcher = MockFetcher::new()
        .with_page("aaa", listing_html("Fresh", "1.0", &days_ago(1)));
    let notifier = Arc::new(RecordingNotifier::failing());
    let job = ScanJob::new(
        Scanner::new(fetcher, options()),
        notifier.clone(),
        ids(&["aaa"]),
    );

    job.trigger().await;

    // The attempt happened; the failure was logged and swallowed
    assert_eq!(notifier.bodies().len(), 1);
}
