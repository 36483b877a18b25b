//! Renders the aggregated update report sent to the notification sink.

use crate::types::UpdateEvent;

const UNKNOWN: &str = "Unknown";

/// Build the Telegram-HTML report body.
///
/// Events render in the order they were collected. Returns `None` for an
/// empty event list so callers cannot send an empty-body notification.
pub fn render_report(events: &[UpdateEvent], window_days: i64) -> Option<String> {
    if events.is_empty() {
        return None;
    }

    let blocks: Vec<String> = events.iter().map(render_event).collect();

    Some(format!(
        "Detected extensions updated in the last {} days:\n\n{}",
        window_days,
        blocks.join("\n\n")
    ))
}

fn render_event(event: &UpdateEvent) -> String {
    let snapshot = &event.snapshot;
    format!(
        "Extension <b>{}</b>\nID: <code>{}</code>\nUpdate Time: {}\nVersion: {}",
        snapshot.name.as_deref().unwrap_or(UNKNOWN),
        event.extension_id,
        snapshot.last_updated_raw.as_deref().unwrap_or(UNKNOWN),
        snapshot.version.as_deref().unwrap_or(UNKNOWN),
    )
}
