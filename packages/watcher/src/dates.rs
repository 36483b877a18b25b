//! Normalizes the heterogeneous "Updated" strings found on listing pages.
//!
//! The store renders the update date differently per locale. Detection is
//! marker-based rather than try-every-format: the first marker that matches
//! selects the single format that will be attempted, in this order:
//!
//! 1. English month-name dates: `October 5, 2023`
//! 2. CJK dates: `2023年10月05日`
//! 3. Slash dates: `10/05/2023`
//! 4. Hyphen dates: `2023-10-05`

use chrono::NaiveDate;
use tracing::warn;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Ordered (marker predicate, parser) pairs. First predicate match wins and
/// commits to its parser; new formats slot in without restructuring.
const FORMATS: &[(fn(&str) -> bool, fn(&str) -> Option<NaiveDate>)] = &[
    (has_month_name, parse_month_name),
    (has_cjk_markers, parse_cjk),
    (has_slash, parse_slash),
    (has_hyphen, parse_hyphen),
];

/// Parse a raw update string into a calendar date.
///
/// Returns `None` for empty input, for strings matching no known marker,
/// and for strings whose selected format fails to parse. Data-quality
/// failures are logged, never raised.
pub fn normalize_update_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for (marker_matches, parse) in FORMATS {
        if marker_matches(raw) {
            let parsed = parse(raw);
            if parsed.is_none() {
                warn!(raw = %raw, "Failed to parse update date");
            }
            return parsed;
        }
    }

    warn!(raw = %raw, "Unknown update date format");
    None
}

fn has_month_name(s: &str) -> bool {
    MONTH_NAMES.iter().any(|month| s.contains(month))
}

fn has_cjk_markers(s: &str) -> bool {
    s.contains('年') && s.contains('月') && s.contains('日')
}

fn has_slash(s: &str) -> bool {
    s.contains('/')
}

fn has_hyphen(s: &str) -> bool {
    s.contains('-')
}

fn parse_month_name(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%B %d, %Y").ok()
}

fn parse_cjk(s: &str) -> Option<NaiveDate> {
    let rewritten = s.replace('年', "-").replace('月', "-").replace('日', "");
    NaiveDate::parse_from_str(rewritten.trim(), "%Y-%m-%d").ok()
}

fn parse_slash(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

fn parse_hyphen(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
