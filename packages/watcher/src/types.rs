//! Data types shared across the scan pipeline.

use serde::{Deserialize, Serialize};

/// The three fields scraped from one listing page.
///
/// Every field is independently optional: the store reshuffles its markup
/// without notice, and a lookup that no longer matches yields `None` for
/// that field instead of failing the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSnapshot {
    pub name: Option<String>,
    pub version: Option<String>,
    pub last_updated_raw: Option<String>,
}

impl ListingSnapshot {
    /// Snapshot with every field absent, substituted when the fetch itself
    /// failed.
    pub fn missing() -> Self {
        Self::default()
    }

    /// True when no field was extracted.
    pub fn is_missing(&self) -> bool {
        self.name.is_none() && self.version.is_none() && self.last_updated_raw.is_none()
    }
}

/// One extension that updated within the recency window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEvent {
    pub extension_id: String,
    pub snapshot: ListingSnapshot,
}
