//! Typed errors for the watcher library.
//!
//! Uses `thiserror` for library errors (not `anyhow`); the binary and its
//! configuration loader wrap these with `anyhow` context where needed.

use thiserror::Error;

/// Errors that can occur while fetching a listing page.
///
/// Fetch errors are recoverable by design: the scan loop catches them per
/// item and degrades that item to a fully-absent snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failed before a usable response arrived
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
}

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The delivery channel rejected or never received the message
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for notification delivery.
pub type NotifyResult<T> = std::result::Result<T, NotifyError>;
