//! Testing utilities including mock implementations.
//!
//! Useful for exercising the scan pipeline without network or Telegram
//! calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult, NotifyError, NotifyResult};
use crate::listing::{listing_url, ListingFetcher};
use crate::notify::Notifier;

/// A mock fetcher returning canned markup per extension id.
///
/// Clones share state, so tests can keep a handle for assertions after
/// moving the fetcher into a scanner.
#[derive(Clone, Default)]
pub struct MockFetcher {
    /// Predefined markup by extension id
    pages: Arc<RwLock<HashMap<String, String>>>,

    /// Ids that should fail with a fetch error
    failures: Arc<RwLock<HashSet<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve canned markup for an id.
    pub fn with_page(self, extension_id: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(extension_id.into(), html.into());
        self
    }

    /// Make an id fail with a fetch error.
    pub fn with_failure(self, extension_id: impl Into<String>) -> Self {
        self.failures.write().unwrap().insert(extension_id.into());
        self
    }

    /// Ids fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ListingFetcher for MockFetcher {
    async fn fetch_listing(&self, extension_id: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(extension_id.to_string());

        if self.failures.read().unwrap().contains(extension_id) {
            return Err(FetchError::Status {
                status: 503,
                url: listing_url(extension_id),
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(extension_id)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: listing_url(extension_id),
            })
    }
}

/// Notifier that records every delivered body.
#[derive(Default)]
pub struct RecordingNotifier {
    bodies: Arc<RwLock<Vec<String>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier that records the attempt but reports delivery failure.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Bodies delivered (or attempted) so far.
    pub fn bodies(&self) -> Vec<String> {
        self.bodies.read().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, body: &str) -> NotifyResult<()> {
        self.bodies.write().unwrap().push(body.to_string());

        if self.fail {
            return Err(NotifyError::Delivery("mock delivery failure".to_string()));
        }
        Ok(())
    }
}
