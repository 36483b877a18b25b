//! Fetches listing pages and extracts the fields the report needs.
//!
//! The Chrome Web Store serves one detail page per extension id. Three
//! fixed CSS lookups pull the display name, the version value, and the
//! "Updated" value out of that page. The store's markup changes without
//! notice, so every lookup resolves to value-or-absent and all three
//! selectors live here, behind [`extract_snapshot`].

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::types::ListingSnapshot;

/// Browser-like User-Agent; the store rejects obvious bot clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Detail page URL for one extension id.
pub fn listing_url(extension_id: &str) -> String {
    format!("https://chromewebstore.google.com/detail/{}", extension_id)
}

/// Fetches the raw markup of one listing page.
///
/// The scan loop only ever talks to this trait, so tests swap in canned
/// markup and the HTTP layer stays out of the pipeline logic.
#[async_trait]
pub trait ListingFetcher: Send + Sync {
    async fn fetch_listing(&self, extension_id: &str) -> FetchResult<String>;
}

/// HTTP fetcher used in production.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingFetcher for HttpFetcher {
    async fn fetch_listing(&self, extension_id: &str) -> FetchResult<String> {
        let url = listing_url(extension_id);
        debug!(url = %url, "Fetching listing page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))
    }
}

// Fixed lookup paths into the detail page. The heading is the display name;
// the details list holds label/value rows with version first, update time
// second.
const NAME_SELECTOR: &str = "main section h1";
const VERSION_SELECTOR: &str = "main section ul > li:nth-child(1) > div:nth-child(2)";
const UPDATED_SELECTOR: &str = "main section ul > li:nth-child(2) > div:nth-child(2)";

/// Extract the three report fields from listing page markup.
///
/// Each lookup is independent: a selector that matches nothing yields an
/// absent field, never an error.
pub fn extract_snapshot(html: &str) -> ListingSnapshot {
    let document = Html::parse_document(html);

    ListingSnapshot {
        name: select_text(&document, NAME_SELECTOR),
        version: select_text(&document, VERSION_SELECTOR),
        last_updated_raw: select_text(&document, UPDATED_SELECTOR),
    }
}

/// First matching node's text, trimmed; `None` when nothing matches.
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}
