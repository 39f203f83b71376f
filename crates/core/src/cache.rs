use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::error::FetchError;
use crate::fetcher::PageSource;
use crate::monitoring;

/// Default revalidation window for the catalog page (1 hour)
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Raw catalog markup with the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub body: Arc<str>,
    pub fetched_at: Instant,
    pub ttl: Duration,
}

impl CachedPage {
    pub fn new(body: impl Into<Arc<str>>, ttl: Duration) -> Self {
        Self {
            body: body.into(),
            fetched_at: Instant::now(),
            ttl,
        }
    }

    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    pub fn is_expired(&self) -> bool {
        self.age() >= self.ttl
    }

    pub fn remaining_ttl(&self) -> Duration {
        self.ttl.saturating_sub(self.age())
    }
}

/// Time-boxed cache for one page, shared across requests.
///
/// The slot lock is held for the whole refresh, so concurrent callers that all
/// see a stale entry trigger a single fetch; the rest wait and read its result.
/// Failed fetches leave the slot untouched.
#[derive(Debug)]
pub struct PageCache {
    kind: &'static str,
    url: String,
    ttl: Duration,
    slot: Mutex<Option<CachedPage>>,
}

impl PageCache {
    pub fn new(url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            kind: "page",
            url: url.into(),
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Label used for this cache's fetch metrics, e.g. "catalog".
    pub fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = kind;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current entry if present and fresh, without fetching.
    pub async fn peek(&self) -> Option<CachedPage> {
        self.slot
            .lock()
            .await
            .as_ref()
            .filter(|p| !p.is_expired())
            .cloned()
    }

    #[instrument(skip(self, source), fields(kind = self.kind, url = %self.url))]
    pub async fn get_or_refresh(&self, source: &dyn PageSource) -> Result<Arc<str>, FetchError> {
        let mut slot = self.slot.lock().await;
        if let Some(page) = slot.as_ref().filter(|p| !p.is_expired()) {
            debug!(
                age_seconds = page.age().as_secs(),
                remaining_seconds = page.remaining_ttl().as_secs(),
                "Cache hit"
            );
            monitoring::record_cache(true);
            return Ok(Arc::clone(&page.body));
        }

        monitoring::record_cache(false);
        let fetched = source.fetch(&self.url).await;
        monitoring::record_fetch(self.kind, fetched.is_ok());
        let body = fetched?;
        let page = CachedPage::new(body, self.ttl);
        info!(
            html_len = page.body.len(),
            ttl_seconds = self.ttl.as_secs(),
            "Refreshed cached page"
        );
        let out = Arc::clone(&page.body);
        *slot = Some(page);
        Ok(out)
    }

    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }
}
