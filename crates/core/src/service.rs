//! Request-level operations: score a profile, list active games.
//!
//! Everything here is request scoped except the catalog page cache, which is
//! shared and read-only once populated.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::badges::extract_badges;
use crate::cache::PageCache;
use crate::catalog::extract_catalog;
use crate::classify::classify_all;
use crate::config::AppConfig;
use crate::document::Document;
use crate::error::{FetchError, ServiceError};
use crate::fetcher::{HttpPageSource, PageSource};
use crate::matcher::annotate;
use crate::models::{Badge, CatalogEntry, GameStatus, ResultData};
use crate::monitoring;
use crate::profile::extract_profile;
use crate::scoring::score;

/// Check a profile URL before any network call.
pub fn validate_profile_url<'a>(
    url: Option<&'a str>,
    allowed_hosts: &[String],
) -> Result<&'a str, ServiceError> {
    let url = url.map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return Err(ServiceError::MissingUrl);
    }
    if !allowed_hosts
        .iter()
        .filter(|h| !h.is_empty())
        .any(|h| url.contains(h.as_str()))
    {
        return Err(ServiceError::InvalidUrl {
            allowed: allowed_hosts.join(" or "),
        });
    }
    Ok(url)
}

/// Pure transform from fetched profile markup to the scored result.
pub fn build_result(markup: &str, season: &str) -> ResultData {
    let doc = Document::parse(markup);
    let user = extract_profile(&doc, markup);
    let badges = classify_all(extract_badges(&doc));
    let stats = score(&badges, season);
    ResultData {
        stats,
        badges,
        user,
    }
}

pub struct ArcadeService {
    config: AppConfig,
    source: Arc<dyn PageSource>,
    catalog: PageCache,
}

impl ArcadeService {
    pub fn new(config: AppConfig, source: Arc<dyn PageSource>) -> Self {
        let catalog =
            PageCache::new(config.catalog_url.clone(), config.catalog_ttl()).with_kind("catalog");
        Self {
            config,
            source,
            catalog,
        }
    }

    /// Service backed by real HTTP with the configured timeout.
    pub fn from_config(config: AppConfig) -> Result<Self, FetchError> {
        let source = HttpPageSource::new(config.request_timeout())?;
        Ok(Self::new(config, Arc::new(source)))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn calculate(&self, url: Option<&str>) -> Result<ResultData, ServiceError> {
        self.calculate_for_season(url, &self.config.season).await
    }

    #[instrument(skip(self))]
    pub async fn calculate_for_season(
        &self,
        url: Option<&str>,
        season: &str,
    ) -> Result<ResultData, ServiceError> {
        let url = validate_profile_url(url, &self.config.profile_hosts)?;
        let fetched = self.source.fetch(url).await;
        monitoring::record_fetch("profile", fetched.is_ok());
        let markup = match fetched {
            Ok(m) => m,
            Err(e) => {
                warn!(url = %url, error = %e, "Profile fetch failed");
                monitoring::record_request("calculate", false);
                return Err(ServiceError::Profile(e));
            }
        };
        let result = build_result(&markup, season);
        info!(
            url = %url,
            badges = result.badges.len(),
            total_points = result.stats.total_points,
            "Calculated profile"
        );
        monitoring::record_request("calculate", true);
        Ok(result)
    }

    /// Active games from the (cached) arcade page. A page without the
    /// embedded listing yields an empty list.
    pub async fn active_games(&self) -> Result<Vec<CatalogEntry>, ServiceError> {
        let markup = match self.catalog.get_or_refresh(self.source.as_ref()).await {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                monitoring::record_request("games", false);
                return Err(ServiceError::Catalog(e));
            }
        };
        let games = extract_catalog(&markup, &self.config.catalog_base_url);
        monitoring::record_request("games", true);
        Ok(games)
    }

    /// Active games with completion flags against `badges`.
    pub async fn games_for(&self, badges: &[Badge]) -> Result<Vec<GameStatus>, ServiceError> {
        let games = self.active_games().await?;
        Ok(annotate(games, badges))
    }

    pub async fn invalidate_catalog(&self) {
        self.catalog.invalidate().await;
    }
}
