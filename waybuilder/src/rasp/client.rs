//! Timetable HTTP client.
//!
//! Requests have the shape `{base_url}/{version}/{endpoint}/?apikey=..&..`
//! and return JSON. Route searches are paginated; [`RaspApi::search_all`]
//! walks the pages and merges them into one result.

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{PointId, RouteDate};

use super::error::RaspError;
use super::types::{RouteSearch, StationsList};

/// Default base URL for the timetable API.
pub const DEFAULT_BASE_URL: &str = "https://api.rasp.yandex.net";

/// Default API version path segment.
pub const DEFAULT_VERSION: &str = "v3.0";

/// Default response language.
pub const DEFAULT_LANG: &str = "ru_RU";

/// Results requested per search page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Upper bound on pages fetched for one search.
const MAX_PAGES: usize = 20;

/// Configuration for the timetable client.
#[derive(Debug, Clone)]
pub struct RaspConfig {
    /// API key sent as the `apikey` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// API version path segment, e.g. `v3.0`
    pub version: String,
    /// Response language, e.g. `ru_RU`
    pub lang: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RaspConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_VERSION.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Parameters of a route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub from: PointId,
    pub to: PointId,
    pub date: RouteDate,
    /// Include journeys with changes.
    pub transfers: bool,
}

impl RouteQuery {
    pub fn new(from: PointId, to: PointId, date: RouteDate) -> Self {
        Self {
            from,
            to,
            date,
            transfers: true,
        }
    }
}

/// Operations the console needs from the timetable service.
///
/// Implemented by [`RaspClient`] and by in-memory stubs in tests.
#[allow(async_fn_in_trait)]
pub trait RaspApi {
    /// Fetch the full country/region/settlement/station hierarchy.
    async fn stations_list(&self) -> Result<StationsList, RaspError>;

    /// Fetch one page of route results.
    async fn search_page(
        &self,
        query: &RouteQuery,
        offset: usize,
        limit: usize,
    ) -> Result<RouteSearch, RaspError>;

    /// Change the response language for subsequent requests.
    fn set_lang(&mut self, lang: &str);

    /// Current response language.
    fn lang(&self) -> &str;

    /// Fetch every page of a search and merge them.
    ///
    /// The first page reveals the total; the remaining pages are then
    /// requested concurrently and appended in offset order.
    async fn search_all(&self, query: &RouteQuery, page_size: usize) -> Result<RouteSearch, RaspError> {
        let page_size = page_size.max(1);
        let mut result = self.search_page(query, 0, page_size).await?;

        let total = result.total();
        let offsets: Vec<usize> = (1..MAX_PAGES)
            .map(|page| page * page_size)
            .take_while(|&offset| offset < total)
            .collect();

        if total > MAX_PAGES.saturating_mul(page_size) {
            warn!(total, page_size, "search result too large, truncating pages");
        }

        if !offsets.is_empty() {
            debug!(pages = offsets.len() + 1, total, "fetching remaining search pages");
            let pages = try_join_all(
                offsets
                    .iter()
                    .map(|&offset| self.search_page(query, offset, page_size)),
            )
            .await?;
            for page in pages {
                result.merge_page(page);
            }
        }

        Ok(result)
    }
}

/// Timetable API client.
#[derive(Debug, Clone)]
pub struct RaspClient {
    http: reqwest::Client,
    config: RaspConfig,
}

impl RaspClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RaspConfig) -> Result<Self, RaspError> {
        if config.api_key.trim().is_empty() {
            return Err(RaspError::Config("api key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RaspConfig {
        &self.config
    }

    /// URL for an endpoint, without query parameters.
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}/",
            self.config.base_url.trim_end_matches('/'),
            self.config.version,
            endpoint
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, RaspError> {
        let url = self.endpoint_url(endpoint);
        debug!(%url, "timetable request");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("apikey", self.config.api_key.as_str()),
                ("lang", self.config.lang.as_str()),
                ("format", "json"),
            ])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RaspError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RaspError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RaspError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RaspError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl RaspApi for RaspClient {
    async fn stations_list(&self) -> Result<StationsList, RaspError> {
        self.get_json("stations_list", &[]).await
    }

    async fn search_page(
        &self,
        query: &RouteQuery,
        offset: usize,
        limit: usize,
    ) -> Result<RouteSearch, RaspError> {
        self.get_json(
            "search",
            &[
                ("from", query.from.to_string()),
                ("to", query.to.to_string()),
                ("date", query.date.iso()),
                ("transfers", query.transfers.to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    fn set_lang(&mut self, lang: &str) {
        self.config.lang = lang.to_string();
    }

    fn lang(&self) -> &str {
        &self.config.lang
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasp::types::{Pagination, Segment};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[test]
    fn config_builder() {
        let config = RaspConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_version("v2")
            .with_lang("en_US")
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.version, "v2");
        assert_eq!(config.lang, "en_US");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = RaspConfig::new("test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.version, DEFAULT_VERSION);
        assert_eq!(config.lang, DEFAULT_LANG);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        assert!(RaspClient::new(RaspConfig::new("test-key")).is_ok());
        assert!(matches!(
            RaspClient::new(RaspConfig::new("  ")),
            Err(RaspError::Config(_))
        ));
    }

    #[test]
    fn endpoint_url_layout() {
        let client =
            RaspClient::new(RaspConfig::new("k").with_base_url("http://host/")).unwrap();
        assert_eq!(client.endpoint_url("search"), "http://host/v3.0/search/");
    }

    #[test]
    fn set_lang_updates_config() {
        let mut client = RaspClient::new(RaspConfig::new("k")).unwrap();
        client.set_lang("uk_UA");
        assert_eq!(client.lang(), "uk_UA");
    }

    /// Serves `total` segments in pages and records requested offsets.
    struct PagedApi {
        total: usize,
        offsets: Mutex<Vec<usize>>,
    }

    impl RaspApi for PagedApi {
        async fn stations_list(&self) -> Result<StationsList, RaspError> {
            Ok(StationsList::default())
        }

        async fn search_page(
            &self,
            _query: &RouteQuery,
            offset: usize,
            limit: usize,
        ) -> Result<RouteSearch, RaspError> {
            self.offsets.lock().unwrap().push(offset);
            let count = limit.min(self.total.saturating_sub(offset));
            Ok(RouteSearch {
                pagination: Some(Pagination {
                    total: self.total,
                    limit,
                    offset,
                }),
                segments: vec![Segment::default(); count],
                ..RouteSearch::default()
            })
        }

        fn set_lang(&mut self, _lang: &str) {}

        fn lang(&self) -> &str {
            DEFAULT_LANG
        }
    }

    fn query() -> RouteQuery {
        RouteQuery::new(
            PointId::parse("c213").unwrap(),
            PointId::parse("c2").unwrap(),
            RouteDate::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
        )
    }

    #[tokio::test]
    async fn search_all_merges_every_page() {
        let api = PagedApi {
            total: 25,
            offsets: Mutex::new(Vec::new()),
        };
        let result = api.search_all(&query(), 10).await.unwrap();
        assert_eq!(result.segments.len(), 25);

        let mut offsets = api.offsets.lock().unwrap().clone();
        offsets.sort_unstable();
        assert_eq!(offsets, vec![0, 10, 20]);
    }

    #[tokio::test]
    async fn search_all_single_page() {
        let api = PagedApi {
            total: 3,
            offsets: Mutex::new(Vec::new()),
        };
        let result = api.search_all(&query(), 100).await.unwrap();
        assert_eq!(result.segments.len(), 3);
        assert_eq!(api.offsets.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_all_caps_page_count() {
        let api = PagedApi {
            total: 1000,
            offsets: Mutex::new(Vec::new()),
        };
        let result = api.search_all(&query(), 1).await.unwrap();
        assert_eq!(result.segments.len(), MAX_PAGES);
    }

    #[tokio::test]
    async fn search_all_huge_total_fetches_capped_pages() {
        let api = PagedApi {
            total: 1 << 40,
            offsets: Mutex::new(Vec::new()),
        };
        let result = api.search_all(&query(), 1).await.unwrap();
        assert_eq!(result.segments.len(), MAX_PAGES);

        let mut offsets = api.offsets.lock().unwrap().clone();
        offsets.sort_unstable();
        assert_eq!(offsets, (0..MAX_PAGES).collect::<Vec<_>>());
    }
}
