use std::time::Duration;

use discovery_core::{Catalog, FetchRequest, ItemId, MediaKind, ProviderPage};
use engine_logging::engine_debug;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{WireDetails, WirePage};
use crate::{DetailRecord, FailureKind, FetchError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendingWindow {
    Day,
    #[default]
    Week,
}

impl TrendingWindow {
    fn as_str(self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub api_key: String,
    pub language: Option<String>,
    pub trending_window: TrendingWindow,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key: String::new(),
            language: None,
            trending_window: TrendingWindow::default(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// The metadata service behind search, browse and details.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    async fn search(
        &self,
        catalog: Catalog,
        query: &str,
        page: u32,
    ) -> Result<ProviderPage, FetchError>;

    async fn browse(&self, catalog: Catalog, page: u32) -> Result<ProviderPage, FetchError>;

    async fn details(&self, kind: MediaKind, id: ItemId) -> Result<DetailRecord, FetchError>;
}

/// Run a coordinator request against a provider.
pub async fn run_request(
    provider: &dyn Provider,
    request: &FetchRequest,
) -> Result<ProviderPage, FetchError> {
    match request {
        FetchRequest::Search {
            catalog,
            query,
            page,
        } => provider.search(*catalog, query, *page).await,
        FetchRequest::Browse { catalog, page } => provider.browse(*catalog, *page).await,
    }
}

#[derive(Debug, Clone)]
pub struct TmdbProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl TmdbProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
        let base = self.settings.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{path}"))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", &self.settings.api_key);
            if let Some(language) = self.settings.language.as_deref() {
                pairs.append_pair("language", language);
            }
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        // The query string carries the API key; log the path only.
        engine_debug!("TMDB request path={}", url.path());

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::new(FailureKind::NotFound, status.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }

    async fn get_page(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<ProviderPage, FetchError> {
        let url = self.endpoint(path, params)?;
        let page: WirePage = self.get_json(url).await?;
        Ok(page.into())
    }
}

#[async_trait::async_trait]
impl Provider for TmdbProvider {
    async fn search(
        &self,
        catalog: Catalog,
        query: &str,
        page: u32,
    ) -> Result<ProviderPage, FetchError> {
        let path = match catalog {
            Catalog::All => "/search/multi",
            Catalog::Movies => "/search/movie",
            Catalog::Series => "/search/tv",
        };
        let page = page.to_string();
        self.get_page(
            path,
            &[
                ("query", query),
                ("page", page.as_str()),
                ("include_adult", "false"),
            ],
        )
        .await
    }

    async fn browse(&self, catalog: Catalog, page: u32) -> Result<ProviderPage, FetchError> {
        let page = page.to_string();
        match catalog {
            Catalog::All => {
                let path = format!("/trending/all/{}", self.settings.trending_window.as_str());
                self.get_page(&path, &[("page", page.as_str())]).await
            }
            Catalog::Movies | Catalog::Series => {
                let path = if catalog == Catalog::Movies {
                    "/discover/movie"
                } else {
                    "/discover/tv"
                };
                self.get_page(
                    path,
                    &[
                        ("page", page.as_str()),
                        ("sort_by", "popularity.desc"),
                        ("include_adult", "false"),
                    ],
                )
                .await
            }
        }
    }

    async fn details(&self, kind: MediaKind, id: ItemId) -> Result<DetailRecord, FetchError> {
        let path = match kind {
            MediaKind::Movie => format!("/movie/{id}"),
            MediaKind::Series => format!("/tv/{id}"),
        };
        let url = self.endpoint(&path, &[])?;
        let details: WireDetails = self.get_json(url).await?;
        Ok(details.into_record(kind))
    }
}

/// The request URL carries the API key, so it is stripped before formatting.
fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let err = err.without_url();
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
