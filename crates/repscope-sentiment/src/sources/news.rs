//! NewsAPI and GNews search clients.

use std::time::Duration;

use repscope_core::AppConfig;
use serde_json::Value;

use crate::error::SourceError;

const NEWSAPI_BASE_URL: &str = "https://newsapi.org";
const GNEWS_BASE_URL: &str = "https://gnews.io";

/// A news search provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsProvider {
    NewsApi,
    GNews,
}

impl NewsProvider {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            NewsProvider::NewsApi => "newsapi",
            NewsProvider::GNews => "gnews",
        }
    }
}

/// HTTP client for the news search APIs.
///
/// A provider without an API key is reported as disabled and never called.
pub struct NewsClient {
    client: reqwest::Client,
    newsapi_key: Option<String>,
    gnews_key: Option<String>,
    newsapi_base: String,
    gnews_base: String,
    page_size: u32,
}

impl NewsClient {
    /// Client pointed at the production APIs.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, SourceError> {
        Self::with_base_urls(config, NEWSAPI_BASE_URL, GNEWS_BASE_URL)
    }

    /// Client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_urls(
        config: &AppConfig,
        newsapi_base: &str,
        gnews_base: &str,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.news_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("repscope/0.1 (reputation-analysis)")
            .build()?;

        Ok(Self {
            client,
            newsapi_key: config.newsapi_key.clone(),
            gnews_key: config.gnews_api_key.clone(),
            newsapi_base: newsapi_base.trim_end_matches('/').to_string(),
            gnews_base: gnews_base.trim_end_matches('/').to_string(),
            page_size: config.news_page_size,
        })
    }

    /// Providers that have an API key configured.
    #[must_use]
    pub fn enabled_providers(&self) -> Vec<NewsProvider> {
        let mut providers = Vec::with_capacity(2);
        if self.newsapi_key.is_some() {
            providers.push(NewsProvider::NewsApi);
        }
        if self.gnews_key.is_some() {
            providers.push(NewsProvider::GNews);
        }
        providers
    }

    /// Search one provider. A disabled provider returns no articles.
    ///
    /// # Errors
    ///
    /// See [`NewsClient::fetch_newsapi`] and [`NewsClient::fetch_gnews`].
    pub async fn fetch(&self, provider: NewsProvider, query: &str) -> Result<Vec<Value>, SourceError> {
        match provider {
            NewsProvider::NewsApi => self.fetch_newsapi(query).await,
            NewsProvider::GNews => self.fetch_gnews(query).await,
        }
    }

    /// Search NewsAPI `/v2/everything`, newest first, English only. The key
    /// travels in the `X-Api-Key` header.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Http`] on network failure or undecodable JSON. The
    ///   request URL is stripped from the error.
    /// - [`SourceError::UnexpectedStatus`] on any non-2xx status.
    /// - [`SourceError::MissingArticles`] when the body has no `articles` array.
    pub async fn fetch_newsapi(&self, query: &str) -> Result<Vec<Value>, SourceError> {
        let Some(key) = &self.newsapi_key else {
            return Ok(Vec::new());
        };
        let page_size = self.page_size.to_string();
        let request = self
            .client
            .get(format!("{}/v2/everything", self.newsapi_base))
            .header("X-Api-Key", key.as_str())
            .query(&[
                ("q", query),
                ("pageSize", page_size.as_str()),
                ("sortBy", "publishedAt"),
                ("language", "en"),
            ]);
        Self::articles(request, NewsProvider::NewsApi).await
    }

    /// Search GNews `/api/v4/search`, English only. GNews only accepts the
    /// key as a query parameter, so errors never carry the URL.
    ///
    /// # Errors
    ///
    /// Same as [`NewsClient::fetch_newsapi`].
    pub async fn fetch_gnews(&self, query: &str) -> Result<Vec<Value>, SourceError> {
        let Some(key) = &self.gnews_key else {
            return Ok(Vec::new());
        };
        let max = self.page_size.to_string();
        let request = self
            .client
            .get(format!("{}/api/v4/search", self.gnews_base))
            .query(&[
                ("q", query),
                ("token", key.as_str()),
                ("lang", "en"),
                ("max", max.as_str()),
            ]);
        Self::articles(request, NewsProvider::GNews).await
    }

    async fn articles(
        request: reqwest::RequestBuilder,
        provider: NewsProvider,
    ) -> Result<Vec<Value>, SourceError> {
        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Http(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                provider: provider.name(),
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::Http(e.without_url()))?;
        match body.get("articles") {
            Some(Value::Array(articles)) => Ok(articles.clone()),
            _ => Err(SourceError::MissingArticles {
                provider: provider.name(),
            }),
        }
    }
}
