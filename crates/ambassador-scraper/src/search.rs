//! Keyword search collaborator: returns the top-ranked blog posts for a keyword.

use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::client::FetchClient;
use crate::error::ScraperError;
use crate::extract::decode_entities;

static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid markup regex"));

/// The search API caps `display` at this value.
const MAX_DISPLAY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
}

/// Anything that can rank blog posts for a keyword.
pub trait SearchSource {
    /// Returns at most `limit` results in rank order. An empty list is a
    /// valid answer; callers decide whether that is an error.
    fn search_top_results(
        &self,
        keyword: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SearchResult>, ScraperError>> + Send;
}

#[derive(Debug, Deserialize)]
struct BlogSearchResponse {
    #[serde(default)]
    items: Vec<BlogSearchItem>,
}

#[derive(Debug, Deserialize)]
struct BlogSearchItem {
    #[serde(default)]
    title: String,
    link: String,
}

/// Client for a Naver-compatible blog search endpoint
/// (`GET /v1/search/blog.json?query=..&display=..`).
pub struct BlogSearchClient {
    http: FetchClient,
    base_url: Url,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl BlogSearchClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built, or
    /// [`ScraperError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        // Exactly one trailing slash so `join` appends instead of replacing.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ScraperError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http: FetchClient::new(timeout_secs, user_agent, max_retries, backoff_base_secs)?,
            base_url: parsed,
            client_id: None,
            client_secret: None,
        })
    }

    /// Attaches API credentials sent as `X-Naver-Client-Id` / `X-Naver-Client-Secret`.
    #[must_use]
    pub fn with_credentials(mut self, client_id: Option<String>, client_secret: Option<String>) -> Self {
        self.client_id = client_id;
        self.client_secret = client_secret;
        self
    }

    fn search_url(&self, keyword: &str, limit: usize) -> Result<Url, ScraperError> {
        let mut url = self
            .base_url
            .join("v1/search/blog.json")
            .map_err(|e| ScraperError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("query", keyword)
            .append_pair("display", &limit.clamp(1, MAX_DISPLAY).to_string())
            .append_pair("sort", "sim");
        Ok(url)
    }

    fn auth_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();
        if let Some(id) = &self.client_id {
            headers.push(("X-Naver-Client-Id", id.clone()));
        }
        if let Some(secret) = &self.client_secret {
            headers.push(("X-Naver-Client-Secret", secret.clone()));
        }
        headers
    }
}

impl SearchSource for BlogSearchClient {
    async fn search_top_results(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>, ScraperError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let url = self.search_url(keyword, limit)?;
        let headers = self.auth_headers();
        let body = self
            .http
            .get_text(url.as_str(), "application/json", &headers)
            .await?;

        let parsed: BlogSearchResponse =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("blog search for \"{keyword}\""),
                source: e,
            })?;

        let results: Vec<SearchResult> = parsed
            .items
            .into_iter()
            .filter(|item| !item.link.trim().is_empty())
            .take(limit)
            .map(|item| SearchResult {
                title: clean_title(&item.title),
                url: item.link.trim().to_owned(),
            })
            .collect();

        tracing::debug!(keyword, count = results.len(), "blog search complete");
        Ok(results)
    }
}

/// Strips highlight markup (`<b>..</b>`) and decodes entities.
pub(crate) fn clean_title(raw: &str) -> String {
    let stripped = MARKUP_RE.replace_all(raw, "");
    decode_entities(&stripped).trim().to_owned()
}
