//! Page-fetch collaborator: downloads one blog post and extracts its metrics.

use std::future::Future;

use ambassador_core::ContentMetrics;
use reqwest::Url;

use crate::client::FetchClient;
use crate::error::ScraperError;
use crate::extract::extract_content_metrics;

/// Anything that can turn a post URL into [`ContentMetrics`].
pub trait PageSource {
    fn fetch_and_extract(
        &self,
        url: &str,
        keyword: &str,
    ) -> impl Future<Output = Result<ContentMetrics, ScraperError>> + Send;
}

/// Fetches post HTML over HTTP.
///
/// Built with `max_retries = 0` in normal use: a failed page is skipped by
/// the analysis, not hammered again.
pub struct PageClient {
    http: FetchClient,
}

impl PageClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            http: FetchClient::new(timeout_secs, user_agent, max_retries, backoff_base_secs)?,
        })
    }
}

impl PageSource for PageClient {
    async fn fetch_and_extract(
        &self,
        url: &str,
        keyword: &str,
    ) -> Result<ContentMetrics, ScraperError> {
        let fetch_url = fetchable_url(url)?;
        let html = self
            .http
            .get_text(fetch_url.as_str(), "text/html,application/xhtml+xml", &[])
            .await?;

        let metrics = extract_content_metrics(&html, url, keyword);
        tracing::debug!(
            url,
            word_count = metrics.word_count,
            image_count = metrics.image_count,
            has_video = metrics.has_video,
            keyword_frequency = metrics.keyword_frequency,
            "extracted page metrics"
        );
        Ok(metrics)
    }
}

/// Validates `url` and rewrites desktop Naver blog links to the mobile host,
/// which serves the post body inline instead of inside a frame.
pub(crate) fn fetchable_url(url: &str) -> Result<Url, ScraperError> {
    let mut parsed = Url::parse(url.trim()).map_err(|e| ScraperError::InvalidUrl {
        url: url.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
        });
    }

    if parsed.host_str() == Some("blog.naver.com") {
        parsed
            .set_host(Some("m.blog.naver.com"))
            .map_err(|e| ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
    }

    Ok(parsed)
}
