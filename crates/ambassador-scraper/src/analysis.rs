//! Competitor analysis: search, fetch each top page politely, average, score.

use ambassador_core::{
    average_top_blogs, score_content, CompetitorAnalysisResult, ContentMetrics, DraftContent,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::cache::AnalysisCache;
use crate::error::ScraperError;
use crate::page::PageSource;
use crate::rate_limit::PolitenessGate;
use crate::search::{SearchResult, SearchSource};

pub const DEFAULT_TOP_N: usize = 3;

/// Runs one competitor analysis per call.
///
/// Pages are fetched strictly one after another, each preceded by a pause on
/// the [`PolitenessGate`]. A page that fails is logged and skipped; the batch
/// only fails when no page could be analyzed.
pub struct CompetitorAnalyzer<S, P> {
    search: S,
    pages: P,
    gate: PolitenessGate,
    top_n: usize,
}

impl<S, P> CompetitorAnalyzer<S, P>
where
    S: SearchSource + Sync,
    P: PageSource + Sync,
{
    #[must_use]
    pub fn new(search: S, pages: P, gate: PolitenessGate) -> Self {
        Self {
            search,
            pages,
            gate,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Number of top-ranked pages to analyze. Zero is raised to one.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }

    #[must_use]
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Analyzes the top-ranked pages for `keyword` and scores `draft` against them.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::EmptyKeyword`] for a blank keyword.
    /// - Any search error, unchanged.
    /// - [`ScraperError::NoResults`] when the search returns nothing.
    /// - [`ScraperError::AllAnalysesFailed`] when every page fetch failed.
    pub async fn analyze(
        &self,
        keyword: &str,
        draft: DraftContent,
    ) -> Result<CompetitorAnalysisResult, ScraperError> {
        Ok(self.run(keyword, draft, None).await?.result)
    }

    /// Same as [`analyze`](Self::analyze) but stops before the next fetch once
    /// `cancel` flips to `true`, returning what was analyzed so far.
    ///
    /// # Errors
    ///
    /// As [`analyze`](Self::analyze). Cancelling before any page succeeded
    /// yields [`ScraperError::AllAnalysesFailed`].
    pub async fn analyze_until(
        &self,
        keyword: &str,
        draft: DraftContent,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<CompetitorAnalysisResult, ScraperError> {
        Ok(self.run(keyword, draft, Some(cancel)).await?.result)
    }

    /// Serves the keyword from `cache` when fresh, otherwise analyzes and
    /// stores the result. On a hit the competitor side is reused and only the
    /// draft is re-scored.
    ///
    /// # Errors
    ///
    /// As [`analyze`](Self::analyze). Failed analyses are never cached.
    pub async fn analyze_cached(
        &self,
        cache: &mut AnalysisCache,
        keyword: &str,
        draft: DraftContent,
        now: DateTime<Utc>,
    ) -> Result<CompetitorAnalysisResult, ScraperError> {
        self.cached(cache, keyword, draft, now, None).await
    }

    /// [`analyze_cached`](Self::analyze_cached) with cancellation as in
    /// [`analyze_until`](Self::analyze_until). A run stopped before every
    /// page was attempted is returned but not cached.
    ///
    /// # Errors
    ///
    /// As [`analyze_until`](Self::analyze_until).
    pub async fn analyze_cached_until(
        &self,
        cache: &mut AnalysisCache,
        keyword: &str,
        draft: DraftContent,
        now: DateTime<Utc>,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<CompetitorAnalysisResult, ScraperError> {
        self.cached(cache, keyword, draft, now, Some(cancel)).await
    }

    async fn cached(
        &self,
        cache: &mut AnalysisCache,
        keyword: &str,
        draft: DraftContent,
        now: DateTime<Utc>,
        cancel: Option<&mut watch::Receiver<bool>>,
    ) -> Result<CompetitorAnalysisResult, ScraperError> {
        if let Some(hit) = cache.get(keyword, now) {
            tracing::debug!(keyword, "competitor analysis served from cache");
            let mut result = hit.clone();
            let my_content = draft.into_metrics();
            result.my_score = score_content(&my_content);
            result.my_content = my_content;
            return Ok(result);
        }

        let Analysis { result, complete } = self.run(keyword, draft, cancel).await?;
        if complete {
            cache.insert(keyword, result.clone(), now);
        } else {
            tracing::debug!(keyword, "partial analysis not cached");
        }
        Ok(result)
    }

    async fn run(
        &self,
        keyword: &str,
        draft: DraftContent,
        mut cancel: Option<&mut watch::Receiver<bool>>,
    ) -> Result<Analysis, ScraperError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ScraperError::EmptyKeyword);
        }

        let mut hits = self.search.search_top_results(keyword, self.top_n).await?;
        hits.truncate(self.top_n);
        if hits.is_empty() {
            return Err(ScraperError::NoResults {
                keyword: keyword.to_owned(),
            });
        }
        tracing::info!(keyword, pages = hits.len(), "starting competitor analysis");

        let mut top_blogs = Vec::with_capacity(hits.len());
        let mut attempted = 0usize;

        for (index, hit) in hits.iter().enumerate() {
            let proceed = match cancel.as_deref_mut() {
                Some(rx) => pause_unless_cancelled(&self.gate, rx).await,
                None => {
                    self.gate.wait().await;
                    true
                }
            };
            if !proceed {
                tracing::info!(
                    keyword,
                    analyzed = top_blogs.len(),
                    remaining = hits.len() - index,
                    "competitor analysis cancelled, keeping partial result"
                );
                break;
            }

            attempted += 1;
            match self.pages.fetch_and_extract(&hit.url, keyword).await {
                Ok(metrics) => top_blogs.push(fill_from_hit(metrics, hit)),
                Err(e) => {
                    tracing::warn!(
                        keyword,
                        rank = index + 1,
                        url = %hit.url,
                        error = %e,
                        "failed to analyze competitor page, skipping"
                    );
                }
            }
        }

        let Some(top_average) = average_top_blogs(&top_blogs) else {
            return Err(ScraperError::AllAnalysesFailed {
                keyword: keyword.to_owned(),
                attempted,
            });
        };

        let my_content = draft.into_metrics();
        let my_score = score_content(&my_content);
        tracing::info!(
            keyword,
            analyzed = top_blogs.len(),
            attempted,
            my_score,
            top_score = top_average.score,
            "competitor analysis complete"
        );

        Ok(Analysis {
            result: CompetitorAnalysisResult {
                keyword: keyword.to_owned(),
                my_content,
                top_blogs,
                top_average,
                my_score,
            },
            complete: attempted == hits.len(),
        })
    }
}

/// A finished run. `complete` is false when cancellation stopped it before
/// every search hit was attempted.
struct Analysis {
    result: CompetitorAnalysisResult,
    complete: bool,
}

/// Pages that lack a title or URL borrow them from the search hit.
fn fill_from_hit(mut metrics: ContentMetrics, hit: &SearchResult) -> ContentMetrics {
    if metrics.title.is_empty() {
        metrics.title.clone_from(&hit.title);
    }
    if metrics.url.is_empty() {
        metrics.url.clone_from(&hit.url);
    }
    metrics
}

/// Waits on the gate. Returns `false` if cancellation was requested before or
/// during the pause.
async fn pause_unless_cancelled(gate: &PolitenessGate, cancel: &mut watch::Receiver<bool>) -> bool {
    if *cancel.borrow() {
        return false;
    }

    let pause = gate.wait();
    tokio::pin!(pause);

    tokio::select! {
        () = &mut pause => return true,
        changed = cancel.wait_for(|cancelled| *cancelled) => {
            if changed.is_ok() {
                return false;
            }
        }
    }

    // Sender dropped without cancelling: nothing can cancel any more.
    pause.await;
    true
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
