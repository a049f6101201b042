//! Metrics acquisition seam and the diagnosis run built on top of it.

use std::future::Future;

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::compare::blog_score;
use crate::health::classify;
use crate::metrics::BlogMetrics;
use crate::snapshot::{DiagnosisSnapshot, SnapshotHistory};
use crate::CoreError;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics source unavailable: {0}")]
    Unavailable(String),

    #[error("no metrics found for blog {0}")]
    UnknownBlog(String),
}

/// Anything that can produce account-level metrics for a blog id.
pub trait AccountMetricsSource {
    fn fetch_account_metrics(
        &self,
        blog_id: &str,
    ) -> impl Future<Output = Result<BlogMetrics, MetricsError>> + Send;
}

/// Placeholder estimator until real account statistics are collected.
///
/// Values are seeded from a SHA-256 of the blog id. With `jitter` enabled a
/// fresh random value is mixed into the seed, so repeated calls for the same
/// id vary around the same neighbourhood.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedMetricsSource {
    jitter: bool,
}

impl Default for SimulatedMetricsSource {
    fn default() -> Self {
        Self { jitter: true }
    }
}

impl SimulatedMetricsSource {
    /// Same id, same metrics. Used in tests and dry runs.
    #[must_use]
    pub fn deterministic() -> Self {
        Self { jitter: false }
    }

    fn seed_for(&self, blog_id: &str) -> u64 {
        let digest = Sha256::digest(blog_id.as_bytes());
        let mut bytes = [0_u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        let base = u64::from_le_bytes(bytes);
        if self.jitter {
            // Only perturb the low bits so the estimate stays near the id's baseline.
            base ^ (rand::random::<u64>() & 0xFF)
        } else {
            base
        }
    }

    fn estimate(&self, blog_id: &str) -> BlogMetrics {
        let mut rng = rand::rngs::StdRng::seed_from_u64(self.seed_for(blog_id));
        let recent_post_count = rng.random_range(0..=20_u32);
        let index_error_rate = f64::from(rng.random_range(0..=45_u32));
        let keyword_exposure_rate = f64::from(rng.random_range(0..=100_u32));
        BlogMetrics::new(recent_post_count, index_error_rate, keyword_exposure_rate)
    }
}

impl AccountMetricsSource for SimulatedMetricsSource {
    async fn fetch_account_metrics(&self, blog_id: &str) -> Result<BlogMetrics, MetricsError> {
        if blog_id.trim().is_empty() {
            return Err(MetricsError::UnknownBlog(blog_id.to_string()));
        }
        Ok(self.estimate(blog_id))
    }
}

/// Fetches metrics, falling back to an all-zero record if the source fails.
pub async fn fetch_metrics_or_default<S: AccountMetricsSource>(
    source: &S,
    blog_id: &str,
) -> BlogMetrics {
    match source.fetch_account_metrics(blog_id).await {
        Ok(metrics) => metrics,
        Err(e) => {
            tracing::warn!(
                blog = blog_id,
                error = %e,
                "metrics source failed, falling back to zeroed metrics"
            );
            BlogMetrics::default()
        }
    }
}

/// Overall 0–100 health score stored on a snapshot: the comparative blog
/// score, rounded and clamped.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn snapshot_score(metrics: &BlogMetrics) -> u8 {
    blog_score(metrics).round().clamp(0.0, 100.0) as u8
}

/// Runs one diagnosis without consulting any history.
///
/// # Errors
///
/// Returns [`CoreError::InvalidBlogId`] if `blog_id` is blank.
pub async fn diagnose<S: AccountMetricsSource>(
    source: &S,
    blog_id: &str,
    now: DateTime<Utc>,
) -> Result<DiagnosisSnapshot, CoreError> {
    let blog_id = blog_id.trim();
    if blog_id.is_empty() {
        return Err(CoreError::InvalidBlogId);
    }

    let metrics = fetch_metrics_or_default(source, blog_id).await;
    let report = classify(&metrics);
    let score = snapshot_score(&metrics);

    tracing::debug!(
        blog = blog_id,
        status = %report.status,
        score,
        "diagnosis complete"
    );

    Ok(DiagnosisSnapshot::from_report(
        blog_id, now, metrics, score, report,
    ))
}

/// Runs a diagnosis and records it in `history`.
///
/// If `history` already holds a snapshot for this blog on the same UTC day as
/// `now`, that snapshot is returned and nothing is fetched or appended.
///
/// # Errors
///
/// Returns [`CoreError::InvalidBlogId`] if `blog_id` is blank.
pub async fn run_diagnosis<S: AccountMetricsSource>(
    source: &S,
    history: &mut SnapshotHistory,
    blog_id: &str,
    now: DateTime<Utc>,
) -> Result<DiagnosisSnapshot, CoreError> {
    let trimmed = blog_id.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidBlogId);
    }

    if let Some(existing) = history.find_for_day(trimmed, now.date_naive()) {
        tracing::debug!(blog = trimmed, "snapshot for today already exists");
        return Ok(existing.clone());
    }

    let snapshot = diagnose(source, trimmed, now).await?;
    let evicted = history.append(snapshot.clone());
    if !evicted.is_empty() {
        tracing::debug!(count = evicted.len(), "evicted oldest snapshots");
    }
    Ok(snapshot)
}
