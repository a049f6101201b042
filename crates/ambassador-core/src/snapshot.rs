//! Diagnosis snapshots and their bounded, append-only history.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::health::{HealthReport, HealthStatus};
use crate::metrics::BlogMetrics;

/// Snapshots kept across all blogs before the oldest is evicted.
pub const DEFAULT_HISTORY_RETENTION: usize = 30;

/// One immutable diagnosis result for a blog at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisSnapshot {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub blog_id: String,
    pub status: HealthStatus,
    /// 0–100.
    pub score: u8,
    pub metrics: BlogMetrics,
    pub facts: Vec<String>,
    pub solution: Vec<String>,
    pub comment: String,
}

impl DiagnosisSnapshot {
    #[must_use]
    pub fn from_report(
        blog_id: &str,
        date: DateTime<Utc>,
        metrics: BlogMetrics,
        score: u8,
        report: HealthReport,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            blog_id: blog_id.to_string(),
            status: report.status,
            score: score.min(100),
            metrics,
            facts: report.facts,
            solution: report.solution,
            comment: report.comment,
        }
    }

    /// Calendar day (UTC) used for "already diagnosed today" checks.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// In-memory snapshot history with a global FIFO retention cap.
///
/// Eviction is by insertion order across all blogs, not per blog.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    entries: VecDeque<DiagnosisSnapshot>,
    retention: usize,
}

impl Default for SnapshotHistory {
    fn default() -> Self {
        Self::with_retention(DEFAULT_HISTORY_RETENTION)
    }
}

impl SnapshotHistory {
    /// A `retention` of zero is treated as one.
    #[must_use]
    pub fn with_retention(retention: usize) -> Self {
        let retention = retention.max(1);
        Self {
            entries: VecDeque::with_capacity(retention),
            retention,
        }
    }

    #[must_use]
    pub fn retention(&self) -> usize {
        self.retention
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a snapshot, evicting the oldest entries beyond the cap.
    /// Returns the evicted snapshots, oldest first.
    pub fn append(&mut self, snapshot: DiagnosisSnapshot) -> Vec<DiagnosisSnapshot> {
        self.entries.push_back(snapshot);
        let mut evicted = Vec::new();
        while self.entries.len() > self.retention {
            if let Some(old) = self.entries.pop_front() {
                evicted.push(old);
            }
        }
        evicted
    }

    /// All snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosisSnapshot> {
        self.entries.iter()
    }

    /// Snapshots for one blog, oldest first.
    pub fn for_blog<'a>(
        &'a self,
        blog_id: &'a str,
    ) -> impl Iterator<Item = &'a DiagnosisSnapshot> + 'a {
        self.entries.iter().filter(move |s| s.blog_id == blog_id)
    }

    #[must_use]
    pub fn latest_for_blog(&self, blog_id: &str) -> Option<&DiagnosisSnapshot> {
        self.entries.iter().rev().find(|s| s.blog_id == blog_id)
    }

    /// Most recent snapshot for `blog_id` taken on `day` (UTC), if any.
    #[must_use]
    pub fn find_for_day(&self, blog_id: &str, day: NaiveDate) -> Option<&DiagnosisSnapshot> {
        self.entries
            .iter()
            .rev()
            .find(|s| s.blog_id == blog_id && s.day() == day)
    }
}
