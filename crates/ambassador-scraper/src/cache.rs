//! Short-lived per-keyword cache of competitor analyses.

use std::collections::HashMap;

use ambassador_core::CompetitorAnalysisResult;
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_CACHE_TTL_SECS: u64 = 3_600;

#[derive(Debug, Clone)]
struct CacheEntry {
    stored_at: DateTime<Utc>,
    result: CompetitorAnalysisResult,
}

/// Keyword → analysis cache with a fixed validity window.
///
/// Keys are trimmed and lowercased. Single writer: every mutating call takes
/// `&mut self`. Callers pass `now` so expiry is deterministic in tests.
#[derive(Debug, Clone)]
pub struct AnalysisCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL_SECS)
    }
}

impl AnalysisCache {
    #[must_use]
    pub fn new(ttl_secs: u64) -> Self {
        let ttl_secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
            entries: HashMap::new(),
        }
    }

    fn key(keyword: &str) -> String {
        keyword.trim().to_lowercase()
    }

    /// Returns the cached analysis if it is still within the validity window.
    /// Expired entries are removed.
    pub fn get(&mut self, keyword: &str, now: DateTime<Utc>) -> Option<&CompetitorAnalysisResult> {
        let key = Self::key(keyword);
        let expired = self
            .entries
            .get(&key)
            .is_some_and(|entry| now - entry.stored_at >= self.ttl);
        if expired {
            self.entries.remove(&key);
            return None;
        }
        self.entries.get(&key).map(|entry| &entry.result)
    }

    pub fn insert(&mut self, keyword: &str, result: CompetitorAnalysisResult, now: DateTime<Utc>) {
        self.entries.insert(
            Self::key(keyword),
            CacheEntry {
                stored_at: now,
                result,
            },
        );
    }

    /// Drops every expired entry. Returns how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now - entry.stored_at < ttl);
        before - self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use ambassador_core::{ContentMetrics, TopAverage};
    use chrono::TimeZone;

    use super::*;

    fn result(keyword: &str) -> CompetitorAnalysisResult {
        CompetitorAnalysisResult {
            keyword: keyword.to_owned(),
            my_content: ContentMetrics::default(),
            top_blogs: vec![ContentMetrics::default()],
            top_average: TopAverage {
                word_count: 0,
                image_count: 0,
                has_video: false,
                keyword_frequency: 0,
                score: 0,
            },
            my_score: 0,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn hit_within_window() {
        let mut cache = AnalysisCache::default();
        cache.insert("botox", result("botox"), t0());
        let later = t0() + Duration::minutes(59);
        assert_eq!(cache.get("botox", later).unwrap().keyword, "botox");
    }

    #[test]
    fn miss_after_one_hour_and_entry_is_removed() {
        let mut cache = AnalysisCache::default();
        cache.insert("botox", result("botox"), t0());
        assert!(cache.get("botox", t0() + Duration::hours(1)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn keys_are_normalized() {
        let mut cache = AnalysisCache::default();
        cache.insert("  Botox ", result("Botox"), t0());
        assert!(cache.get("botox", t0()).is_some());
    }

    #[test]
    fn unknown_keyword_misses() {
        let mut cache = AnalysisCache::default();
        assert!(cache.get("filler", t0()).is_none());
    }

    #[test]
    fn purge_removes_only_expired() {
        let mut cache = AnalysisCache::new(60);
        cache.insert("old", result("old"), t0());
        cache.insert("new", result("new"), t0() + Duration::seconds(50));
        let removed = cache.purge_expired(t0() + Duration::seconds(70));
        assert_eq!(removed, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("new", t0() + Duration::seconds(70)).is_some());
    }
}
