//! Blog-vs-blog comparative scorer.

use serde::{Deserialize, Serialize};

use crate::metrics::BlogMetrics;

const POST_WEIGHT: f64 = 5.0;
const INDEX_HEALTH_WEIGHT: f64 = 0.4;
const EXPOSURE_WEIGHT: f64 = 0.3;

/// Gaps above this are an easy win.
pub const EASY_GAP: i64 = 10;
/// Gaps below this are out of reach. Deliberately not the mirror of [`EASY_GAP`].
pub const IMPOSSIBLE_GAP: i64 = -20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Easy,
    Hard,
    Impossible,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Easy => write!(f, "EASY"),
            Verdict::Hard => write!(f, "HARD"),
            Verdict::Impossible => write!(f, "IMPOSSIBLE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub score_gap: i64,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub verdict: Verdict,
}

/// Unbounded weighted score of one blog. Only differences are meaningful.
#[must_use]
pub fn blog_score(metrics: &BlogMetrics) -> f64 {
    let m = metrics.sanitized();
    f64::from(m.recent_post_count) * POST_WEIGHT
        + (100.0 - m.index_error_rate) * INDEX_HEALTH_WEIGHT
        + m.keyword_exposure_rate * EXPOSURE_WEIGHT
}

/// Compares the operator's blog (`mine`) against a competitor (`other`).
///
/// Each of the three dimensions adds at most one pro or one con; ties add
/// nothing, so both lists may be empty.
#[must_use]
pub fn compare(mine: &BlogMetrics, other: &BlogMetrics) -> ComparisonResult {
    let a = mine.sanitized();
    let b = other.sanitized();

    #[allow(clippy::cast_possible_truncation)]
    let score_gap = (blog_score(&a) - blog_score(&b)).round() as i64;

    let mut pros = Vec::new();
    let mut cons = Vec::new();

    match a.recent_post_count.cmp(&b.recent_post_count) {
        std::cmp::Ordering::Greater => {
            pros.push("You publish more consistently than the competitor.".to_string());
        }
        std::cmp::Ordering::Less => {
            cons.push("The competitor publishes more often than you.".to_string());
        }
        std::cmp::Ordering::Equal => {}
    }

    if a.index_error_rate < b.index_error_rate {
        pros.push("Fewer of your posts are missing from search results.".to_string());
    } else if a.index_error_rate > b.index_error_rate {
        cons.push("More of your posts are missing from search results.".to_string());
    }

    if a.keyword_exposure_rate > b.keyword_exposure_rate {
        pros.push("Your posts reach target keywords more often.".to_string());
    } else if a.keyword_exposure_rate < b.keyword_exposure_rate {
        cons.push("The competitor's posts reach target keywords more often.".to_string());
    }

    ComparisonResult {
        score_gap,
        pros,
        cons,
        verdict: verdict_for_gap(score_gap),
    }
}

#[must_use]
pub fn verdict_for_gap(score_gap: i64) -> Verdict {
    if score_gap > EASY_GAP {
        Verdict::Easy
    } else if score_gap < IMPOSSIBLE_GAP {
        Verdict::Impossible
    } else {
        Verdict::Hard
    }
}
