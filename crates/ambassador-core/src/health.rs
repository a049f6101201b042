//! Rule-based blog health classifier.
//!
//! Tiers are an ordered decision list; the first matching rule wins. The text
//! attached to each tier is static and does not depend on the numeric inputs.

use serde::{Deserialize, Serialize};

use crate::metrics::BlogMetrics;

/// Index error rate above which a blog is RED regardless of anything else.
pub const RED_INDEX_ERROR_RATE: f64 = 30.0;
/// Posting volume above which low exposure reads as a spam pattern.
pub const RED_POST_COUNT: u32 = 15;
pub const RED_EXPOSURE_RATE: f64 = 10.0;
/// Posting volume above which middling exposure reads as effort without payoff.
pub const YELLOW_POST_COUNT: u32 = 7;
pub const YELLOW_EXPOSURE_RATE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Red,
    Yellow,
    Green,
    /// Never produced by [`classify`]. Stored values that fail to parse.
    Unknown,
}

impl HealthStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Red => "RED",
            HealthStatus::Yellow => "YELLOW",
            HealthStatus::Green => "GREEN",
            HealthStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parses a stored status string. Unrecognized values map to `Unknown`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "RED" => HealthStatus::Red,
            "YELLOW" => HealthStatus::Yellow,
            "GREEN" => HealthStatus::Green,
            _ => HealthStatus::Unknown,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output: tier plus its static supporting text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub facts: Vec<String>,
    pub solution: Vec<String>,
    pub comment: String,
}

const RED_FACTS: [&str; 3] = [
    "A large share of recent posts is missing from search results.",
    "Posting activity is not translating into keyword exposure.",
    "The account shows patterns search engines associate with low-quality publishing.",
];
const RED_SOLUTION: [&str; 3] = [
    "Pause new posts until the indexing problem is resolved.",
    "Rewrite or remove posts that duplicate other pages or stuff keywords.",
    "Restart with one carefully written post every two to three days.",
];
const RED_COMMENT: &str = "This blog needs intensive care. Publishing more right now will make it worse, so stop, clean up the existing posts, and rebuild trust with search engines first.";

const YELLOW_FACTS: [&str; 3] = [
    "Posting volume is healthy but most posts do not reach the target keywords.",
    "Effort is outpacing discoverability.",
    "Titles and opening paragraphs are likely not aligned with what patients search for.",
];
const YELLOW_SOLUTION: [&str; 3] = [
    "Research keywords before writing and put the main keyword in the title.",
    "Add original photos and treatment details instead of generic text.",
    "Publish fewer posts and spend the saved time on depth and quality.",
];
const YELLOW_COMMENT: &str = "You are working hard but the results are not following. Aim each post at one keyword patients actually search for and the exposure will catch up.";

const GREEN_FACTS: [&str; 3] = [
    "Posts are being indexed normally.",
    "Posting cadence is stable.",
    "Keyword exposure is at an acceptable level.",
];
const GREEN_SOLUTION: [&str; 3] = [
    "Keep the current publishing rhythm.",
    "Expand into related treatment keywords to widen reach.",
    "Refresh older high-performing posts with up-to-date information.",
];
const GREEN_COMMENT: &str = "The blog is in good shape. Keep the rhythm steady and use the headroom to grow into neighbouring keywords.";

/// Maps account metrics to a health tier with its facts, actions and comment.
///
/// Inputs are clamped with [`BlogMetrics::sanitized`] first, so this is total:
/// every input yields exactly one of RED, YELLOW or GREEN.
#[must_use]
pub fn classify(metrics: &BlogMetrics) -> HealthReport {
    let status = classify_status(&metrics.sanitized());
    let (facts, solution, comment) = match status {
        HealthStatus::Red => (&RED_FACTS, &RED_SOLUTION, RED_COMMENT),
        HealthStatus::Yellow => (&YELLOW_FACTS, &YELLOW_SOLUTION, YELLOW_COMMENT),
        HealthStatus::Green | HealthStatus::Unknown => {
            (&GREEN_FACTS, &GREEN_SOLUTION, GREEN_COMMENT)
        }
    };

    HealthReport {
        status,
        facts: facts.iter().map(|s| (*s).to_string()).collect(),
        solution: solution.iter().map(|s| (*s).to_string()).collect(),
        comment: comment.to_string(),
    }
}

fn classify_status(m: &BlogMetrics) -> HealthStatus {
    if m.index_error_rate > RED_INDEX_ERROR_RATE
        || (m.recent_post_count > RED_POST_COUNT && m.keyword_exposure_rate < RED_EXPOSURE_RATE)
    {
        return HealthStatus::Red;
    }

    if m.recent_post_count > YELLOW_POST_COUNT && m.keyword_exposure_rate < YELLOW_EXPOSURE_RATE {
        return HealthStatus::Yellow;
    }

    HealthStatus::Green
}
