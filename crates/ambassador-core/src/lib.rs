//! Core domain logic for the Ambassador clinic-marketing toolkit.
//!
//! Holds the blog-health rule engine, the blog-vs-blog comparative scorer,
//! the page-content scorer, diagnosis snapshots with their bounded history,
//! and environment-driven configuration. Everything here is synchronous and
//! side-effect free except [`diagnosis::run_diagnosis`], which awaits an
//! injected [`AccountMetricsSource`].

pub mod app_config;
pub mod compare;
pub mod config;
pub mod content;
pub mod diagnosis;
pub mod health;
pub mod metrics;
pub mod snapshot;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use compare::{blog_score, compare, ComparisonResult, Verdict};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{
    average_top_blogs, score_content, CompetitorAnalysisResult, DraftContent, TopAverage,
    VIDEO_MAJORITY_THRESHOLD,
};
pub use diagnosis::{
    diagnose, fetch_metrics_or_default, run_diagnosis, snapshot_score, AccountMetricsSource,
    MetricsError, SimulatedMetricsSource,
};
pub use health::{classify, HealthReport, HealthStatus};
pub use metrics::{BlogMetrics, ContentMetrics};
pub use snapshot::{DiagnosisSnapshot, SnapshotHistory, DEFAULT_HISTORY_RETENTION};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("blog id must be non-empty")]
    InvalidBlogId,

    #[error("{field} must be within [0, 100], got {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
