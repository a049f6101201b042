//! Competitor content analysis for Ambassador.
//!
//! Looks up the top-ranking blog posts for a keyword, fetches each page
//! sequentially behind a randomized politeness pause, extracts content
//! attributes from the HTML, and compares the operator's draft against the
//! averaged result.

pub mod analysis;
pub mod cache;
mod client;
pub mod error;
pub mod extract;
pub mod page;
pub mod rate_limit;
pub mod search;

pub use analysis::CompetitorAnalyzer;
pub use cache::AnalysisCache;
pub use error::ScraperError;
pub use extract::extract_content_metrics;
pub use page::{PageClient, PageSource};
pub use rate_limit::PolitenessGate;
pub use search::{BlogSearchClient, SearchResult, SearchSource};
