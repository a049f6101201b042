//! Offline scoring commands: `compare` and `score-content`.

use ambassador_core::{compare, score_content, BlogMetrics, ComparisonResult, DraftContent};
use clap::Args;

/// Draft attributes shared by `score-content` and `analyze`. Omitted values
/// count as zero.
#[derive(Debug, Clone, Default, Args)]
pub struct DraftArgs {
    /// Word count of the draft
    #[arg(long)]
    pub words: Option<u32>,

    /// Number of images in the draft
    #[arg(long)]
    pub images: Option<u32>,

    /// The draft embeds a video
    #[arg(long)]
    pub video: bool,

    /// Occurrences of the target keyword in the draft
    #[arg(long)]
    pub keyword_frequency: Option<u32>,
}

impl DraftArgs {
    pub fn into_draft(self) -> DraftContent {
        DraftContent {
            word_count: self.words,
            image_count: self.images,
            has_video: self.video.then_some(true),
            keyword_frequency: self.keyword_frequency,
            ..DraftContent::default()
        }
    }
}

/// Parses `posts,index_error_rate,keyword_exposure_rate`, e.g. `10,5,90`.
///
/// Percentages outside `[0, 100]` are rejected here rather than clamped.
pub fn parse_blog_metrics(raw: &str) -> Result<BlogMetrics, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [posts, error_rate, exposure_rate] = parts.as_slice() else {
        return Err(format!(
            "expected posts,index_error_rate,keyword_exposure_rate but got \"{raw}\""
        ));
    };

    let posts: u32 = posts
        .parse()
        .map_err(|e| format!("invalid post count \"{posts}\": {e}"))?;
    let error_rate: f64 = error_rate
        .parse()
        .map_err(|e| format!("invalid index error rate \"{error_rate}\": {e}"))?;
    let exposure_rate: f64 = exposure_rate
        .parse()
        .map_err(|e| format!("invalid keyword exposure rate \"{exposure_rate}\": {e}"))?;

    BlogMetrics::try_new(posts, error_rate, exposure_rate).map_err(|e| e.to_string())
}

/// # Errors
///
/// Returns an error if JSON output cannot be serialized.
pub(crate) fn run_compare(mine: &BlogMetrics, other: &BlogMetrics, json: bool) -> anyhow::Result<()> {
    let result = compare(mine, other);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_comparison(&result);
    }
    Ok(())
}

fn print_comparison(result: &ComparisonResult) {
    for line in format_comparison(result) {
        println!("{line}");
    }
}

/// Text lines for a comparison. Empty pros or cons get a fallback line.
pub(crate) fn format_comparison(result: &ComparisonResult) -> Vec<String> {
    let mut lines = vec![
        format!("verdict:   {}", result.verdict),
        format!("score gap: {:+}", result.score_gap),
    ];
    if result.pros.is_empty() {
        lines.push("  + no notable strength".to_owned());
    }
    lines.extend(result.pros.iter().map(|pro| format!("  + {pro}")));
    if result.cons.is_empty() {
        lines.push("  - no notable weakness".to_owned());
    }
    lines.extend(result.cons.iter().map(|con| format!("  - {con}")));
    lines
}

pub(crate) fn run_score_content(draft: DraftArgs) {
    let metrics = draft.into_draft().into_metrics();
    println!(
        "content score: {}/100 (words {}, images {}, video {}, keyword hits {})",
        score_content(&metrics),
        metrics.word_count,
        metrics.image_count,
        if metrics.has_video { "yes" } else { "no" },
        metrics.keyword_frequency
    );
}
