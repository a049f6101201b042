//! Page-content scoring and top-ranking average aggregation.

use serde::{Deserialize, Serialize};

use crate::metrics::ContentMetrics;

/// Number of analyzed pages that must have video for the average to count as
/// "has video". Fixed regardless of how many pages were analyzed.
pub const VIDEO_MAJORITY_THRESHOLD: usize = 2;

const MAX_SCORE: u32 = 100;

/// `(minimum, points)` steps, highest first. First step reached wins.
const WORD_COUNT_BANDS: &[(u32, u32)] = &[(2500, 30), (1500, 20), (1000, 10)];
const IMAGE_COUNT_BANDS: &[(u32, u32)] = &[(15, 25), (10, 20), (5, 15), (3, 10)];
const KEYWORD_FREQUENCY_BANDS: &[(u32, u32)] = &[(5, 25), (3, 15), (1, 5)];
const VIDEO_POINTS: u32 = 20;

fn band_points(value: u32, bands: &[(u32, u32)]) -> u32 {
    bands
        .iter()
        .find(|(min, _)| value >= *min)
        .map_or(0, |(_, points)| *points)
}

/// Scores page content on a 0–100 scale from four independent step bands.
#[must_use]
pub fn score_content(metrics: &ContentMetrics) -> u8 {
    let total = band_points(metrics.word_count, WORD_COUNT_BANDS)
        + band_points(metrics.image_count, IMAGE_COUNT_BANDS)
        + if metrics.has_video { VIDEO_POINTS } else { 0 }
        + band_points(metrics.keyword_frequency, KEYWORD_FREQUENCY_BANDS);

    // The bands can't exceed 100 today; the clamp keeps the contract if they change.
    u8::try_from(total.min(MAX_SCORE)).unwrap_or(u8::MAX)
}

/// The operator's in-progress draft. Every field is optional; missing values
/// count as zero, `false`, or empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DraftContent {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub word_count: Option<u32>,
    #[serde(default)]
    pub image_count: Option<u32>,
    #[serde(default)]
    pub has_video: Option<bool>,
    #[serde(default)]
    pub keyword_frequency: Option<u32>,
}

impl DraftContent {
    #[must_use]
    pub fn into_metrics(self) -> ContentMetrics {
        ContentMetrics {
            url: self.url.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            word_count: self.word_count.unwrap_or(0),
            image_count: self.image_count.unwrap_or(0),
            has_video: self.has_video.unwrap_or(false),
            keyword_frequency: self.keyword_frequency.unwrap_or(0),
        }
    }
}

/// Averaged attributes of the successfully analyzed top-ranking pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopAverage {
    pub word_count: u32,
    pub image_count: u32,
    pub has_video: bool,
    pub keyword_frequency: u32,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorAnalysisResult {
    pub keyword: String,
    pub my_content: ContentMetrics,
    /// Rank order: index 0 is the top result.
    pub top_blogs: Vec<ContentMetrics>,
    pub top_average: TopAverage,
    pub my_score: u8,
}

/// Averages analyzed pages. Returns `None` for an empty slice.
///
/// Numeric fields are the arithmetic mean rounded to the nearest integer;
/// `has_video` is true once [`VIDEO_MAJORITY_THRESHOLD`] pages have video.
#[must_use]
pub fn average_top_blogs(blogs: &[ContentMetrics]) -> Option<TopAverage> {
    if blogs.is_empty() {
        return None;
    }

    let video_count = blogs.iter().filter(|b| b.has_video).count();

    Some(TopAverage {
        word_count: rounded_mean(blogs.iter().map(|b| u64::from(b.word_count)), blogs.len()),
        image_count: rounded_mean(blogs.iter().map(|b| u64::from(b.image_count)), blogs.len()),
        has_video: video_count >= VIDEO_MAJORITY_THRESHOLD,
        keyword_frequency: rounded_mean(
            blogs.iter().map(|b| u64::from(b.keyword_frequency)),
            blogs.len(),
        ),
        score: u8::try_from(rounded_mean(
            blogs.iter().map(|b| u64::from(score_content(b))),
            blogs.len(),
        ))
        .unwrap_or(u8::MAX),
    })
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn rounded_mean(values: impl Iterator<Item = u64>, len: usize) -> u32 {
    let sum: u64 = values.sum();
    let mean = sum as f64 / len as f64;
    mean.round().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;
