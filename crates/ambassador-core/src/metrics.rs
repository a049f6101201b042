//! Metric records consumed by the classifier and scorers.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Account-level blog metrics.
///
/// Percentages are expected in `[0, 100]`. Values outside that range are
/// accepted by the plain constructor and clamped by [`BlogMetrics::sanitized`]
/// before any rule is evaluated; use [`BlogMetrics::try_new`] to reject them
/// up front instead.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlogMetrics {
    pub recent_post_count: u32,
    pub index_error_rate: f64,
    pub keyword_exposure_rate: f64,
}

impl BlogMetrics {
    #[must_use]
    pub fn new(recent_post_count: u32, index_error_rate: f64, keyword_exposure_rate: f64) -> Self {
        Self {
            recent_post_count,
            index_error_rate,
            keyword_exposure_rate,
        }
    }

    /// Strict constructor: rejects NaN or percentages outside `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] naming the first offending field.
    pub fn try_new(
        recent_post_count: u32,
        index_error_rate: f64,
        keyword_exposure_rate: f64,
    ) -> Result<Self, CoreError> {
        check_percentage("index_error_rate", index_error_rate)?;
        check_percentage("keyword_exposure_rate", keyword_exposure_rate)?;
        Ok(Self::new(
            recent_post_count,
            index_error_rate,
            keyword_exposure_rate,
        ))
    }

    /// Returns a copy with both percentages clamped to `[0, 100]`.
    /// NaN becomes `0.0`.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            recent_post_count: self.recent_post_count,
            index_error_rate: clamp_percentage(self.index_error_rate),
            keyword_exposure_rate: clamp_percentage(self.keyword_exposure_rate),
        }
    }
}

fn check_percentage(field: &'static str, value: f64) -> Result<(), CoreError> {
    if value.is_nan() || !(0.0..=100.0).contains(&value) {
        return Err(CoreError::OutOfRange { field, value });
    }
    Ok(())
}

fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Page-level content attributes for one blog post or draft.
///
/// `url` is empty for the operator's own unpublished draft.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentMetrics {
    pub url: String,
    pub title: String,
    pub word_count: u32,
    pub image_count: u32,
    pub has_video: bool,
    pub keyword_frequency: u32,
}
