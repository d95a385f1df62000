//! Analysis and report configuration.

use crate::error::{Error, Result};
use crate::layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning knobs for the summaries placed in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Absolute z-score above which a value is an outlier
    pub z_score_cutoff: f64,

    /// Relative tolerance around the balanced class proportion
    pub imbalance_threshold: f64,

    /// Unique-category count above which a column gets a warning
    pub max_categories: usize,

    /// Rows shown by the head/tail observation tables
    pub observation_rows: usize,

    /// Histogram bins in numeric charts
    pub histogram_bins: usize,
}

impl AnalysisConfig {
    /// Create an analysis config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the z-score cutoff.
    pub fn with_z_score_cutoff(mut self, cutoff: f64) -> Self {
        self.z_score_cutoff = cutoff;
        self
    }

    /// Set the default imbalance threshold.
    pub fn with_imbalance_threshold(mut self, threshold: f64) -> Self {
        self.imbalance_threshold = threshold;
        self
    }

    /// Set the category warning limit.
    pub fn with_max_categories(mut self, max: usize) -> Self {
        self.max_categories = max;
        self
    }

    /// Set the number of observation rows.
    pub fn with_observation_rows(mut self, rows: usize) -> Self {
        self.observation_rows = rows;
        self
    }

    /// Set the histogram bin count.
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Check the configuration for unusable values.
    pub fn validate(&self) -> Result<()> {
        if !self.z_score_cutoff.is_finite() || self.z_score_cutoff <= 0.0 {
            return Err(Error::Validation(format!(
                "'z_score_cutoff' must be a positive number, got {}",
                self.z_score_cutoff
            )));
        }
        if !(0.0..=1.0).contains(&self.imbalance_threshold) {
            return Err(Error::Validation(
                "Threshold must be between 0 and 1.".to_string(),
            ));
        }
        if self.max_categories == 0 {
            return Err(Error::Validation(
                "'max_categories' must be at least 1".to_string(),
            ));
        }
        if self.histogram_bins == 0 {
            return Err(Error::Validation(
                "'histogram_bins' must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            z_score_cutoff: 3.0,
            imbalance_threshold: 0.2,
            max_categories: 10,
            observation_rows: 5,
            histogram_bins: 20,
        }
    }
}

/// Layout and analysis settings for one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Page geometry and typography
    pub layout: LayoutConfig,

    /// Summary tuning
    pub analysis: AnalysisConfig,
}

impl ReportConfig {
    /// Load a config from a JSON file; missing fields take their defaults.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        let config: ReportConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate both halves.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.analysis.validate()
    }
}
