use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::neighbors::NeighborSearch;

pub const DEFAULT_MAX_PER_CLUSTER: usize = 3;
pub const DEFAULT_TOP_K: usize = 20;
pub const DEFAULT_NGRAM_MIN: usize = 3;
pub const DEFAULT_NGRAM_MAX: usize = 5;

/// Named similarity thresholds, trading false merges against missed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPreset {
    /// Fewest false merges.
    Strict,
    #[default]
    Normal,
    /// Fewest missed duplicates.
    Loose,
}

impl ThresholdPreset {
    pub fn value(self) -> f64 {
        match self {
            ThresholdPreset::Strict => 0.8,
            ThresholdPreset::Normal => 0.65,
            ThresholdPreset::Loose => 0.5,
        }
    }
}

impl fmt::Display for ThresholdPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdPreset::Strict => write!(f, "strict"),
            ThresholdPreset::Normal => write!(f, "normal"),
            ThresholdPreset::Loose => write!(f, "loose"),
        }
    }
}

impl FromStr for ThresholdPreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ThresholdPreset::Strict),
            "normal" => Ok(ThresholdPreset::Normal),
            "loose" => Ok(ThresholdPreset::Loose),
            other => bail!(
                "Unknown threshold preset: {} (expected strict, normal or loose)",
                other
            ),
        }
    }
}

/// Tuning for one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupConfig {
    /// Minimum cosine similarity for two articles to be merged.
    pub threshold: f64,
    pub max_per_cluster: usize,
    pub top_k: usize,
    pub ngram_min: usize,
    pub ngram_max: usize,
    pub neighbor_search: NeighborSearch,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            threshold: ThresholdPreset::default().value(),
            max_per_cluster: DEFAULT_MAX_PER_CLUSTER,
            top_k: DEFAULT_TOP_K,
            ngram_min: DEFAULT_NGRAM_MIN,
            ngram_max: DEFAULT_NGRAM_MAX,
            neighbor_search: NeighborSearch::default(),
        }
    }
}

impl DedupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preset(mut self, preset: ThresholdPreset) -> Self {
        self.threshold = preset.value();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_per_cluster(mut self, max_per_cluster: usize) -> Self {
        self.max_per_cluster = max_per_cluster;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_ngram_range(mut self, ngram_min: usize, ngram_max: usize) -> Self {
        self.ngram_min = ngram_min;
        self.ngram_max = ngram_max;
        self
    }

    pub fn with_neighbor_search(mut self, neighbor_search: NeighborSearch) -> Self {
        self.neighbor_search = neighbor_search;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            bail!("Similarity threshold must be within [0, 1], got {}", self.threshold);
        }
        if self.max_per_cluster == 0 {
            bail!("max_per_cluster must be at least 1");
        }
        if self.top_k == 0 {
            bail!("top_k must be at least 1");
        }
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            bail!(
                "Invalid n-gram range {}-{}: need 1 <= min <= max",
                self.ngram_min,
                self.ngram_max
            );
        }
        Ok(())
    }
}

/// Parse a threshold given as a preset name or a number in [0, 1].
pub fn parse_threshold(s: &str) -> Result<f64> {
    if let Ok(preset) = s.parse::<ThresholdPreset>() {
        return Ok(preset.value());
    }
    let value: f64 = s.trim().parse().map_err(|_| {
        anyhow::anyhow!(
            "Invalid threshold {:?}: expected strict, normal, loose or a number",
            s
        )
    })?;
    if !(0.0..=1.0).contains(&value) {
        bail!("Similarity threshold must be within [0, 1], got {}", value);
    }
    Ok(value)
}

/// Parse an n-gram range written as `"3-5"` or `"3..5"`.
pub fn parse_ngram_range(s: &str) -> Result<(usize, usize)> {
    let (min, max) = s
        .split_once("..")
        .or_else(|| s.split_once('-'))
        .ok_or_else(|| anyhow::anyhow!("Invalid n-gram range {:?}, expected MIN-MAX", s))?;
    let min: usize = min.trim().parse()?;
    let max: usize = max.trim().parse()?;
    if min == 0 || min > max {
        bail!("Invalid n-gram range {}-{}: need 1 <= min <= max", min, max);
    }
    Ok((min, max))
}
