//! Performance tiers for salesperson totals

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the Excellent tier
pub const EXCELLENT_THRESHOLD: f64 = 50_000.0;
/// Lower bound (inclusive) of the Good tier
pub const GOOD_THRESHOLD: f64 = 30_000.0;
/// Lower bound (inclusive) of the Regular tier
pub const REGULAR_THRESHOLD: f64 = 15_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceTier {
    Excellent,
    Good,
    Regular,
    Low,
}

impl PerformanceTier {
    /// Best tier first
    pub const ALL: [PerformanceTier; 4] = [
        PerformanceTier::Excellent,
        PerformanceTier::Good,
        PerformanceTier::Regular,
        PerformanceTier::Low,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PerformanceTier::Excellent => "Excellent",
            PerformanceTier::Good => "Good",
            PerformanceTier::Regular => "Regular",
            PerformanceTier::Low => "Low",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a sales total to a tier
pub trait Classifier {
    fn classify(&self, total: f64) -> PerformanceTier;
}

/// Tiers by inclusive lower bounds. Anything below `regular`, including NaN, is Low.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdClassifier {
    pub excellent: f64,
    pub good: f64,
    pub regular: f64,
}

impl ThresholdClassifier {
    pub fn new(excellent: f64, good: f64, regular: f64) -> Result<Self> {
        ensure!(
            excellent.is_finite() && good.is_finite() && regular.is_finite(),
            "tier thresholds must be finite"
        );
        ensure!(
            excellent > good && good > regular,
            "tier thresholds must be strictly descending, got {} / {} / {}",
            excellent,
            good,
            regular
        );
        Ok(Self {
            excellent,
            good,
            regular,
        })
    }
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self {
            excellent: EXCELLENT_THRESHOLD,
            good: GOOD_THRESHOLD,
            regular: REGULAR_THRESHOLD,
        }
    }
}

impl Classifier for ThresholdClassifier {
    fn classify(&self, total: f64) -> PerformanceTier {
        if total >= self.excellent {
            PerformanceTier::Excellent
        } else if total >= self.good {
            PerformanceTier::Good
        } else if total >= self.regular {
            PerformanceTier::Regular
        } else {
            PerformanceTier::Low
        }
    }
}

/// Classify with the standard thresholds
pub fn classify(total: f64) -> PerformanceTier {
    ThresholdClassifier::default().classify(total)
}
