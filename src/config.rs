//! Runtime configuration shared by the binaries
//!
//! Populated from command-line flags, falling back to environment variables:
//!   SALES_ROWS    - rows per generated table (default: 500)
//!   SALES_SEED    - random seed for reproducible tables (optional)

use anyhow::Result;
use clap::Args;

use crate::classify::{ThresholdClassifier, EXCELLENT_THRESHOLD, GOOD_THRESHOLD, REGULAR_THRESHOLD};
use crate::generator::DEFAULT_ROW_COUNT;

#[derive(Debug, Clone, Args)]
pub struct DashboardConfig {
    /// Rows per generated table
    #[arg(long, env = "SALES_ROWS", default_value_t = DEFAULT_ROW_COUNT)]
    pub rows: usize,

    /// Random seed for reproducibility
    #[arg(long, env = "SALES_SEED")]
    pub seed: Option<u64>,

    /// Lowest total rated Excellent
    #[arg(long, default_value_t = EXCELLENT_THRESHOLD)]
    pub excellent_threshold: f64,

    /// Lowest total rated Good
    #[arg(long, default_value_t = GOOD_THRESHOLD)]
    pub good_threshold: f64,

    /// Lowest total rated Regular
    #[arg(long, default_value_t = REGULAR_THRESHOLD)]
    pub regular_threshold: f64,
}

impl DashboardConfig {
    pub fn classifier(&self) -> Result<ThresholdClassifier> {
        ThresholdClassifier::new(self.excellent_threshold, self.good_threshold, self.regular_threshold)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROW_COUNT,
            seed: None,
            excellent_threshold: EXCELLENT_THRESHOLD,
            good_threshold: GOOD_THRESHOLD,
            regular_threshold: REGULAR_THRESHOLD,
        }
    }
}
