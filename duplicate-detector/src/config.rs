//! Analyzer configuration

use serde::{Deserialize, Serialize};
use tab_dedup_core::{ConfigurationError, Result};

/// Default similarity threshold for threshold-gated classifier rules
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Maximum number of tabs that enter the pairwise comparison pass
///
/// Pairwise comparison is quadratic. Tabs beyond this many (in input order)
/// are not compared and are reported in
/// [`AnalysisResult::uncompared_tab_count`](tab_dedup_core::AnalysisResult).
pub const MAX_COMPARISON_POOL: usize = 100;

/// Configuration for the tab analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Similarity threshold (0 - 100)
    pub threshold: u8,
    /// Cap on the pairwise comparison pool
    pub max_comparison_pool: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_comparison_pool: MAX_COMPARISON_POOL,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_threshold(threshold: u8) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Check that the configuration values are in range
    pub fn validate(&self) -> Result<()> {
        if self.threshold > 100 {
            return Err(ConfigurationError::InvalidThreshold {
                threshold: self.threshold as u16,
            }
            .into());
        }
        if self.max_comparison_pool == 0 {
            return Err(ConfigurationError::InvalidPoolSize {
                size: self.max_comparison_pool,
            }
            .into());
        }
        Ok(())
    }
}
