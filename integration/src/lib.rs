//! Integration layer for the duplicate tab detector
//!
//! Holds the host-facing pieces around the pure engine: configuration
//! loading, logging setup and running analyses off the caller's task.

use duplicate_detector::{AnalyzerConfig, TabAnalyzer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tab_dedup_core::errors::Result;
use tokio::sync::RwLock;
use tracing::info;

pub mod application;
pub mod logger;

pub use application::{AnalysisReport, Application};
pub use logger::{LoggerConfig, UnifiedLogger};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Analyzer settings (threshold, comparison pool cap)
    pub analyzer: AnalyzerConfig,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, missing fields take defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check that all values are in range
    pub fn validate(&self) -> Result<()> {
        self.analyzer.validate()?;
        LoggerConfig::with_level(&self.log_level).validate()
    }
}

/// Application context that holds the shared configuration
pub struct AppContext {
    /// Application configuration
    pub config: Arc<RwLock<AppConfig>>,
}

impl AppContext {
    /// Create a new application context
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    /// Analyzer for the current configuration
    pub async fn analyzer(&self) -> TabAnalyzer {
        TabAnalyzer::with_config(self.config.read().await.analyzer.clone())
    }

    /// Change the similarity threshold used by later analyses
    pub async fn set_threshold(&self, threshold: u8) -> Result<()> {
        let analyzer = AnalyzerConfig {
            threshold,
            ..self.config.read().await.analyzer.clone()
        };
        analyzer.validate()?;

        self.config.write().await.analyzer = analyzer;
        info!("Similarity threshold set to {}", threshold);
        Ok(())
    }
}
