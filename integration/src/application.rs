//! Main application module
//!
//! Provides high-level Application API

use crate::{AppConfig, AppContext, LoggerConfig, UnifiedLogger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tab_dedup_core::errors::{Result, SnapshotError, SystemError};
use tab_dedup_core::types::*;
use tracing::{debug, info};

/// Analysis result with timing information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    /// Number of tabs in the snapshot, before filtering
    pub tab_count: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// Tab snapshot as sent by a host: a bare list or wrapped in `{"tabs": ...}`
#[derive(Deserialize)]
#[serde(untagged)]
enum TabSnapshot {
    List(Vec<TabRecord>),
    Wrapped { tabs: Vec<TabRecord> },
}

impl From<TabSnapshot> for Vec<TabRecord> {
    fn from(snapshot: TabSnapshot) -> Self {
        match snapshot {
            TabSnapshot::List(tabs) | TabSnapshot::Wrapped { tabs } => tabs,
        }
    }
}

/// Main application
#[derive(Clone)]
pub struct Application {
    /// Application context
    context: Arc<AppContext>,
}

impl Application {
    /// Create and initialize a new application
    pub fn new(config: AppConfig) -> Result<Self> {
        let context = AppContext::new(config.clone())?;

        // Another subscriber may already be installed by the host
        if !UnifiedLogger::init(LoggerConfig::with_level(&config.log_level))? {
            debug!("Global logger already installed, keeping it");
        }

        info!(
            "Duplicate tab detector ready (threshold {}, pool cap {})",
            config.analyzer.threshold, config.analyzer.max_comparison_pool
        );

        Ok(Self {
            context: Arc::new(context),
        })
    }

    /// Get the application context
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Change the similarity threshold for later analyses
    pub async fn set_threshold(&self, threshold: u8) -> Result<()> {
        self.context.set_threshold(threshold).await
    }

    /// Analyze a tab snapshot on the blocking thread pool
    ///
    /// Independent snapshots can be analyzed concurrently; each call works on
    /// its own data.
    pub async fn analyze(&self, tabs: Vec<TabRecord>) -> Result<AnalysisReport> {
        let analyzer = self.context.analyzer().await;
        let tab_count = tabs.len();

        let started_at = Utc::now();
        let start = std::time::Instant::now();

        let result = tokio::task::spawn_blocking(move || analyzer.analyze(&tabs))
            .await
            .map_err(|e| SystemError::Runtime {
                details: format!("analysis task failed: {}", e),
            })?;

        let report = AnalysisReport {
            result,
            tab_count,
            started_at,
            completed_at: Utc::now(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Analyzed {} tabs in {}ms: {} duplicate tabs, {} similar pairs",
            report.tab_count,
            report.duration_ms,
            report.result.total_duplicate_tab_count,
            report.result.total_similar_pair_count
        );

        Ok(report)
    }

    /// Decode a JSON tab snapshot and analyze it
    pub async fn analyze_json(&self, json: &str) -> Result<AnalysisReport> {
        let snapshot: TabSnapshot =
            serde_json::from_str(json).map_err(|e| SnapshotError::Malformed {
                reason: e.to_string(),
            })?;
        self.analyze(snapshot.into()).await
    }
}
