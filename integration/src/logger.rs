//! Unified logger for centralized logging configuration

use tab_dedup_core::errors::{ConfigurationError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive
    pub level: String,

    /// Include thread IDs
    pub include_thread_ids: bool,

    /// Include target module paths
    pub include_targets: bool,

    /// Colored output
    pub ansi: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            include_thread_ids: false,
            include_targets: true,
            ansi: true,
        }
    }
}

impl LoggerConfig {
    pub fn with_level(level: &str) -> Self {
        Self {
            level: level.to_string(),
            ..Self::default()
        }
    }

    /// Check that the level parses as a filter directive
    pub fn validate(&self) -> Result<()> {
        self.filter().map(|_| ())
    }

    fn filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.level).map_err(|_| {
            ConfigurationError::InvalidLogLevel {
                level: self.level.clone(),
            }
            .into()
        })
    }
}

/// Unified logger
pub struct UnifiedLogger;

impl UnifiedLogger {
    /// Initialize the global logger
    ///
    /// `RUST_LOG` takes precedence over the configured level. Returns
    /// `Ok(false)` when a global subscriber was already installed.
    pub fn init(config: LoggerConfig) -> Result<bool> {
        let configured = config.filter()?;
        let filter = EnvFilter::try_from_default_env().unwrap_or(configured);

        let console_layer = fmt::layer()
            .with_target(config.include_targets)
            .with_thread_ids(config.include_thread_ids)
            .with_ansi(config.ansi);

        let installed = tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .try_init()
            .is_ok();

        if installed {
            tracing::info!("Logging initialized with level: {}", config.level);
        }

        Ok(installed)
    }

    /// Initialize with default configuration
    pub fn init_default() -> Result<bool> {
        Self::init(LoggerConfig::default())
    }
}
