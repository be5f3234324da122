//! CLI configuration.
//!
//! Defaults, overlaid by `EVENTBOARD_*` environment variables, overlaid by
//! command-line flags in the binary.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::output::OutputFormat;
use crate::cli::{CliError, CliResult};
use crate::core::config::EngineConfig;

/// Default events file, relative to the working directory
pub const DEFAULT_EVENTS_FILE: &str = "events.json";

// ═══════════════════════════════════════════════════════════════════════════════
// CLI CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Events JSON file read by the listing commands
    pub events_file: PathBuf,
    /// Output format
    #[serde(skip)]
    pub format: OutputFormat,
    /// Colored text output
    pub color: bool,
    /// Engine sizes
    pub engine: EngineConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            events_file: PathBuf::from(DEFAULT_EVENTS_FILE),
            format: OutputFormat::Text,
            color: true,
            engine: EngineConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut config = Self {
            engine: EngineConfig::from_env(),
            ..Self::default()
        };

        if let Ok(file) = std::env::var("EVENTBOARD_EVENTS_FILE") {
            config.events_file = PathBuf::from(file);
        }

        if let Ok(format) = std::env::var("EVENTBOARD_FORMAT") {
            match format.parse() {
                Ok(format) => config.format = format,
                Err(e) => tracing::warn!("Ignoring EVENTBOARD_FORMAT: {}", e),
            }
        }

        if std::env::var_os("NO_COLOR").is_some() {
            config.color = false;
        }

        config
    }

    /// Override the events file
    pub fn with_events_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.events_file = path.into();
        self
    }

    /// Override the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Override the page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.engine.page_size = page_size;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.events_file.as_os_str().is_empty() {
            return Err(CliError::Config("Events file path cannot be empty".into()));
        }

        self.engine
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}
