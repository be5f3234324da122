//! Engine configuration.
//!
//! Listing sizes and the dashboard's running-event window. Everything has a
//! default matching the event pages; overrides come from JSON files or the
//! environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::utils::constants::*;
use crate::utils::validation::{validate_limit, validate_page_size};

// ═══════════════════════════════════════════════════════════════════════════════
// ENGINE CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Tunable sizes used by the query engine and the insights helpers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Events per page in the upcoming-events list
    pub page_size: usize,

    /// Events in the home page gallery
    pub featured_limit: usize,

    /// Related events shown on an event page
    pub related_limit: usize,

    /// Recent events on the dashboard
    pub recent_limit: usize,

    /// Hours after its start during which an event counts as running
    pub running_window_hours: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            featured_limit: DEFAULT_FEATURED_LIMIT,
            related_limit: DEFAULT_RELATED_LIMIT,
            recent_limit: DEFAULT_RECENT_LIMIT,
            running_window_hours: DEFAULT_RUNNING_WINDOW_HOURS,
        }
    }
}

impl EngineConfig {
    /// Create with a custom page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Overlay `EVENTBOARD_PAGE_SIZE` from the environment, if set and numeric
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(size) = std::env::var("EVENTBOARD_PAGE_SIZE") {
            match size.parse() {
                Ok(size) => config.page_size = size,
                Err(_) => tracing::warn!("Ignoring non-numeric EVENTBOARD_PAGE_SIZE={}", size),
            }
        }

        config
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Internal(format!("reading {}: {}", path.as_ref().display(), e)))?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Internal(e.to_string()))?;
        }

        std::fs::write(path.as_ref(), content)
            .map_err(|e| Error::Internal(e.to_string()))
    }

    /// Validate that every size is positive
    pub fn validate(&self) -> Result<()> {
        validate_page_size(self.page_size)?;
        validate_limit(self.featured_limit, "featured_limit")?;
        validate_limit(self.related_limit, "related_limit")?;
        validate_limit(self.recent_limit, "recent_limit")?;
        validate_limit(self.running_window_hours as usize, "running_window_hours")
    }
}
