//! View-state configuration
//!
//! Loaded once at application start, usually from a TOML file, and handed
//! to [`StoreContext::new`](crate::StoreContext::new).

use crate::error::ConfigError;
use crate::types::ViewMode;
use lex_store::{ReentrancyPolicy, StoreConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for every domain store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Re-entrant update handling for all stores
    pub reentrancy: ReentrancyPolicy,
    /// Log every transition at debug level
    pub trace_transitions: bool,
    /// Recent research queries kept
    pub max_recent_searches: usize,
    /// Initial view mode of the documents area
    pub default_document_view: ViewMode,
    /// Initial view mode of the research area
    pub default_research_view: ViewMode,
    /// Page size for remote list queries
    pub page_size: u32,
}

impl ViewsConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With re-entrancy policy
    #[inline]
    #[must_use]
    pub fn with_reentrancy(mut self, policy: ReentrancyPolicy) -> Self {
        self.reentrancy = policy;
        self
    }

    /// With transition tracing
    #[inline]
    #[must_use]
    pub fn with_trace_transitions(mut self, enabled: bool) -> Self {
        self.trace_transitions = enabled;
        self
    }

    /// With recent search capacity
    #[inline]
    #[must_use]
    pub fn with_max_recent_searches(mut self, max: usize) -> Self {
        self.max_recent_searches = max;
        self
    }

    /// With default document view
    #[inline]
    #[must_use]
    pub fn with_default_document_view(mut self, mode: ViewMode) -> Self {
        self.default_document_view = mode;
        self
    }

    /// With page size
    #[inline]
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Store-level configuration derived from this one
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new()
            .with_reentrancy(self.reentrancy)
            .with_trace_transitions(self.trace_transitions)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for a zero capacity or page size
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_recent_searches == 0 {
            return Err(ConfigError::invalid("max_recent_searches", "must be at least 1"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::invalid("page_size", "must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// Returns error on malformed TOML or invalid values
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded views config");
        Ok(config)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            reentrancy: ReentrancyPolicy::Queue,
            trace_transitions: false,
            max_recent_searches: 10,
            default_document_view: ViewMode::List,
            default_research_view: ViewMode::List,
            page_size: 25,
        }
    }
}
