//! Gallery configuration, constructible in code or loaded from a TOML file.
//!
//! ```toml
//! sources = ["a.jpg", "b.jpg", "c.jpg"]
//! interval_ms = 3000
//! renderer = "slide"
//!
//! [[layout]]
//! position = { x = 0, y = 0 }
//! size = { width = 400, height = 300 }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INTERVAL, DEFAULT_LOAD_TIMEOUT, DEFAULT_RENDERER};
use crate::error::{GalleryError, Result};
use crate::layout::BlockGeometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    pub sources: Vec<String>,
    pub layout: Vec<BlockGeometry>,
    /// Milliseconds between block changes; missing or non-positive means the default.
    #[serde(default)]
    pub interval_ms: Option<i64>,
    #[serde(default)]
    pub renderer: Option<String>,
    /// Milliseconds before pending sources are abandoned; `0` waits forever.
    #[serde(default)]
    pub load_timeout_ms: Option<u64>,
}

impl GalleryConfig {
    pub fn new(sources: Vec<String>, layout: Vec<BlockGeometry>) -> Self {
        Self {
            sources,
            layout,
            interval_ms: None,
            renderer: None,
            load_timeout_ms: None,
        }
    }

    pub fn with_interval_ms(mut self, interval_ms: i64) -> Self {
        self.interval_ms = Some(interval_ms);
        self
    }

    pub fn with_renderer(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    pub fn with_load_timeout_ms(mut self, load_timeout_ms: u64) -> Self {
        self.load_timeout_ms = Some(load_timeout_ms);
        self
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        match self.interval_ms {
            Some(ms) if ms > 0 => Duration::from_millis(ms as u64),
            _ => DEFAULT_INTERVAL,
        }
    }

    #[must_use]
    pub fn renderer_name(&self) -> &str {
        self.renderer.as_deref().unwrap_or(DEFAULT_RENDERER)
    }

    #[must_use]
    pub fn load_timeout(&self) -> Option<Duration> {
        match self.load_timeout_ms {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => Some(DEFAULT_LOAD_TIMEOUT),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| GalleryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
