use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geometry::DeckGeometry;
use crate::layout::LayoutThresholds;

/// Animation and timer durations, in milliseconds on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub counter_ms: u64,
    pub placeholder_ms: u64,
    pub search_busy_ms: u64,
    pub tagline_hold_ms: u64,
    pub walkthrough_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            counter_ms: 1800,
            placeholder_ms: 3200,
            search_busy_ms: 1300,
            tagline_hold_ms: 1140,
            walkthrough_ms: 24_000,
        }
    }
}

impl Timing {
    pub fn counter(&self) -> Duration {
        Duration::from_millis(self.counter_ms)
    }

    pub fn placeholder(&self) -> Duration {
        Duration::from_millis(self.placeholder_ms)
    }

    pub fn search_busy(&self) -> Duration {
        Duration::from_millis(self.search_busy_ms)
    }

    pub fn tagline_hold(&self) -> Duration {
        Duration::from_millis(self.tagline_hold_ms)
    }

    pub fn walkthrough(&self) -> Duration {
        Duration::from_millis(self.walkthrough_ms)
    }
}

/// Everything tunable about the landing page. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub reduced_motion: bool,
    pub layout: LayoutThresholds,
    pub geometry: DeckGeometry,
    pub timing: Timing,
}

impl LandingConfig {
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Read `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(Error::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
