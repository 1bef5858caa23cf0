use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::controller::{disclosure::DEFAULT_TRANSITION, rows::RowPolicy};

pub const CONFIG_ENV: &str = "MARQUEE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "marquee.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Logical pixels.
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub viewport: Viewport,
    /// Expandable section animation length.
    pub transition_ms: u64,
    /// Downloaded posters land here before Slint decodes them. Never read back.
    pub image_staging_dir: PathBuf,
    pub rows: RowPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/movies.json"),
            viewport: Viewport::default(),
            transition_ms: DEFAULT_TRANSITION.as_millis() as u64,
            image_staging_dir: std::env::temp_dir().join("marquee-staging"),
            rows: RowPolicy::default(),
        }
    }
}

impl AppConfig {
    /// A missing file means defaults. A present but broken file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load(&path)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}
