// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use crate::loader::DEFAULT_OPTIONS_SOURCE;
use crate::prediction::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_MODEL_PATH: &str = "assets/models/a380.glb";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub options_source: String,
    pub model_path: PathBuf,
    /// Wait before the detailed model is loaded.
    pub asset_delay_ms: u64,
    /// Wait before the background fades in.
    pub reveal_delay_ms: u64,
    pub orbit_radius: f32,
    /// Z offset of the orbit centre.
    pub orbit_depth: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            options_source: DEFAULT_OPTIONS_SOURCE.to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            asset_delay_ms: 2000,
            reveal_delay_ms: 2500,
            orbit_radius: 3.0,
            orbit_depth: 0.0,
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        crate::get_config_root().join(SETTINGS_FILE)
    }

    /// Reads `path`. A missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::debug!("No settings file at {}; using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::default_path())
    }

    pub fn asset_delay(&self) -> Duration {
        Duration::from_millis(self.asset_delay_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}
