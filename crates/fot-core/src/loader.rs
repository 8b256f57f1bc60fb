// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use crate::options::OptionCatalog;
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_OPTIONS_SOURCE: &str = "assets/frontend_options.json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed options JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where `frontend_options.json` lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsSource {
    Url(String),
    File(PathBuf),
}

impl OptionsSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            OptionsSource::Url(location.trim().to_string())
        } else {
            OptionsSource::File(PathBuf::from(location.trim()))
        }
    }
}

impl Default for OptionsSource {
    fn default() -> Self {
        Self::parse(DEFAULT_OPTIONS_SOURCE)
    }
}

impl fmt::Display for OptionsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsSource::Url(url) => write!(f, "{}", url),
            OptionsSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsOrigin {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub catalog: OptionCatalog,
    pub origin: OptionsOrigin,
}

pub struct DataLoader {
    source: OptionsSource,
    client: Option<reqwest::blocking::Client>,
}

impl DataLoader {
    pub fn new(source: OptionsSource) -> Self {
        Self {
            source,
            client: None,
        }
    }

    /// Uses `client` for URL sources instead of a default one.
    pub fn with_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn source(&self) -> &OptionsSource {
        &self.source
    }

    /// Single attempt at the configured source. No retries.
    pub fn fetch(&self) -> Result<OptionCatalog, LoadError> {
        let content = match &self.source {
            OptionsSource::Url(url) => {
                debug!("Fetching options — url={}", url);
                let client = self.client.clone().unwrap_or_default();
                client.get(url).send()?.error_for_status()?.text()?
            }
            OptionsSource::File(path) => {
                debug!("Reading options — path={}", path.display());
                fs::read_to_string(path)?
            }
        };

        Ok(OptionCatalog::from_json(&content)?)
    }

    /// Loads the catalog, substituting the built-in list on any failure.
    pub fn load(&self) -> LoadOutcome {
        match self.fetch() {
            Ok(catalog) => {
                info!(
                    "Options loaded from {} — airports={} carriers={}",
                    self.source,
                    catalog.airports.len(),
                    catalog.carriers.len()
                );
                LoadOutcome {
                    catalog,
                    origin: OptionsOrigin::Remote,
                }
            }
            Err(e) => {
                warn!(
                    "Could not load options from {}; using built-in list: {}",
                    self.source, e
                );
                LoadOutcome {
                    catalog: OptionCatalog::fallback(),
                    origin: OptionsOrigin::Fallback,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            OptionsSource::parse("https://example.com/options.json"),
            OptionsSource::Url("https://example.com/options.json".to_string())
        );
        assert_eq!(
            OptionsSource::parse("HTTP://EXAMPLE.COM/o.json"),
            OptionsSource::Url("HTTP://EXAMPLE.COM/o.json".to_string())
        );
        assert_eq!(
            OptionsSource::parse("assets/frontend_options.json"),
            OptionsSource::File(PathBuf::from("assets/frontend_options.json"))
        );
    }

    #[test]
    fn test_default_source() {
        assert_eq!(OptionsSource::default().to_string(), DEFAULT_OPTIONS_SOURCE);
    }
}
