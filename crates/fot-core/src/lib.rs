// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

pub mod autocomplete;
pub mod form;
pub mod loader;
pub mod options;
pub mod prediction;
pub mod scene;
pub mod settings;
pub mod submission;

use std::path::PathBuf;

pub use autocomplete::{AutocompleteField, Segment, Suggestion};
pub use form::{FormState, ValidationError};
pub use loader::{DataLoader, LoadError, LoadOutcome, OptionsOrigin, OptionsSource};
pub use options::{OptionCatalog, OptionRecord};
pub use prediction::{
    HttpPredictionBackend, PredictionBackend, PredictionError, PredictionRequest,
    PredictionResult, ResultPanel, Tone,
};
pub use settings::{Settings, SettingsError};
pub use submission::{Alert, SubmissionController, SubmitOutcome, UiState};

/// Directory holding `settings.json` and the GUI log file.
/// Falls back to the working directory when the platform offers no config dir.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "flightontime", "FlightOnTime")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
