// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

//! Submit flow of the prediction form.
//!
//! [`SubmissionController::begin`] validates and flips the UI into loading
//! state; [`SubmissionController::finish`] maps the backend answer and
//! restores the UI. [`SubmissionController::submit`] chains both for callers
//! that can block.

use crate::form::{FormState, ValidationError};
use crate::prediction::{
    PredictionBackend, PredictionError, PredictionRequest, PredictionResult, ResultPanel,
};
use log::{error, info};

pub const CONNECTIVITY_MESSAGE: &str =
    "Error connecting to the server. Make sure the prediction service is running.";

/// Visibility of the submit button, the loader and the result box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub submit_visible: bool,
    pub loader_visible: bool,
    pub result_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            submit_visible: true,
            loader_visible: false,
            result_visible: false,
        }
    }
}

/// User-facing popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Validation(ValidationError),
    Connectivity,
}

impl Alert {
    pub fn message(&self) -> String {
        match self {
            Alert::Validation(e) => e.to_string(),
            Alert::Connectivity => CONNECTIVITY_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rendered(ResultPanel),
    Rejected(Alert),
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    ui: UiState,
    panel: Option<ResultPanel>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    /// Last rendered result, if the result box is showing.
    pub fn panel(&self) -> Option<&ResultPanel> {
        self.panel.as_ref().filter(|_| self.ui.result_visible)
    }

    pub fn is_loading(&self) -> bool {
        self.ui.loader_visible
    }

    /// Validates the form and enters loading state. On a validation error the
    /// UI is left untouched and nothing should be sent.
    pub fn begin(&mut self, form: &FormState) -> Result<PredictionRequest, Alert> {
        let request = form.validate().map_err(Alert::Validation)?;

        self.ui = UiState {
            submit_visible: false,
            loader_visible: true,
            result_visible: false,
        };
        info!("Sending prediction request");
        Ok(request)
    }

    pub fn finish(&mut self, result: Result<PredictionResult, PredictionError>) -> SubmitOutcome {
        self.ui.loader_visible = false;
        self.ui.submit_visible = true;

        match result {
            Ok(result) => {
                info!(
                    "Prediction received — prediction={} probability={}",
                    result.prediction, result.probability
                );
                let panel = ResultPanel::from_result(&result);
                self.ui.result_visible = true;
                self.panel = Some(panel.clone());
                SubmitOutcome::Rendered(panel)
            }
            Err(e) => {
                error!("Prediction failed: {}", e);
                SubmitOutcome::Rejected(Alert::Connectivity)
            }
        }
    }

    pub fn submit<B: PredictionBackend>(&mut self, form: &FormState, backend: &B) -> SubmitOutcome {
        match self.begin(form) {
            Ok(request) => {
                let result = backend.predict(&request);
                self.finish(result)
            }
            Err(alert) => SubmitOutcome::Rejected(alert),
        }
    }
}
