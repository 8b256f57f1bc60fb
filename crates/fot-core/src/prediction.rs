// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use log::{debug, error};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://lay-represented-beverly-mix.trycloudflare.com/predict";

/// Verdict string the model uses for a delayed flight.
pub const DELAYED: &str = "RETRASADO";

#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Prediction service unavailable: {0}")]
    Unavailable(String),
}

/// Body of the POST. Field names are fixed by the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "CARRIER_NAME")]
    pub carrier_name: String,
    #[serde(rename = "DEPARTING_AIRPORT")]
    pub departing_airport: String,
    #[serde(rename = "FECHA")]
    pub date: String,
    #[serde(rename = "HORA")]
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    pub probability: f64,
    #[serde(default)]
    pub details: Option<String>,
}

impl PredictionResult {
    pub fn is_delayed(&self) -> bool {
        self.prediction == DELAYED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Danger,
    Safe,
}

/// What the result box shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPanel {
    pub tone: Tone,
    pub title: String,
    pub percent: String,
    pub message: String,
}

impl ResultPanel {
    pub fn from_result(result: &PredictionResult) -> Self {
        let (tone, title) = if result.is_delayed() {
            (Tone::Danger, "HIGH RISK")
        } else {
            (Tone::Safe, "ON TIME")
        };

        Self {
            tone,
            title: title.to_string(),
            percent: format!("{:.0}%", (result.probability * 100.0).round()),
            message: result
                .details
                .clone()
                .unwrap_or_else(|| "Calculation complete.".to_string()),
        }
    }
}

/// Transport for one prediction call.
pub trait PredictionBackend {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError>;
}

/// reqwest transport. One attempt, no timeout.
pub struct HttpPredictionBackend {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpPredictionBackend {
    pub fn new(endpoint: &str) -> Self {
        Self::with_client(endpoint, reqwest::blocking::Client::new())
    }

    pub fn with_client(endpoint: &str, client: reqwest::blocking::Client) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            client,
        }
    }
}

impl PredictionBackend for HttpPredictionBackend {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        debug!("POST {} — body={:?}", self.endpoint, request);
        let response = self.client.post(&self.endpoint).json(request).send()?;

        let status = response.status();
        if !status.is_success() {
            error!("Prediction service answered {} — url={}", status, self.endpoint);
            return Err(PredictionError::Unavailable(status.to_string()));
        }

        Ok(response.json::<PredictionResult>()?)
    }
}
