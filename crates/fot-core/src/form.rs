// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use crate::autocomplete::AutocompleteField;
use crate::options::OptionCatalog;
use crate::prediction::PredictionRequest;
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please complete all fields")]
    MissingFields,
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),
}

/// The four inputs of the prediction form.
#[derive(Debug, Clone)]
pub struct FormState {
    pub carrier: AutocompleteField,
    pub airport: AutocompleteField,
    pub date: String,
    pub time: String,
}

impl FormState {
    pub fn new(catalog: OptionCatalog) -> Self {
        Self {
            carrier: AutocompleteField::new("carrier", catalog.carriers),
            airport: AutocompleteField::new("airport", catalog.airports),
            date: String::new(),
            time: String::new(),
        }
    }

    /// Same as [`Self::new`] with the date pre-filled to today.
    pub fn with_today(catalog: OptionCatalog) -> Self {
        let mut form = Self::new(catalog);
        form.date = chrono::Local::now()
            .date_naive()
            .format(DATE_FORMAT)
            .to_string();
        log::debug!("Default date set to {}", form.date);
        form
    }

    pub fn install_catalog(&mut self, catalog: OptionCatalog) {
        self.carrier.set_records(catalog.carriers);
        self.airport.set_records(catalog.airports);
    }

    pub fn dismiss_suggestions(&mut self) {
        self.carrier.dismiss();
        self.airport.dismiss();
    }

    /// Builds the request body from the hidden values and the date/time text.
    pub fn validate(&self) -> Result<PredictionRequest, ValidationError> {
        let carrier = self.carrier.hidden_value();
        let airport = self.airport.hidden_value();
        let date = self.date.trim();
        let time = self.time.trim();

        if carrier.is_empty() || airport.is_empty() || date.is_empty() || time.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(date.to_string()))?;
        NaiveTime::parse_from_str(time, TIME_FORMAT)
            .map_err(|_| ValidationError::InvalidTime(time.to_string()))?;

        Ok(PredictionRequest {
            carrier_name: carrier.to_string(),
            departing_airport: airport.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        })
    }
}
