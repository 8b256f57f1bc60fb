// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

mod common;

use fot_core::{
    Alert, FormState, HttpPredictionBackend, OptionCatalog, PredictionBackend, PredictionError,
    PredictionRequest, PredictionResult, SubmissionController, SubmitOutcome, Tone, UiState,
    ValidationError,
};
use std::cell::RefCell;

/// Backend that records every request and replays a canned answer.
struct FakeBackend {
    answer: fn() -> Result<PredictionResult, PredictionError>,
    calls: RefCell<Vec<PredictionRequest>>,
}

impl FakeBackend {
    fn new(answer: fn() -> Result<PredictionResult, PredictionError>) -> Self {
        Self {
            answer,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl PredictionBackend for FakeBackend {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        self.calls.borrow_mut().push(request.clone());
        (self.answer)()
    }
}

fn delayed() -> Result<PredictionResult, PredictionError> {
    Ok(PredictionResult {
        prediction: "RETRASADO".to_string(),
        probability: 0.82,
        details: None,
    })
}

fn unreachable() -> Result<PredictionResult, PredictionError> {
    Err(PredictionError::Unavailable("connection refused".to_string()))
}

fn filled_form() -> FormState {
    let mut form = FormState::new(OptionCatalog::fallback());
    form.carrier.on_input("united");
    form.carrier.select(0).unwrap();
    form.airport.on_input("ORD");
    form.airport.select(0).unwrap();
    form.date = "2026-11-02".to_string();
    form.time = "06:15".to_string();
    form
}

#[test]
fn test_empty_field_blocks_request() {
    let backend = FakeBackend::new(delayed);
    let mut controller = SubmissionController::new();
    let mut form = filled_form();
    form.time.clear();

    let outcome = controller.submit(&form, &backend);
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(Alert::Validation(ValidationError::MissingFields))
    );
    assert_eq!(Alert::Validation(ValidationError::MissingFields).message(), "Please complete all fields");
    assert!(backend.calls.borrow().is_empty());
    assert_eq!(controller.ui(), UiState::default());
}

#[test]
fn test_unselected_airport_blocks_request() {
    let backend = FakeBackend::new(delayed);
    let mut controller = SubmissionController::new();
    let mut form = filled_form();
    form.airport = FormState::new(OptionCatalog::fallback()).airport;
    form.airport.on_input("Chicago O'Hare International");

    assert!(matches!(
        controller.submit(&form, &backend),
        SubmitOutcome::Rejected(Alert::Validation(_))
    ));
    assert!(backend.calls.borrow().is_empty());
}

#[test]
fn test_delayed_prediction_renders_danger() {
    let backend = FakeBackend::new(delayed);
    let mut controller = SubmissionController::new();

    let outcome = controller.submit(&filled_form(), &backend);
    let SubmitOutcome::Rendered(panel) = outcome else {
        panic!("expected a rendered result, got {:?}", outcome);
    };
    assert_eq!(panel.tone, Tone::Danger);
    assert_eq!(panel.title, "HIGH RISK");
    assert_eq!(panel.percent, "82%");
    assert_eq!(panel.message, "Calculation complete.");

    let calls = backend.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].carrier_name, "United Air Lines Inc.");
    assert_eq!(calls[0].departing_airport, "Chicago O'Hare International");

    assert_eq!(
        controller.ui(),
        UiState {
            submit_visible: true,
            loader_visible: false,
            result_visible: true,
        }
    );
    assert_eq!(controller.panel(), Some(&panel));
}

#[test]
fn test_network_failure_restores_ui() {
    let backend = FakeBackend::new(unreachable);
    let mut controller = SubmissionController::new();

    let outcome = controller.submit(&filled_form(), &backend);
    assert_eq!(outcome, SubmitOutcome::Rejected(Alert::Connectivity));
    assert_eq!(controller.ui(), UiState::default());
    assert!(controller.panel().is_none());
}

#[test]
fn test_begin_shows_loader_until_finish() {
    let mut controller = SubmissionController::new();
    controller.begin(&filled_form()).unwrap();
    assert!(controller.is_loading());
    assert!(!controller.ui().submit_visible);

    controller.finish(delayed());
    assert!(!controller.is_loading());
    assert!(controller.ui().submit_visible);
}

#[test]
fn test_failure_hides_previous_result() {
    let mut controller = SubmissionController::new();
    controller.submit(&filled_form(), &FakeBackend::new(delayed));
    assert!(controller.panel().is_some());

    controller.submit(&filled_form(), &FakeBackend::new(unreachable));
    assert!(controller.panel().is_none());
}

#[test]
fn test_http_backend_posts_wire_body() {
    let body = r#"{"prediction": "PUNTUAL", "probability": 0.134, "details": "Low traffic"}"#;
    let (base, server) = common::serve_once("200 OK", body);
    let backend =
        HttpPredictionBackend::with_client(&format!("{}/predict", base), common::local_client());

    let mut controller = SubmissionController::new();
    let outcome = controller.submit(&filled_form(), &backend);
    let request = server.join().unwrap();

    assert!(request.starts_with("POST /predict"));
    assert!(request.contains(r#""CARRIER_NAME":"United Air Lines Inc.""#));
    assert!(request.contains(r#""DEPARTING_AIRPORT":"Chicago O'Hare International""#));
    assert!(request.contains(r#""FECHA":"2026-11-02""#));
    assert!(request.contains(r#""HORA":"06:15""#));

    let SubmitOutcome::Rendered(panel) = outcome else {
        panic!("expected a rendered result, got {:?}", outcome);
    };
    assert_eq!(panel.tone, Tone::Safe);
    assert_eq!(panel.title, "ON TIME");
    assert_eq!(panel.percent, "13%");
    assert_eq!(panel.message, "Low traffic");
}

#[test]
fn test_http_backend_server_error() {
    let (base, server) = common::serve_once("500 Internal Server Error", "{}");
    let backend =
        HttpPredictionBackend::with_client(&format!("{}/predict", base), common::local_client());

    let outcome = SubmissionController::new().submit(&filled_form(), &backend);
    server.join().unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected(Alert::Connectivity));
}

#[test]
fn test_http_backend_refused() {
    let backend = HttpPredictionBackend::with_client(&common::refused_url(), common::local_client());
    let request = filled_form().validate().unwrap();
    assert!(matches!(backend.predict(&request), Err(PredictionError::Http(_))));
}
