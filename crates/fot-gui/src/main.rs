// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use fot_core::scene::glb::{load_glb, GlbAsset};
use fot_core::scene::{Abort, Background, Orbit, Scene};
use fot_core::{
    get_config_root, DataLoader, FormState, HttpPredictionBackend, LoadOutcome, OptionCatalog,
    OptionsOrigin, OptionsSource, PredictionBackend, PredictionError, PredictionRequest,
    PredictionResult, Settings, SubmissionController, SubmitOutcome,
};
use form::FieldId;
use iced::widget::{canvas, center, container, stack};
use iced::{
    event, mouse, task, window, Element, Event, Length, Point, Rectangle, Size, Subscription,
    Task, Theme,
};
use log::{error, info, warn, LevelFilter};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Instant;

mod background;
mod form;
mod style;

const WINDOW_SIZE: Size = Size::new(1280.0, 800.0);
const LOG_FILE: &str = "fot-gui.log";

fn init_logging() {
    let root = get_config_root();
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    match fs::create_dir_all(&root).and_then(|_| File::create(root.join(LOG_FILE))) {
        Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file)),
        Err(e) => eprintln!("Could not open log file in {}: {}", root.display(), e),
    }
    let _ = CombinedLogger::init(loggers);
}

fn main() -> iced::Result {
    init_logging();

    iced::application("FlightOnTime", App::update, App::view)
        .subscription(App::subscription)
        .theme(|_| Theme::Dark)
        .window(window::Settings {
            size: WINDOW_SIZE,
            exit_on_close_request: false,
            ..window::Settings::default()
        })
        .run_with(App::new)
}

#[derive(Debug, Clone)]
enum Message {
    // Form
    OptionsLoaded(LoadOutcome),
    CarrierInput(String),
    CarrierPicked(usize),
    AirportInput(String),
    AirportPicked(usize),
    DateChanged(String),
    TimeChanged(String),
    CursorMoved(Point),
    MousePressed,
    FieldBounds(FieldId, Option<Rectangle>, Point),

    // Submission
    Submit,
    PredictionDone(Result<PredictionResult, String>),
    AlertClosed,

    // Background
    Frame(Instant),
    Resized(Size),
    Reveal,
    AssetLoaded(Result<GlbAsset, String>),
    CloseRequested(window::Id),
}

/// Abort handle of the delayed model swap.
struct AssetJob(task::Handle);

impl Abort for AssetJob {
    fn abort(&self) {
        self.0.abort();
    }
}

struct App {
    settings: Settings,
    form: FormState,
    submission: SubmissionController,
    background: Background,
    cursor: Option<Point>,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load().unwrap_or_else(|e| {
            warn!("Ignoring settings: {}", e);
            Settings::default()
        });
        info!(
            "Starting — endpoint={} options={}",
            settings.endpoint, settings.options_source
        );

        let mut scene = Scene::new(Orbit {
            radius: settings.orbit_radius,
            depth: settings.orbit_depth,
        });
        scene.resize(WINDOW_SIZE.width, WINDOW_SIZE.height);

        let mut app = Self {
            form: FormState::with_today(OptionCatalog::default()),
            submission: SubmissionController::new(),
            background: Background::new(scene),
            settings,
            cursor: None,
        };

        let source = OptionsSource::parse(&app.settings.options_source);
        let delay = app.settings.asset_delay();
        let reveal = app.settings.reveal_delay();
        let model_path = app.settings.model_path.clone();

        let (asset_task, handle) = Task::perform(
            async move {
                tokio::time::sleep(delay).await;
                load_model(model_path).await
            },
            Message::AssetLoaded,
        )
        .abortable();
        app.background.set_pending_asset(Box::new(AssetJob(handle)));

        let startup = Task::batch(vec![
            Task::perform(load_options(source), Message::OptionsLoaded),
            Task::perform(
                async move { tokio::time::sleep(reveal).await },
                |_| Message::Reveal,
            ),
            asset_task,
        ]);
        (app, startup)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OptionsLoaded(outcome) => {
                info!("Options ready ({:?})", outcome.origin);
                self.form.install_catalog(outcome.catalog);
                Task::none()
            }
            Message::CarrierInput(value) => {
                self.form.airport.dismiss();
                self.form.carrier.on_input(&value);
                Task::none()
            }
            Message::CarrierPicked(position) => {
                self.form.carrier.select(position);
                Task::none()
            }
            Message::AirportInput(value) => {
                self.form.carrier.dismiss();
                self.form.airport.on_input(&value);
                Task::none()
            }
            Message::AirportPicked(position) => {
                self.form.airport.select(position);
                Task::none()
            }
            Message::DateChanged(value) => {
                self.form.dismiss_suggestions();
                self.form.date = value;
                Task::none()
            }
            Message::TimeChanged(value) => {
                self.form.dismiss_suggestions();
                self.form.time = value;
                Task::none()
            }
            Message::CursorMoved(point) => {
                self.cursor = Some(point);
                Task::none()
            }
            Message::MousePressed => {
                let Some(point) = self.cursor else {
                    self.form.dismiss_suggestions();
                    return Task::none();
                };
                Task::batch(FieldId::ALL.map(|field| {
                    container::visible_bounds(field.container_id())
                        .map(move |bounds| Message::FieldBounds(field, bounds, point))
                }))
            }
            Message::FieldBounds(field, bounds, point) => {
                if form::pressed_outside(bounds, point) {
                    match field {
                        FieldId::Carrier => self.form.carrier.dismiss(),
                        FieldId::Airport => self.form.airport.dismiss(),
                    }
                }
                Task::none()
            }
            Message::Submit => {
                if self.submission.is_loading() {
                    return Task::none();
                }
                self.form.dismiss_suggestions();
                match self.submission.begin(&self.form) {
                    Ok(request) => Task::perform(
                        predict(self.settings.endpoint.clone(), request),
                        Message::PredictionDone,
                    ),
                    Err(alert) => show_alert(alert.message()),
                }
            }
            Message::PredictionDone(result) => {
                let result = result.map_err(PredictionError::Unavailable);
                match self.submission.finish(result) {
                    SubmitOutcome::Rendered(_) => Task::none(),
                    SubmitOutcome::Rejected(alert) => show_alert(alert.message()),
                }
            }
            Message::AlertClosed => Task::none(),
            Message::Frame(now) => {
                self.background.frame(now);
                Task::none()
            }
            Message::Resized(size) => {
                self.background
                    .scene_mut()
                    .resize(size.width, size.height);
                Task::none()
            }
            Message::Reveal => {
                if self.background.is_running() {
                    self.background.scene_mut().reveal();
                }
                Task::none()
            }
            Message::AssetLoaded(result) => {
                self.background.clear_pending_asset();
                match result {
                    Ok(asset) if self.background.is_running() => {
                        self.background.scene_mut().install_asset(asset);
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Keeping placeholder model: {}", e),
                }
                Task::none()
            }
            Message::CloseRequested(id) => {
                self.background.teardown();
                window::close(id)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let card = center(form::view(&self.form, &self.submission)).padding(24);

        if !self.background.is_attached() {
            return card.into();
        }

        let surface = canvas(background::SceneCanvas {
            scene: self.background.scene(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        stack![surface, card].into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            window::resize_events().map(|(_id, size)| Message::Resized(size)),
            window::close_requests().map(Message::CloseRequested),
            event::listen_with(|event, _status, _window| match event {
                Event::Mouse(mouse::Event::CursorMoved { position }) => {
                    Some(Message::CursorMoved(position))
                }
                Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                    Some(Message::MousePressed)
                }
                _ => None,
            }),
        ];
        if self.background.is_running() {
            subscriptions.push(window::frames().map(Message::Frame));
        }
        Subscription::batch(subscriptions)
    }
}

async fn load_options(source: OptionsSource) -> LoadOutcome {
    let fallback_source = source.clone();
    tokio::task::spawn_blocking(move || DataLoader::new(source).load())
        .await
        .unwrap_or_else(|e| {
            error!("Options loader for {} panicked: {}", fallback_source, e);
            LoadOutcome {
                catalog: OptionCatalog::fallback(),
                origin: OptionsOrigin::Fallback,
            }
        })
}

async fn predict(endpoint: String, request: PredictionRequest) -> Result<PredictionResult, String> {
    tokio::task::spawn_blocking(move || {
        HttpPredictionBackend::new(&endpoint)
            .predict(&request)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| e.to_string())?
}

async fn load_model(path: PathBuf) -> Result<GlbAsset, String> {
    info!("Loading detailed model — path={}", path.display());
    tokio::task::spawn_blocking(move || load_glb(&path).map_err(|e| e.to_string()))
        .await
        .map_err(|e| e.to_string())?
}

fn show_alert(message: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_title("FlightOnTime")
                .set_description(message)
                .set_level(rfd::MessageLevel::Warning)
                .set_buttons(rfd::MessageButtons::Ok)
                .show()
                .await
        },
        |_| Message::AlertClosed,
    )
}
