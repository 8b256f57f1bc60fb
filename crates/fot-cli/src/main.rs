// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fot_core::scene::glb::load_glb;
use fot_core::scene::normalize_asset;
use fot_core::{
    AutocompleteField, DataLoader, FormState, HttpPredictionBackend, OptionsOrigin,
    OptionsSource, Settings, SubmissionController, SubmitOutcome, Tone,
};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Flight delay prediction from the terminal", long_about = None)]
struct Cli {
    /// Prediction endpoint URL
    #[arg(short, long, env = "FOT_ENDPOINT")]
    endpoint: Option<String>,

    /// Options file path or URL (frontend_options.json)
    #[arg(short, long, env = "FOT_OPTIONS")]
    options: Option<String>,

    /// Print debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Field {
    Airport,
    Carrier,
}

#[derive(Subcommand)]
enum Commands {
    /// Show autocomplete suggestions for a query
    Suggest { field: Field, query: String },
    /// List every airport and carrier option
    Options,
    /// Ask the prediction service about a flight
    Predict {
        /// Carrier code, name or unique fragment
        #[arg(long)]
        carrier: String,
        /// Airport code, name or unique fragment
        #[arg(long)]
        airport: String,
        /// Departure date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Departure time (HH:MM)
        #[arg(long)]
        time: String,
    },
    /// Parse a GLB model and print what the background would show
    InspectModel { path: PathBuf },
}

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("fot")
        .build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn load_form(settings: &Settings) -> FormState {
    let loader = DataLoader::new(OptionsSource::parse(&settings.options_source));
    let outcome = loader.load();
    if outcome.origin == OptionsOrigin::Fallback {
        eprintln!(
            "Options unavailable at {}; using the built-in list.",
            loader.source()
        );
    }
    FormState::with_today(outcome.catalog)
}

fn pick(field: &mut AutocompleteField, query: &str) -> Result<String> {
    let name = field.name().to_string();
    field
        .pick(query)
        .map(|r| r.label.clone())
        .ok_or_else(|| anyhow::anyhow!("No single {} matches '{}'", name, query))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings::load().context("Failed to read settings")?;
    if let Some(endpoint) = cli.endpoint {
        settings.endpoint = endpoint;
    }
    if let Some(options) = cli.options {
        settings.options_source = options;
    }

    match cli.command {
        Commands::Suggest { field, query } => {
            let mut form = load_form(&settings);
            let input = match field {
                Field::Airport => &mut form.airport,
                Field::Carrier => &mut form.carrier,
            };
            input.on_input(&query);

            if input.suggestions().is_empty() {
                println!("No {} matches '{}'", input.name(), query);
            }
            for suggestion in input.suggestions() {
                let line: String = suggestion
                    .segments
                    .iter()
                    .map(|s| {
                        if s.highlighted {
                            format!("{}{}{}", BOLD, s.text, RESET)
                        } else {
                            s.text.clone()
                        }
                    })
                    .collect();
                println!("{}", line);
            }
        }
        Commands::Options => {
            let form = load_form(&settings);
            println!("Airports:");
            for record in form.airport.records() {
                println!("  {:<40} -> {}", record.label, record.value);
            }
            println!("Carriers:");
            for record in form.carrier.records() {
                println!("  {:<40} -> {}", record.label, record.value);
            }
        }
        Commands::Predict {
            carrier,
            airport,
            date,
            time,
        } => {
            let mut form = load_form(&settings);
            let carrier_label = pick(&mut form.carrier, &carrier)?;
            let airport_label = pick(&mut form.airport, &airport)?;
            if let Some(date) = date {
                form.date = date;
            }
            form.time = time;

            println!(
                "Predicting {} from {} on {} at {}...",
                carrier_label, airport_label, form.date, form.time
            );
            let backend = HttpPredictionBackend::new(&settings.endpoint);
            let mut controller = SubmissionController::new();
            match controller.submit(&form, &backend) {
                SubmitOutcome::Rendered(panel) => {
                    let marker = match panel.tone {
                        Tone::Danger => "[!]",
                        Tone::Safe => "[ok]",
                    };
                    println!("{} {} {}", marker, panel.title, panel.percent);
                    println!("{}", panel.message);
                }
                SubmitOutcome::Rejected(alert) => {
                    anyhow::bail!("{}", alert.message());
                }
            }
        }
        Commands::InspectModel { path } => {
            let asset = load_glb(&path)
                .with_context(|| format!("Failed to load model {}", path.display()))?;
            println!("Model: {}", path.display());
            if let Some(generator) = &asset.generator {
                println!("Generator: {}", generator);
            }
            println!(
                "Triangles: {} (kept {})",
                asset.source_triangles,
                asset.mesh.triangle_count()
            );
            println!("Materials: {}", asset.mesh.materials.len());

            let (mesh, scale) = normalize_asset(asset.mesh);
            if let Some(bounds) = mesh.bounds() {
                let size = bounds.size();
                println!(
                    "Source size: {:.1} x {:.1} x {:.1}",
                    size.x, size.y, size.z
                );
                let shown = size * scale;
                println!(
                    "Display scale: {} ({:.2} x {:.2} x {:.2})",
                    scale, shown.x, shown.y, shown.z
                );
            }
        }
    }

    Ok(())
}
