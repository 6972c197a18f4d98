mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod report;
mod state;
mod ui;

// Compiled into the test build so the loader tests can read the sample sheet.
#[cfg(test)]
#[path = "bin/generate_sample.rs"]
#[allow(dead_code)]
mod generate_sample;

use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use app::MovieDashApp;
use clap::Parser;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Config::parse()) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<ExitCode> {
    let path = config.resolve_dataset_path()?;
    let dataset = data::loader::load_file(&path)
        .with_context(|| format!("could not open {}", path.display()))?;

    if let Some(dir) = &config.export_dir {
        let all_written =
            dashboard::export_to_dir(&dataset, &config.criteria(), config.histogram_bins(), dir)?;
        return Ok(if all_written {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let state = AppState::new(dataset, config.histogram_bins());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Análises Visuais de Filmes",
        options,
        Box::new(move |_cc| Ok(Box::new(MovieDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))?;

    Ok(ExitCode::SUCCESS)
}
