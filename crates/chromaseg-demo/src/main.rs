//! Chromaseg — color-based image segmentation walkthrough.
//!
//! Loads one image, runs the lesson (or a JSON recipe) over it, writes every
//! frame as a PNG and optionally pages through them in a window.

mod config;
mod logging;

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use chromaseg_core::io::load_image;
use chromaseg_core::walkthrough;
use chromaseg_core::{DirectorySink, DisplaySink, MultiSink, Recipe, SegError};

use crate::config::{AppConfig, Args};

/// Errors that end the program.
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Seg(#[from] SegError),
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
    #[error("--window needs a build with the `window` feature")]
    WindowUnavailable,
}

fn main() -> ExitCode {
    logging::init();
    let config = AppConfig::from_args(Args::parse());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), AppError> {
    let recipe = match &config.recipe {
        Some(path) => {
            tracing::info!("using recipe {}", path.display());
            Recipe::load(path)?
        }
        None => Recipe::tutorial(),
    };

    if config.dump_recipe {
        println!("{}", recipe.to_json_pretty()?);
        return Ok(());
    }

    let image = load_image(&config.image)?;
    tracing::info!(
        "loaded {} ({}x{})",
        config.image.display(),
        image.width,
        image.height
    );

    let mut sink = MultiSink::new(Vec::new());
    sink.push(Box::new(DirectorySink::new(&config.out_dir)?));
    if config.window {
        sink.push(window_sink(config)?);
    }

    let report = walkthrough::run(&image, &recipe, &mut sink)?;

    if let Some(path) = &config.report {
        let json = report.to_json_pretty()?;
        if config.report_to_stdout() {
            println!("{json}");
        } else {
            fs::write(path, json)?;
            tracing::info!("report written to {}", path.display());
        }
    }
    Ok(())
}

#[cfg(feature = "window")]
fn window_sink(config: &AppConfig) -> Result<Box<dyn DisplaySink>, AppError> {
    let title = format!("chromaseg: {}", config.image.display());
    Ok(Box::new(chromaseg_viewer::WindowSink::new(title)))
}

#[cfg(not(feature = "window"))]
fn window_sink(_config: &AppConfig) -> Result<Box<dyn DisplaySink>, AppError> {
    Err(AppError::WindowUnavailable)
}
