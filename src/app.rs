//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the fit pipeline
//! - prints reports
//! - writes optional exports

use std::io::Write;

use clap::Parser;

use crate::cli::{Cli, Command, FitArgs, ForecastArgs, SampleArgs};
use crate::data::sample::{self, SampleSpec};
use crate::domain::{DeclineMode, DeclineModel, FitConfig, resolve_option};
use crate::error::AppError;
use crate::{io, models, report};

pub mod pipeline;

/// Entry point for the `dca` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Forecast(args) => handle_forecast(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;

    println!("{}", report::format_run_summary(&run, &config));

    if let Some(path) = &config.export_forecast {
        let forecasts: Vec<_> = run
            .wells
            .iter()
            .map(|w| (w.series.well.clone(), w.forecast.clone()))
            .collect();
        io::export::write_forecast_csv(path, &forecasts)?;
    }

    if let Some(path) = &config.export_model {
        // A model JSON holds one model; multi-well batches are ambiguous.
        let [well] = run.wells.as_slice() else {
            return Err(AppError::invalid_option(
                "--export-model requires a single-well input CSV.",
            ));
        };
        let last_day = well.series.days.last().copied().unwrap_or(0.0);
        io::curve::write_curve_json(
            path,
            &well.series.well,
            &well.result,
            last_day + config.forecast_days,
            config.forecast_step,
        )?;
    }

    Ok(())
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let curve = io::curve::read_curve_json(&args.model)?;
    if !curve.model.is_fit() {
        return Err(AppError::input(format!(
            "Model '{}' is unfit; nothing to forecast.",
            args.model.display()
        )));
    }

    let grid = models::grid(
        &curve.model,
        args.from_day,
        args.from_day + args.days,
        args.step,
    );

    println!("{}", report::format_forecast(&curve.well, &grid));

    if let Some(path) = &args.export {
        io::export::write_forecast_csv(path, &[(curve.well.clone(), grid)])?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    // Default to exponential when nothing is selected.
    let (mode, exponent) = if args.mode.is_none() && args.exponent.is_none() {
        (DeclineMode::Exponential, 0.0)
    } else {
        resolve_option(args.mode, args.exponent)?
    };

    let model = DeclineModel::new(mode, exponent, Some(args.date0), args.rate0, args.decline0)?;
    let spec = SampleSpec {
        well: args.well.clone(),
        model,
        count: args.count,
        step: args.step,
        noise: args.noise,
        shut_in_prob: args.shut_in_prob,
        seed: args.seed,
    };
    let series = sample::generate(&spec);

    match &args.out {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| {
                AppError::input(format!(
                    "Failed to create sample CSV '{}': {e}",
                    path.display()
                ))
            })?;
            sample::write_sample_csv(file, &series)
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            sample::write_sample_csv(&mut lock, &series)?;
            lock.flush()
                .map_err(|e| AppError::input(format!("Failed to flush stdout: {e}")))
        }
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        csv_path: args.csv.clone(),
        mode: args.mode,
        exponent: args.exponent,
        start: args.start,
        end: args.end,
        forecast_days: args.forecast_days,
        forecast_step: args.step,
        export_forecast: args.export_forecast.clone(),
        export_model: args.export_model.clone(),
    }
}
