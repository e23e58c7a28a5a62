//! # rossler
//!
//! Thin driver around `rossler_core`: resolves configuration, runs one sweep
//! and writes the result series as JSON for an external renderer.
//!
//! ```text
//! rossler --config sweep.toml -o sweep.json
//! rossler --b-start 0.3 --b-stop 0.5 --lyapunov benettin --preserve-index 0
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use rossler_core::result::SweepResult;
use rossler_core::sweep::ParameterSweep;

mod cli;
mod config;
mod output;

use cli::RosslerCli;
use output::JsonResult;

fn main() -> Result<()> {
    let cli = RosslerCli::parse();
    let run = config::resolve(&cli)?;

    let filter = EnvFilter::try_new(&run.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .compact()
        .init();

    let sweep_config = &run.sweep;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        b_start = sweep_config.parameters.start,
        b_stop = sweep_config.parameters.stop,
        b_step = sweep_config.parameters.step,
        steps_per_value = sweep_config.time.steps(),
        stepper = ?sweep_config.stepper,
        lyapunov = ?sweep_config.lyapunov,
        "starting Rossler sweep"
    );

    let sweep = ParameterSweep::rossler(sweep_config).context("Invalid sweep configuration")?;
    info!(parameters = sweep.len(), preserve_index = ?sweep.preserve_index(), "sweep configured");
    let result = sweep.run();

    let summary = result.non_finite_summary();
    if !summary.is_clean() {
        warn!(
            exponents = summary.exponents,
            maxima = summary.maxima,
            minima = summary.minima,
            trajectory_points = summary.trajectory_points,
            "result contains non-finite values"
        );
    }

    match &run.output {
        Some(path) => {
            write_result(&result, path, run.pretty)?;
            info!(path = %path.display(), "result written");
        }
        None => {
            let stdout = io::stdout();
            write_json(&result, stdout.lock(), run.pretty)?;
        }
    }

    Ok(())
}

fn write_result(result: &SweepResult, path: &Path, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Create output dir {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Create output file {}", path.display()))?;
    write_json(result, BufWriter::new(file), pretty)
        .with_context(|| format!("Write result to {}", path.display()))
}

fn write_json<W: Write>(result: &SweepResult, mut writer: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, &JsonResult(result))?;
    } else {
        serde_json::to_writer(&mut writer, &JsonResult(result))?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
