//! TOML configuration and command-line overrides.

use crate::cli::{LyapunovArg, RosslerCli, StepperArg};
use anyhow::{Context, Result};
use rossler_core::lyapunov::LyapunovMode;
use rossler_core::solvers::StepperKind;
use rossler_core::sweep::{PreserveSelector, SweepConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_PRESERVE_TOLERANCE: f64 = 1e-9;

/// Contents of a config file.
///
/// ```toml
/// log_level = "rossler_core=debug,info"
/// output = "sweep.json"
///
/// [sweep]
/// initial_state = [0.5, 0.3, -1.0]
/// lyapunov = "mean_log_norm"
///
/// [sweep.parameters]
/// start = 0.1
/// stop = 2.0
/// step = 0.001
///
/// [sweep.preserve]
/// kind = "exact"
/// value = 0.5000000000000003
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub output: Option<PathBuf>,
    pub sweep: SweepConfig,
}

/// Fully resolved driver settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub log_level: String,
    pub output: Option<PathBuf>,
    pub pretty: bool,
    pub sweep: SweepConfig,
}

pub fn load_file(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Read config {}", path.display()))?;
    parse_file(&text).with_context(|| format!("Parse config {}", path.display()))
}

pub fn parse_file(text: &str) -> Result<FileConfig> {
    Ok(toml::from_str(text)?)
}

pub fn resolve(cli: &RosslerCli) -> Result<RunConfig> {
    let file = match &cli.config {
        Some(path) => load_file(path)?,
        None => FileConfig::default(),
    };
    Ok(apply_overrides(file, cli))
}

/// Command-line values win over the file, the file wins over defaults.
pub fn apply_overrides(file: FileConfig, cli: &RosslerCli) -> RunConfig {
    let mut sweep = file.sweep;

    let parameters = &mut sweep.parameters;
    override_with(&mut parameters.start, cli.b_start);
    override_with(&mut parameters.stop, cli.b_stop);
    override_with(&mut parameters.step, cli.b_step);

    let time = &mut sweep.time;
    override_with(&mut time.start, cli.t_start);
    override_with(&mut time.stop, cli.t_stop);
    override_with(&mut time.step, cli.t_step);

    if let Some(values) = cli.initial_state.as_deref() {
        if let [x, y, z] = *values {
            sweep.initial_state = [x, y, z];
        }
    }

    if let Some(stepper) = cli.stepper {
        sweep.stepper = match stepper {
            StepperArg::Euler => StepperKind::Euler,
            StepperArg::Rk4 => StepperKind::Rk4,
        };
    }
    if let Some(mode) = cli.lyapunov {
        sweep.lyapunov = match mode {
            LyapunovArg::MeanLogNorm => LyapunovMode::MeanLogNorm,
            LyapunovArg::Benettin => LyapunovMode::Benettin,
        };
    }

    if cli.no_preserve {
        sweep.preserve = None;
    } else if let Some(value) = cli.preserve_exact {
        sweep.preserve = Some(PreserveSelector::Exact { value });
    } else if let Some(index) = cli.preserve_index {
        sweep.preserve = Some(PreserveSelector::Index { index });
    } else if let Some(value) = cli.preserve_nearest {
        sweep.preserve = Some(PreserveSelector::Nearest {
            value,
            tolerance: cli.preserve_tolerance.unwrap_or(DEFAULT_PRESERVE_TOLERANCE),
        });
    }

    RunConfig {
        log_level: cli
            .log_level
            .clone()
            .or(file.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        output: cli.output.clone().or(file.output),
        pretty: !cli.compact,
        sweep,
    }
}

fn override_with(target: &mut f64, value: Option<f64>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rossler_core::grid::ParameterRange;

    fn cli(args: &[&str]) -> RosslerCli {
        RosslerCli::try_parse_from(std::iter::once("rossler").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults_are_the_reference_sweep() {
        let run = apply_overrides(FileConfig::default(), &cli(&[]));
        assert_eq!(run.sweep, SweepConfig::default());
        assert_eq!(run.log_level, "info");
        assert!(run.pretty);
        assert!(run.output.is_none());
    }

    #[test]
    fn parses_partial_toml() {
        let file = parse_file(
            r#"
            log_level = "debug"

            [sweep]
            lyapunov = "benettin"
            stepper = "rk4"

            [sweep.parameters]
            start = 0.2
            stop = 0.4
            step = 0.01

            [sweep.preserve]
            kind = "exact"
            value = 0.5000000000000003
            "#,
        )
        .expect("parse");

        assert_eq!(file.log_level.as_deref(), Some("debug"));
        assert_eq!(file.sweep.parameters, ParameterRange { start: 0.2, stop: 0.4, step: 0.01 });
        assert_eq!(file.sweep.lyapunov, LyapunovMode::Benettin);
        assert_eq!(file.sweep.stepper, StepperKind::Rk4);
        assert_eq!(file.sweep.time, SweepConfig::default().time);
        assert_eq!(
            file.sweep.preserve,
            Some(PreserveSelector::Exact { value: 0.5000000000000003 })
        );
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(parse_file("[sweep.parameters]\nstart = \"low\"").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let file = parse_file(
            r#"
            log_level = "debug"
            output = "from-file.json"
            [sweep.parameters]
            start = 0.2
            stop = 0.4
            step = 0.01
            "#,
        )
        .expect("parse");

        let run = apply_overrides(
            file,
            &cli(&[
                "--b-stop",
                "0.3",
                "--t-step",
                "0.005",
                "--initial-state",
                "1",
                "-2",
                "0.5",
                "--lyapunov",
                "benettin",
                "--log-level",
                "warn",
                "--compact",
            ]),
        );

        assert_eq!(run.sweep.parameters.start, 0.2);
        assert_eq!(run.sweep.parameters.stop, 0.3);
        assert_eq!(run.sweep.time.step, 0.005);
        assert_eq!(run.sweep.initial_state, [1.0, -2.0, 0.5]);
        assert_eq!(run.sweep.lyapunov, LyapunovMode::Benettin);
        assert_eq!(run.log_level, "warn");
        assert_eq!(run.output, Some(PathBuf::from("from-file.json")));
        assert!(!run.pretty);
    }

    #[test]
    fn preserve_flags_select_the_matching_selector() {
        let run = apply_overrides(FileConfig::default(), &cli(&["--preserve-index", "12"]));
        assert_eq!(run.sweep.preserve, Some(PreserveSelector::Index { index: 12 }));

        let run = apply_overrides(FileConfig::default(), &cli(&["--preserve-nearest", "0.5"]));
        assert_eq!(
            run.sweep.preserve,
            Some(PreserveSelector::Nearest {
                value: 0.5,
                tolerance: DEFAULT_PRESERVE_TOLERANCE,
            })
        );

        let run = apply_overrides(FileConfig::default(), &cli(&["--no-preserve"]));
        assert_eq!(run.sweep.preserve, None);

        assert!(RosslerCli::try_parse_from(["rossler", "--preserve-index", "1", "--no-preserve"]).is_err());
    }

    #[test]
    fn preserve_tolerance_needs_preserve_nearest() {
        assert!(RosslerCli::try_parse_from(["rossler", "--preserve-tolerance", "0.1"]).is_err());

        let run = apply_overrides(
            FileConfig::default(),
            &cli(&["--preserve-nearest", "0.5", "--preserve-tolerance", "0.1"]),
        );
        assert_eq!(
            run.sweep.preserve,
            Some(PreserveSelector::Nearest {
                value: 0.5,
                tolerance: 0.1,
            })
        );
    }
}
