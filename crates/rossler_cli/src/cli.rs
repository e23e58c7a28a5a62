use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StepperArg {
    Euler,
    Rk4,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LyapunovArg {
    /// Mean log-norm of the unrenormalized tangent (reference behaviour)
    #[clap(alias = "mean")]
    MeanLogNorm,
    /// Renormalize every step and average over elapsed time
    Benettin,
}

#[derive(Debug, Parser)]
#[command(
    name = "rossler",
    about = "Sweep the Rossler b parameter: Lyapunov estimates and z extrema",
    version
)]
pub struct RosslerCli {
    /// Path to a TOML config; command-line flags override its values
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the JSON result here instead of stdout (NaN and infinities are written as "NaN", "inf", "-inf")
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Tracing filter, e.g. `info` or `rossler_core=debug`
    #[arg(long = "log-level", value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Emit compact JSON
    #[arg(long = "compact", action = ArgAction::SetTrue)]
    pub compact: bool,

    #[arg(long = "b-start")]
    pub b_start: Option<f64>,
    #[arg(long = "b-stop")]
    pub b_stop: Option<f64>,
    #[arg(long = "b-step")]
    pub b_step: Option<f64>,

    #[arg(long = "t-start")]
    pub t_start: Option<f64>,
    #[arg(long = "t-stop")]
    pub t_stop: Option<f64>,
    #[arg(long = "t-step")]
    pub t_step: Option<f64>,

    /// Initial state x0 y0 z0
    #[arg(long = "initial-state", num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    pub initial_state: Option<Vec<f64>>,

    #[arg(long = "stepper", value_enum)]
    pub stepper: Option<StepperArg>,

    #[arg(long = "lyapunov", value_enum)]
    pub lyapunov: Option<LyapunovArg>,

    /// Preserve the trajectory whose b is bit-identical to VALUE
    #[arg(long = "preserve-exact", value_name = "VALUE", conflicts_with_all = ["preserve_index", "preserve_nearest", "no_preserve"])]
    pub preserve_exact: Option<f64>,

    /// Preserve the trajectory at position INDEX of the parameter sequence
    #[arg(long = "preserve-index", value_name = "INDEX", conflicts_with_all = ["preserve_nearest", "no_preserve"])]
    pub preserve_index: Option<usize>,

    /// Preserve the trajectory whose b is closest to VALUE (see --preserve-tolerance)
    #[arg(long = "preserve-nearest", value_name = "VALUE", conflicts_with = "no_preserve")]
    pub preserve_nearest: Option<f64>,

    /// Tolerance for --preserve-nearest [default: 1e-9]
    #[arg(long = "preserve-tolerance", value_name = "TOL", requires = "preserve_nearest")]
    pub preserve_tolerance: Option<f64>,

    /// Do not keep any full trajectory
    #[arg(long = "no-preserve", action = ArgAction::SetTrue)]
    pub no_preserve: bool,
}
