//! Warm-started parameter sweep.
//!
//! Parameter values are visited in ascending order. Each sweep step integrates
//! one trajectory from the previous step's final state, estimates a Lyapunov
//! exponent from the tangent restarted at `(1, 0, 0)`, and scans `z` for
//! extrema. The trajectory arena is allocated once and rewritten per step.

use crate::error::SweepError;
use crate::extrema::ExtremaDetector;
use crate::grid::{ParameterRange, TimeGrid};
use crate::lyapunov::{LyapunovEstimator, LyapunovMode};
use crate::result::{LyapunovRecord, PreservedTrajectory, SweepResult};
use crate::solvers::{Integrator, StepperKind};
use crate::system::RosslerFamily;
use crate::traits::{ParameterizedField, State, Tangent};
use crate::trajectory::Trajectory;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Tangent every sweep step after the first starts from.
pub const RESET_TANGENT: [f64; 3] = [1.0, 0.0, 0.0];

/// Picks the parameter value whose full trajectory is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreserveSelector {
    /// Bit-exact match against a swept value; absent if nothing matches.
    Exact { value: f64 },
    /// Position in the parameter sequence.
    Index { index: usize },
    /// Closest swept value within `tolerance`; ties go to the lower parameter.
    Nearest { value: f64, tolerance: f64 },
}

impl PreserveSelector {
    /// Resolves the selector to a position in `range`, if any value qualifies.
    pub fn resolve(&self, range: &ParameterRange) -> Result<Option<usize>, SweepError> {
        match *self {
            PreserveSelector::Exact { value } => Ok(range.values().position(|b| b == value)),
            PreserveSelector::Index { index } => {
                let len = range.len();
                if index >= len {
                    return Err(SweepError::PreserveIndexOutOfRange { index, len });
                }
                Ok(Some(index))
            }
            PreserveSelector::Nearest { value, tolerance } => {
                if !(tolerance.is_finite() && tolerance >= 0.0) {
                    return Err(SweepError::InvalidTolerance(tolerance));
                }
                if !value.is_finite() {
                    return Err(SweepError::NonFinitePreserveValue(value));
                }
                let mut best: Option<(usize, f64)> = None;
                for (i, b) in range.values().enumerate() {
                    let distance = (b - value).abs();
                    if distance > tolerance {
                        continue;
                    }
                    if best.map_or(true, |(_, d)| distance < d) {
                        best = Some((i, distance));
                    }
                }
                Ok(best.map(|(i, _)| i))
            }
        }
    }
}

/// Everything a sweep needs. `Default` is the reference configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub parameters: ParameterRange,
    pub time: TimeGrid,
    pub initial_state: [f64; 3],
    /// Used for the first sweep step only.
    pub initial_tangent: [f64; 3],
    pub preserve: Option<PreserveSelector>,
    pub stepper: StepperKind,
    pub lyapunov: LyapunovMode,
    pub system: RosslerFamily,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            parameters: ParameterRange::default(),
            time: TimeGrid::default(),
            initial_state: [0.5, 0.3, -1.0],
            initial_tangent: RESET_TANGENT,
            preserve: Some(PreserveSelector::Exact {
                value: 0.5000000000000003,
            }),
            stepper: StepperKind::Euler,
            lyapunov: LyapunovMode::MeanLogNorm,
            system: RosslerFamily::default(),
        }
    }
}

impl SweepConfig {
    /// Validates the configuration and resolves the preserve selector.
    pub fn validate(&self) -> Result<Option<usize>, SweepError> {
        self.parameters.validate()?;
        self.time.validate()?;
        for (name, value) in [
            ("initial_state", self.initial_state),
            ("initial_tangent", self.initial_tangent),
        ] {
            if !value.iter().all(|v| v.is_finite()) {
                return Err(SweepError::NonFiniteVector { name, value });
            }
        }
        match &self.preserve {
            Some(selector) => selector.resolve(&self.parameters),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepProgress {
    pub done: bool,
    pub current_step: usize,
    pub max_steps: usize,
}

/// What one sweep step consumed and produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummary {
    pub index: usize,
    pub parameter: f64,
    pub exponent: f64,
    pub maxima: usize,
    pub minima: usize,
    pub initial_state: State,
    pub initial_tangent: Tangent,
    pub final_state: State,
    pub preserved: bool,
}

pub struct ParameterSweep<P: ParameterizedField> {
    family: P,
    parameters: ParameterRange,
    integrator: Integrator,
    estimator: LyapunovEstimator,
    buffer: Trajectory,
    state: State,
    tangent: Tangent,
    preserve_index: Option<usize>,
    index: usize,
    total: usize,
    result: SweepResult,
}

impl ParameterSweep<RosslerFamily> {
    /// Sweep over `b` of the Rossler family described by `config.system`.
    pub fn rossler(config: &SweepConfig) -> Result<Self, SweepError> {
        Self::new(config.system, config)
    }
}

impl<P: ParameterizedField> ParameterSweep<P> {
    pub fn new(family: P, config: &SweepConfig) -> Result<Self, SweepError> {
        let preserve_index = config.validate()?;
        if config.preserve.is_some() && preserve_index.is_none() {
            warn!(
                selector = ?config.preserve,
                "no swept parameter value matches the preserve selector"
            );
        }

        let total = config.parameters.len();
        let steps = config.time.steps();

        Ok(Self {
            family,
            parameters: config.parameters,
            integrator: Integrator::new(config.stepper, &config.time),
            estimator: LyapunovEstimator::new(config.lyapunov),
            buffer: Trajectory::with_len(steps + 1),
            state: State::from(config.initial_state),
            tangent: Tangent::from(config.initial_tangent),
            preserve_index,
            index: 0,
            total,
            result: SweepResult {
                lyapunov: Vec::with_capacity(total),
                ..SweepResult::default()
            },
        })
    }

    /// Number of parameter values in the sweep.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn is_done(&self) -> bool {
        self.index >= self.total
    }

    pub fn progress(&self) -> SweepProgress {
        SweepProgress {
            done: self.is_done(),
            current_step: self.index,
            max_steps: self.total,
        }
    }

    /// State the next sweep step will start from.
    pub fn continuation_state(&self) -> State {
        self.state
    }

    pub fn preserve_index(&self) -> Option<usize> {
        self.preserve_index
    }

    /// Trajectory of the most recent sweep step.
    pub fn last_trajectory(&self) -> &Trajectory {
        &self.buffer
    }

    pub fn result(&self) -> &SweepResult {
        &self.result
    }

    /// Runs the next parameter value. Returns `None` once the range is exhausted.
    pub fn step(&mut self) -> Option<StepSummary> {
        if self.is_done() {
            return None;
        }

        let index = self.index;
        let parameter = self.parameters.value(index);
        let field = self.family.at(parameter);
        let initial_state = self.state;
        let initial_tangent = std::mem::replace(&mut self.tangent, Tangent::from(RESET_TANGENT));

        self.estimator.reset();
        let final_state = self.integrator.run(
            &field,
            initial_state,
            initial_tangent,
            &mut self.buffer,
            &mut self.estimator,
        );

        let exponent = self.estimator.finish();
        if !exponent.is_finite() {
            warn!(index, parameter, exponent, "non-finite Lyapunov estimate");
        }
        self.result.lyapunov.push(LyapunovRecord {
            parameter,
            exponent,
        });

        let preserved = self.preserve_index == Some(index);
        if preserved {
            info!(index, parameter, points = self.buffer.len(), "preserving trajectory");
            self.result.preserved = Some(PreservedTrajectory {
                parameter,
                trajectory: self.buffer.clone(),
            });
        }

        let (maxima, minima) = ExtremaDetector::scan_into(
            parameter,
            &self.buffer.z,
            &mut self.result.maxima,
            &mut self.result.minima,
        );

        debug!(index, parameter, exponent, maxima, minima, "sweep step complete");

        self.state = final_state;
        self.index += 1;

        Some(StepSummary {
            index,
            parameter,
            exponent,
            maxima,
            minima,
            initial_state,
            initial_tangent,
            final_state,
            preserved,
        })
    }

    /// Runs up to `batch` sweep steps.
    pub fn advance(&mut self, batch: usize) -> SweepProgress {
        for _ in 0..batch {
            if self.step().is_none() {
                break;
            }
        }
        self.progress()
    }

    /// Runs the remaining parameter values and returns the result.
    pub fn run(mut self) -> SweepResult {
        while self.step().is_some() {}
        self.into_result()
    }

    pub fn into_result(self) -> SweepResult {
        let summary = self.result.non_finite_summary();
        info!(
            parameters = self.result.lyapunov.len(),
            maxima = self.result.maxima.len(),
            minima = self.result.minima.len(),
            preserved = self.result.preserved.is_some(),
            non_finite_exponents = summary.exponents,
            "sweep finished"
        );
        self.result
    }
}

/// Runs the Rossler sweep described by `config` to completion.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepResult, SweepError> {
    Ok(ParameterSweep::rossler(config)?.run())
}
