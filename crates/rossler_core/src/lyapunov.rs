//! Per-trajectory Lyapunov exponent accumulation.

use crate::traits::Tangent;
use serde::{Deserialize, Serialize};

/// How the tangent vector's growth is turned into an exponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LyapunovMode {
    /// Mean of `ln(|v_i| / 1.0)` over the tangent at the start of each step,
    /// divided by the step count. The tangent is never rescaled, so this is the
    /// mean log-magnitude of a compounding vector rather than the textbook
    /// exponent, and it can overflow in strongly unstable regions.
    #[default]
    MeanLogNorm,
    /// Benettin scheme: the tangent is rescaled to unit length before every
    /// step and `ln |v|` of the stepped vector is averaged over elapsed time.
    Benettin,
}

/// Accumulates log-growth statistics over the steps of one trajectory.
#[derive(Debug, Clone)]
pub struct LyapunovEstimator {
    mode: LyapunovMode,
    sum: f64,
    steps: usize,
    elapsed: f64,
}

impl LyapunovEstimator {
    pub fn new(mode: LyapunovMode) -> Self {
        Self {
            mode,
            sum: 0.0,
            steps: 0,
            elapsed: 0.0,
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn reset(&mut self) {
        self.sum = 0.0;
        self.steps = 0;
        self.elapsed = 0.0;
    }

    /// Sees the tangent about to be stepped.
    pub fn before_step(&mut self, tangent: &mut Tangent) {
        match self.mode {
            LyapunovMode::MeanLogNorm => {
                self.sum += (tangent.norm() / 1.0).ln();
            }
            LyapunovMode::Benettin => {
                // A zero vector turns into NaN here and poisons the sum.
                let norm = tangent.norm();
                *tangent /= norm;
            }
        }
    }

    /// Sees the tangent produced by a step of size `dt`.
    pub fn after_step(&mut self, tangent: &Tangent, dt: f64) {
        self.steps += 1;
        self.elapsed += dt;
        if self.mode == LyapunovMode::Benettin {
            self.sum += tangent.norm().ln();
        }
    }

    /// The exponent estimate for the steps seen since the last reset.
    pub fn finish(&self) -> f64 {
        match self.mode {
            LyapunovMode::MeanLogNorm => self.sum / self.steps as f64,
            LyapunovMode::Benettin => self.sum / self.elapsed,
        }
    }
}
