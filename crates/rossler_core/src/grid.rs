//! Half-open sampling ranges for the swept parameter and for time.

use crate::error::SweepError;
use serde::{Deserialize, Serialize};

/// Upper bound on samples in either range; trajectories are allocated up front.
pub const MAX_SAMPLES: usize = 100_000_000;

/// Number of samples in `[start, stop)` with spacing `step`: `ceil((stop - start) / step)`.
fn sample_count(start: f64, stop: f64, step: f64) -> usize {
    let count = ((stop - start) / step).ceil();
    if count > 0.0 {
        count as usize
    } else {
        0
    }
}

fn validate_range(name: &'static str, start: f64, stop: f64, step: f64) -> Result<(), SweepError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(SweepError::InvalidStep { name, value: step });
    }
    if !start.is_finite() || !stop.is_finite() {
        return Err(SweepError::NonFiniteBounds { name, start, stop });
    }
    if start >= stop {
        return Err(SweepError::EmptyRange { name, start, stop });
    }
    let count = ((stop - start) / step).ceil();
    if !(count <= MAX_SAMPLES as f64) {
        return Err(SweepError::TooManySamples {
            name,
            count,
            max: MAX_SAMPLES,
        });
    }
    Ok(())
}

/// Fixed time discretisation shared by every sweep step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            start: 1.0,
            stop: 100.0,
            step: 0.01,
        }
    }
}

impl TimeGrid {
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, SweepError> {
        let grid = Self { start, stop, step };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        validate_range("time", self.start, self.stop, self.step)
    }

    /// Number of integration steps N. Trajectories hold N + 1 points.
    pub fn steps(&self) -> usize {
        sample_count(self.start, self.stop, self.step)
    }
}

/// Ascending parameter values in `[start, stop)`.
///
/// Value `i` is `start + i * delta` with `delta = (start + step) - start`, the
/// rounded spacing actually realised between the first two samples. Generating
/// values this way (instead of accumulating `step`) keeps them reproducible,
/// which matters when a value is selected by exact comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for ParameterRange {
    fn default() -> Self {
        Self {
            start: 0.1,
            stop: 2.0,
            step: 0.001,
        }
    }
}

impl ParameterRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self, SweepError> {
        let range = Self { start, stop, step };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        validate_range("parameter", self.start, self.stop, self.step)?;
        let delta = (self.start + self.step) - self.start;
        if !(delta > 0.0) {
            return Err(SweepError::DegenerateStep {
                name: "parameter",
                start: self.start,
                step: self.step,
            });
        }
        Ok(())
    }

    /// `ceil((stop - start) / step)`, minus any trailing value that rounding
    /// pushed onto or past `stop`.
    pub fn len(&self) -> usize {
        let mut len = sample_count(self.start, self.stop, self.step);
        while len > 0 && self.value(len - 1) >= self.stop {
            len -= 1;
        }
        len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self, index: usize) -> f64 {
        let delta = (self.start + self.step) - self.start;
        self.start + index as f64 * delta
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.value(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_time_grid_has_9900_steps() {
        let grid = TimeGrid::default();
        assert_eq!(grid.steps(), 9900);
    }

    #[test]
    fn step_count_rounds_up_partial_steps() {
        let grid = TimeGrid::new(0.0, 1.05, 0.1).expect("valid grid");
        assert_eq!(grid.steps(), 11);
    }

    #[test]
    fn reference_parameter_range_reproduces_selected_value() {
        let range = ParameterRange::default();
        assert_eq!(range.len(), 1900);
        assert_eq!(range.value(0), 0.1);
        assert_eq!(range.value(400), 0.5000000000000003);
        assert!(range.values().all(|b| b >= 0.1 && b < 2.0));
    }

    #[test]
    fn rounding_never_yields_a_value_at_stop() {
        // (0.34 - 0.3) / 0.01 rounds to just above 4.
        let range = ParameterRange::new(0.3, 0.34, 0.01).expect("valid range");
        assert_eq!(range.len(), 4);
        assert!(range.values().all(|b| b < 0.34));
    }

    #[test]
    fn parameter_values_are_strictly_ascending() {
        let range = ParameterRange::new(0.3, 0.31, 0.0007).expect("valid range");
        let values: Vec<f64> = range.values().collect();
        assert_eq!(values.len(), range.len());
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rejects_invalid_ranges() {
        assert!(matches!(
            ParameterRange::new(0.0, 1.0, 0.0),
            Err(SweepError::InvalidStep { .. })
        ));
        assert!(matches!(
            ParameterRange::new(0.0, 1.0, f64::NAN),
            Err(SweepError::InvalidStep { .. })
        ));
        assert!(matches!(
            TimeGrid::new(2.0, 1.0, 0.1),
            Err(SweepError::EmptyRange { .. })
        ));
        assert!(matches!(
            TimeGrid::new(0.0, f64::INFINITY, 0.1),
            Err(SweepError::NonFiniteBounds { .. })
        ));
    }

    #[test]
    fn rejects_step_lost_to_rounding() {
        // At 1e17 neighbouring doubles are 16 apart, so adding 1.0 is a no-op.
        assert!(matches!(
            ParameterRange::new(1e17, 1e17 + 64.0, 1.0),
            Err(SweepError::DegenerateStep { .. })
        ));
        assert!(ParameterRange::new(1e17, 1e17 + 640.0, 32.0).is_ok());
    }

    #[test]
    fn rejects_ranges_with_too_many_samples() {
        assert!(matches!(
            TimeGrid::new(0.0, 1.0, 1e-300),
            Err(SweepError::TooManySamples { .. })
        ));
        assert!(matches!(
            ParameterRange::new(0.0, 1.0, 1e-12),
            Err(SweepError::TooManySamples { .. })
        ));
        let grid = TimeGrid::new(0.0, 1.0, 1e-6).expect("within the limit");
        assert!(grid.steps() <= MAX_SAMPLES);
    }
}
