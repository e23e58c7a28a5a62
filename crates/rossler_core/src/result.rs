//! Output series handed to renderers and exporters.

use crate::trajectory::Trajectory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LyapunovRecord {
    pub parameter: f64,
    pub exponent: f64,
}

/// A local maximum or minimum of `z`; which one is given by the series it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtremumRecord {
    pub parameter: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreservedTrajectory {
    pub parameter: f64,
    pub trajectory: Trajectory,
}

/// Counts of non-finite entries in a `SweepResult`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonFiniteSummary {
    pub exponents: usize,
    pub maxima: usize,
    pub minima: usize,
    pub trajectory_points: usize,
}

impl NonFiniteSummary {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub lyapunov: Vec<LyapunovRecord>,
    pub maxima: Vec<ExtremumRecord>,
    pub minima: Vec<ExtremumRecord>,
    pub preserved: Option<PreservedTrajectory>,
}

impl SweepResult {
    /// `(parameters, exponents)` columns.
    pub fn lyapunov_columns(&self) -> (Vec<f64>, Vec<f64>) {
        self.lyapunov
            .iter()
            .map(|r| (r.parameter, r.exponent))
            .unzip()
    }

    /// `(parameters, z)` columns of the maxima series.
    pub fn maxima_columns(&self) -> (Vec<f64>, Vec<f64>) {
        extremum_columns(&self.maxima)
    }

    /// `(parameters, z)` columns of the minima series.
    pub fn minima_columns(&self) -> (Vec<f64>, Vec<f64>) {
        extremum_columns(&self.minima)
    }

    /// Nothing in the core checks for overflow; callers that care look here.
    pub fn non_finite_summary(&self) -> NonFiniteSummary {
        let trajectory_points = self.preserved.as_ref().map_or(0, |p| {
            p.trajectory
                .points()
                .filter(|s| !s.iter().all(|v| v.is_finite()))
                .count()
        });
        NonFiniteSummary {
            exponents: self.lyapunov.iter().filter(|r| !r.exponent.is_finite()).count(),
            maxima: self.maxima.iter().filter(|r| !r.value.is_finite()).count(),
            minima: self.minima.iter().filter(|r| !r.value.is_finite()).count(),
            trajectory_points,
        }
    }
}

fn extremum_columns(records: &[ExtremumRecord]) -> (Vec<f64>, Vec<f64>) {
    records.iter().map(|r| (r.parameter, r.value)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_preserve_series_order() {
        let result = SweepResult {
            lyapunov: vec![
                LyapunovRecord { parameter: 0.1, exponent: -0.5 },
                LyapunovRecord { parameter: 0.2, exponent: 0.3 },
            ],
            maxima: vec![ExtremumRecord { parameter: 0.1, value: 4.0 }],
            minima: Vec::new(),
            preserved: None,
        };

        assert_eq!(result.lyapunov_columns(), (vec![0.1, 0.2], vec![-0.5, 0.3]));
        assert_eq!(result.maxima_columns(), (vec![0.1], vec![4.0]));
        assert_eq!(result.minima_columns(), (Vec::new(), Vec::new()));
    }

    #[test]
    fn non_finite_summary_counts_degenerate_entries() {
        let mut trajectory = Trajectory::with_len(3);
        trajectory.z[2] = f64::INFINITY;
        let result = SweepResult {
            lyapunov: vec![
                LyapunovRecord { parameter: 0.1, exponent: f64::NAN },
                LyapunovRecord { parameter: 0.2, exponent: 0.3 },
            ],
            maxima: vec![ExtremumRecord { parameter: 0.1, value: f64::INFINITY }],
            minima: vec![ExtremumRecord { parameter: 0.1, value: -1.0 }],
            preserved: Some(PreservedTrajectory {
                parameter: 0.1,
                trajectory,
            }),
        };

        let summary = result.non_finite_summary();
        assert_eq!(
            summary,
            NonFiniteSummary {
                exponents: 1,
                maxima: 1,
                minima: 0,
                trajectory_points: 1,
            }
        );
        assert!(!summary.is_clean());
        assert!(SweepResult::default().non_finite_summary().is_clean());
    }

    #[test]
    fn serializes_to_plain_json_arrays() {
        let result = SweepResult {
            lyapunov: vec![LyapunovRecord { parameter: 0.5, exponent: 0.25 }],
            maxima: Vec::new(),
            minima: Vec::new(),
            preserved: None,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["lyapunov"][0]["parameter"], 0.5);
        assert_eq!(json["lyapunov"][0]["exponent"], 0.25);
        assert!(json["preserved"].is_null());
    }
}
