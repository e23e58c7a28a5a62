use thiserror::Error;

/// Configuration errors detected before a sweep starts.
///
/// The numerical core itself never fails: overflow and non-finite values
/// propagate into the result series instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SweepError {
    #[error("{name} step must be positive and finite, got {value}")]
    InvalidStep { name: &'static str, value: f64 },

    #[error("{name} bounds must be finite (start = {start}, stop = {stop})")]
    NonFiniteBounds {
        name: &'static str,
        start: f64,
        stop: f64,
    },

    #[error("{name} range is empty: start {start} must be below stop {stop}")]
    EmptyRange {
        name: &'static str,
        start: f64,
        stop: f64,
    },

    #[error("{name} step {step} vanishes next to start {start}; values would not increase")]
    DegenerateStep {
        name: &'static str,
        start: f64,
        step: f64,
    },

    #[error("{name} range needs {count} samples, more than the limit of {max}")]
    TooManySamples {
        name: &'static str,
        count: f64,
        max: usize,
    },

    #[error("{name} must have finite components, got {value:?}")]
    NonFiniteVector { name: &'static str, value: [f64; 3] },

    #[error("preserve index {index} is out of range for {len} parameter values")]
    PreserveIndexOutOfRange { index: usize, len: usize },

    #[error("preserve tolerance must be non-negative and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("preserve value must be finite, got {0}")]
    NonFinitePreserveValue(f64),
}
