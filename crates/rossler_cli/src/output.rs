//! JSON encoding of a `SweepResult`.
//!
//! JSON numbers cannot hold NaN or infinities, and `serde_json` would write
//! them as `null`. Renderers need to tell a `-inf` exponent (vanishing tangent)
//! apart from NaN (overflow), so non-finite values are written as the strings
//! `"NaN"`, `"inf"` and `"-inf"`. Finite values keep the `SweepResult` layout.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use rossler_core::result::{ExtremumRecord, LyapunovRecord, PreservedTrajectory, SweepResult};
use rossler_core::trajectory::Trajectory;

pub const NAN: &str = "NaN";
pub const INFINITY: &str = "inf";
pub const NEG_INFINITY: &str = "-inf";

struct Float(f64);

impl Serialize for Float {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.is_finite() {
            serializer.serialize_f64(value)
        } else if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if value > 0.0 {
            serializer.serialize_str(INFINITY)
        } else {
            serializer.serialize_str(NEG_INFINITY)
        }
    }
}

struct Column<'a>(&'a [f64]);

impl Serialize for Column<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|&v| Float(v)))
    }
}

struct Lyapunov<'a>(&'a [LyapunovRecord]);

impl Serialize for Lyapunov<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|record| Pair {
            name: "LyapunovRecord",
            parameter: record.parameter,
            key: "exponent",
            value: record.exponent,
        }))
    }
}

struct Extrema<'a>(&'a [ExtremumRecord]);

impl Serialize for Extrema<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|record| Pair {
            name: "ExtremumRecord",
            parameter: record.parameter,
            key: "value",
            value: record.value,
        }))
    }
}

struct Pair {
    name: &'static str,
    parameter: f64,
    key: &'static str,
    value: f64,
}

impl Serialize for Pair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct(self.name, 2)?;
        record.serialize_field("parameter", &Float(self.parameter))?;
        record.serialize_field(self.key, &Float(self.value))?;
        record.end()
    }
}

struct Orbit<'a>(&'a Trajectory);

impl Serialize for Orbit<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut trajectory = serializer.serialize_struct("Trajectory", 3)?;
        trajectory.serialize_field("x", &Column(&self.0.x))?;
        trajectory.serialize_field("y", &Column(&self.0.y))?;
        trajectory.serialize_field("z", &Column(&self.0.z))?;
        trajectory.end()
    }
}

struct Preserved<'a>(&'a PreservedTrajectory);

impl Serialize for Preserved<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut preserved = serializer.serialize_struct("PreservedTrajectory", 2)?;
        preserved.serialize_field("parameter", &Float(self.0.parameter))?;
        preserved.serialize_field("trajectory", &Orbit(&self.0.trajectory))?;
        preserved.end()
    }
}

/// Serializes a `SweepResult` with non-finite values spelled out.
pub struct JsonResult<'a>(pub &'a SweepResult);

impl Serialize for JsonResult<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let result = self.0;
        let mut out = serializer.serialize_struct("SweepResult", 4)?;
        out.serialize_field("lyapunov", &Lyapunov(&result.lyapunov))?;
        out.serialize_field("maxima", &Extrema(&result.maxima))?;
        out.serialize_field("minima", &Extrema(&result.minima))?;
        out.serialize_field("preserved", &result.preserved.as_ref().map(Preserved))?;
        out.end()
    }
}
