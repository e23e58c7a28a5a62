use crate::traits::{ParameterizedField, State, Tangent, VectorField};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

pub const DEFAULT_A: f64 = 0.2;
pub const DEFAULT_C: f64 = 5.7;

/// The Rossler flow
///
/// ```text
/// x' = -y - z
/// y' = x + a y
/// z' = b + z (x - c)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rossler {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Rossler {
    /// Rossler system at `b` with the classic `a = 0.2`, `c = 5.7`.
    pub fn new(b: f64) -> Self {
        Self {
            a: DEFAULT_A,
            b,
            c: DEFAULT_C,
        }
    }

    /// Row-major Jacobian of the flow at `state`. Independent of `b`.
    pub fn jacobian(&self, state: &State) -> Matrix3<f64> {
        Matrix3::new(
            0.0, -1.0, -1.0, //
            1.0, self.a, 0.0, //
            state.z, 0.0, state.x - self.c,
        )
    }
}

impl VectorField for Rossler {
    fn derivatives(&self, state: &State, tangent: &Tangent) -> (State, Tangent) {
        let (x, y, z) = (state.x, state.y, state.z);
        let (dx, dy, dz) = (tangent.x, tangent.y, tangent.z);

        let state_dot = State::new(-y - z, x + self.a * y, self.b + z * (x - self.c));

        // Expanded `jacobian * tangent`.
        let tangent_dot = Tangent::new(
            -dy - dz,
            dx + self.a * dy,
            z * dx + x * dz - self.c * dz,
        );

        (state_dot, tangent_dot)
    }
}

/// The Rossler family swept over `b` with `a` and `c` held fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RosslerFamily {
    pub a: f64,
    pub c: f64,
}

impl Default for RosslerFamily {
    fn default() -> Self {
        Self {
            a: DEFAULT_A,
            c: DEFAULT_C,
        }
    }
}

impl ParameterizedField for RosslerFamily {
    type Field = Rossler;

    fn at(&self, parameter: f64) -> Rossler {
        Rossler {
            a: self.a,
            b: parameter,
            c: self.c,
        }
    }
}
