pub mod error;
pub mod extrema;
pub mod grid;
pub mod lyapunov;
pub mod result;
pub mod solvers;
pub mod sweep;
pub mod system;
pub mod trajectory;
/// The `rossler_core` crate is the numerical engine behind the Rossler bifurcation sweep.
/// It integrates the Rossler flow together with its variational (tangent) equation,
/// estimates a Lyapunov exponent per parameter value and extracts the extrema of `z`
/// that make up the bifurcation diagram.
///
/// Key components:
/// - **Traits**: `VectorField` (flow + linearization), `Steppable` (fixed-step solvers),
///   `ParameterizedField` (a one-parameter family of flows).
/// - **Solvers**: Forward Euler (reference scheme) and RK4, both fixed-step.
/// - **Lyapunov**: mean log-norm accumulator and a renormalizing (Benettin) variant.
/// - **Extrema**: strict local maxima/minima scan.
/// - **Sweep**: warm-started parameter continuation producing a `SweepResult`.
pub mod traits;

pub use error::SweepError;
pub use result::SweepResult;
pub use sweep::{run_sweep, ParameterSweep, PreserveSelector, SweepConfig};
