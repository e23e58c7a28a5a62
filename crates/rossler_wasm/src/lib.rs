//! Browser bindings for the Rossler sweep.
//!
//! Renderers on the JS side only ever receive finished numeric arrays; nothing
//! here feeds back into the simulation.

mod runner;
mod system;

pub use runner::{compute_bifurcation_sweep, WasmBifurcationRunner};
pub use system::WasmRossler;
