//! Single-parameter Rossler stepper for live trajectory previews.

use rossler_core::solvers::{ForwardEuler, Rk4};
use rossler_core::system::Rossler;
use rossler_core::traits::{State, Steppable, Tangent};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmRossler {
    system: Rossler,
    state: State,
    tangent: Tangent,
    t: f64,
    solver: SolverType,
}

enum SolverType {
    Euler(ForwardEuler),
    Rk4(Rk4),
}

#[wasm_bindgen]
impl WasmRossler {
    #[wasm_bindgen(constructor)]
    pub fn new(a: f64, b: f64, c: f64, solver_name: &str) -> Result<WasmRossler, JsValue> {
        console_error_panic_hook::set_once();
        Self::build(a, b, c, solver_name).map_err(|e| JsValue::from_str(&e))
    }

    pub fn set_state(&mut self, state: &[f64]) -> Result<(), JsValue> {
        self.state = vector_from_slice(state).map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn get_state(&self) -> Vec<f64> {
        self.state.iter().copied().collect()
    }

    pub fn set_tangent(&mut self, tangent: &[f64]) -> Result<(), JsValue> {
        self.tangent = vector_from_slice(tangent).map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    pub fn get_tangent(&self) -> Vec<f64> {
        self.tangent.iter().copied().collect()
    }

    pub fn set_t(&mut self, t: f64) {
        self.t = t;
    }

    pub fn get_t(&self) -> f64 {
        self.t
    }

    pub fn set_b(&mut self, b: f64) {
        self.system.b = b;
    }

    pub fn step(&mut self, dt: f64) {
        match &mut self.solver {
            SolverType::Euler(s) => {
                s.step(&self.system, &mut self.t, &mut self.state, &mut self.tangent, dt)
            }
            SolverType::Rk4(s) => {
                s.step(&self.system, &mut self.t, &mut self.state, &mut self.tangent, dt)
            }
        }
    }

    /// Row-major Jacobian at the current state.
    pub fn compute_jacobian(&self) -> Vec<f64> {
        let jacobian = self.system.jacobian(&self.state);
        let mut out = Vec::with_capacity(9);
        for i in 0..3 {
            for j in 0..3 {
                out.push(jacobian[(i, j)]);
            }
        }
        out
    }
}

impl WasmRossler {
    fn build(a: f64, b: f64, c: f64, solver_name: &str) -> Result<WasmRossler, String> {
        let solver = match solver_name {
            "euler" => SolverType::Euler(ForwardEuler),
            "rk4" => SolverType::Rk4(Rk4),
            _ => return Err(format!("Unknown solver: {}", solver_name)),
        };
        Ok(WasmRossler {
            system: Rossler { a, b, c },
            state: State::zeros(),
            tangent: Tangent::new(1.0, 0.0, 0.0),
            t: 0.0,
            solver,
        })
    }
}

fn vector_from_slice(values: &[f64]) -> Result<State, String> {
    if values.len() != 3 {
        return Err(format!(
            "Expected 3 components, got {}.",
            values.len()
        ));
    }
    Ok(State::new(values[0], values[1], values[2]))
}
