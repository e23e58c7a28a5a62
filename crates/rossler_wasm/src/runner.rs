//! Incremental bifurcation sweep runner.

use anyhow::Context;
use js_sys::Float64Array;
use rossler_core::result::SweepResult;
use rossler_core::sweep::{ParameterSweep, SweepConfig, SweepProgress};
use rossler_core::system::RosslerFamily;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmBifurcationRunner {
    sweep: Option<ParameterSweep<RosslerFamily>>,
    result: Option<SweepResult>,
}

#[wasm_bindgen]
impl WasmBifurcationRunner {
    #[wasm_bindgen(constructor)]
    pub fn new(config_val: JsValue) -> Result<WasmBifurcationRunner, JsValue> {
        console_error_panic_hook::set_once();

        let config: SweepConfig = from_value(config_val)
            .map_err(|e| JsValue::from_str(&format!("Invalid sweep config: {}", e)))?;
        Self::from_config(&config).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }

    pub fn is_done(&self) -> bool {
        self.result.is_some()
    }

    /// Runs up to `batch_size` parameter values and reports progress.
    pub fn run_steps(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        let progress = self
            .advance(batch_size as usize)
            .map_err(|e| JsValue::from_str(&e))?;
        to_value(&progress).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn get_progress(&self) -> Result<JsValue, JsValue> {
        to_value(&self.progress())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn get_result(&self) -> Result<JsValue, JsValue> {
        let result = self.finished().map_err(|e| JsValue::from_str(&e))?;
        to_value(result).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn lyapunov_parameters(&self) -> Result<Float64Array, JsValue> {
        self.column(|r| r.lyapunov_columns().0)
    }

    pub fn lyapunov_exponents(&self) -> Result<Float64Array, JsValue> {
        self.column(|r| r.lyapunov_columns().1)
    }

    pub fn maxima_parameters(&self) -> Result<Float64Array, JsValue> {
        self.column(|r| r.maxima_columns().0)
    }

    pub fn maxima_values(&self) -> Result<Float64Array, JsValue> {
        self.column(|r| r.maxima_columns().1)
    }

    pub fn minima_parameters(&self) -> Result<Float64Array, JsValue> {
        self.column(|r| r.minima_columns().0)
    }

    pub fn minima_values(&self) -> Result<Float64Array, JsValue> {
        self.column(|r| r.minima_columns().1)
    }

    pub fn has_preserved_trajectory(&self) -> bool {
        self.result
            .as_ref()
            .map_or(false, |r| r.preserved.is_some())
    }

    /// Coordinate column `axis` ("x", "y" or "z") of the preserved trajectory.
    pub fn preserved_axis(&self, axis: &str) -> Result<Float64Array, JsValue> {
        let result = self.finished().map_err(|e| JsValue::from_str(&e))?;
        let preserved = result
            .preserved
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No trajectory was preserved."))?;
        let values = match axis {
            "x" => &preserved.trajectory.x,
            "y" => &preserved.trajectory.y,
            "z" => &preserved.trajectory.z,
            _ => return Err(JsValue::from_str(&format!("Unknown axis: {}", axis))),
        };
        Ok(Float64Array::from(values.as_slice()))
    }
}

impl WasmBifurcationRunner {
    fn from_config(config: &SweepConfig) -> anyhow::Result<Self> {
        let sweep = ParameterSweep::rossler(config).context("Failed to create sweep")?;
        Ok(Self {
            sweep: Some(sweep),
            result: None,
        })
    }

    fn advance(&mut self, batch: usize) -> Result<SweepProgress, String> {
        if self.result.is_some() {
            return Ok(self.progress());
        }
        let sweep = self
            .sweep
            .as_mut()
            .ok_or_else(|| "Runner not initialized".to_string())?;
        let progress = sweep.advance(batch);
        if progress.done {
            if let Some(sweep) = self.sweep.take() {
                self.result = Some(sweep.into_result());
            }
        }
        Ok(progress)
    }

    fn progress(&self) -> SweepProgress {
        match (&self.sweep, &self.result) {
            (Some(sweep), _) => sweep.progress(),
            (None, Some(result)) => SweepProgress {
                done: true,
                current_step: result.lyapunov.len(),
                max_steps: result.lyapunov.len(),
            },
            (None, None) => SweepProgress {
                done: true,
                current_step: 0,
                max_steps: 0,
            },
        }
    }

    fn finished(&self) -> Result<&SweepResult, String> {
        self.result
            .as_ref()
            .ok_or_else(|| "Sweep has not finished yet.".to_string())
    }

    fn column(&self, extract: impl Fn(&SweepResult) -> Vec<f64>) -> Result<Float64Array, JsValue> {
        let result = self.finished().map_err(|e| JsValue::from_str(&e))?;
        Ok(Float64Array::from(extract(result).as_slice()))
    }
}

/// Runs a whole sweep in one call and returns the serialized `SweepResult`.
#[wasm_bindgen]
pub fn compute_bifurcation_sweep(config_val: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let config: SweepConfig = from_value(config_val)
        .map_err(|e| JsValue::from_str(&format!("Invalid sweep config: {}", e)))?;
    let result = rossler_core::run_sweep(&config)
        .map_err(|e| JsValue::from_str(&format!("Sweep failed: {}", e)))?;
    to_value(&result).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
