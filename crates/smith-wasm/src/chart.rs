//! WASM bindings for the Smith chart grid

use js_sys::Float64Array;
use num_complex::Complex64;
use smith_core::chart::{ChartConfig, ReturnLossTarget, SmithChart};
use wasm_bindgen::prelude::*;

use crate::to_js_err;

/// Smith chart grid for WASM
#[wasm_bindgen]
pub struct WasmSmithChart {
    inner: SmithChart,
    target: ReturnLossTarget,
}

#[wasm_bindgen]
impl WasmSmithChart {
    /// Create a chart
    ///
    /// @param config_json - Optional JSON config; omitted fields use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WasmSmithChart, JsValue> {
        let config = match config_json {
            Some(json) => ChartConfig::from_json(&json).map_err(to_js_err)?,
            None => ChartConfig::default(),
        };
        Ok(WasmSmithChart {
            inner: SmithChart::new(config).map_err(to_js_err)?,
            target: ReturnLossTarget::default(),
        })
    }

    /// Reference impedance in ohms
    #[wasm_bindgen(getter)]
    pub fn z0(&self) -> f64 {
        self.inner.z0()
    }

    /// Change Z0; the grid is rebuilt
    #[wasm_bindgen(js_name = setZ0)]
    pub fn set_z0(&mut self, z0: f64) -> Result<(), JsValue> {
        self.inner.set_reference_impedance(z0).map_err(to_js_err)
    }

    /// All contours as a JSON array of tagged shape descriptors
    #[wasm_bindgen(js_name = contoursJson)]
    pub fn contours_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.contours())
            .map_err(|e| JsValue::from_str(&format!("JSON error: {}", e)))
    }

    /// Sampled reactance arc for grid index `index`, flattened as [x0, y0, x1, y1, ...]
    #[wasm_bindgen(js_name = arcPoints)]
    pub fn arc_points(&self, index: usize) -> Option<Float64Array> {
        let arcs = self.inner.arc_polylines();
        let (_, pts) = arcs.get(index)?;
        let flat: Vec<f64> = pts.iter().flat_map(|p| [p.x, p.y]).collect();
        Some(Float64Array::from(flat.as_slice()))
    }

    /// Number of reactance arcs in the grid
    #[wasm_bindgen(getter, js_name = arcCount)]
    pub fn arc_count(&self) -> usize {
        self.inner.arc_polylines().len()
    }

    /// Readout text for a hovered point, or None off the chart
    pub fn readout(&self, gamma_re: f64, gamma_im: f64) -> Option<String> {
        self.inner
            .readout(Complex64::new(gamma_re, gamma_im))
            .ok()
            .map(|r| r.to_string())
    }

    /// Current |Γ| target
    #[wasm_bindgen(getter, js_name = targetMagnitude)]
    pub fn target_magnitude(&self) -> f64 {
        self.target.magnitude()
    }

    /// Current target in dB
    #[wasm_bindgen(getter, js_name = targetDb)]
    pub fn target_db(&self) -> f64 {
        self.target.db()
    }

    #[wasm_bindgen(js_name = setTargetMagnitude)]
    pub fn set_target_magnitude(&mut self, magnitude: f64) -> Result<(), JsValue> {
        self.target = ReturnLossTarget::from_magnitude(magnitude).map_err(to_js_err)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setTargetDb)]
    pub fn set_target_db(&mut self, db: f64) -> Result<(), JsValue> {
        self.target = ReturnLossTarget::from_db(db).map_err(to_js_err)?;
        Ok(())
    }

    /// Step |Γ| by `steps` hundredths
    #[wasm_bindgen(js_name = stepTargetMagnitude)]
    pub fn step_target_magnitude(&mut self, steps: i32) -> Result<(), JsValue> {
        self.target.step_magnitude(steps).map_err(to_js_err)
    }

    /// Step dB by `steps` tenths
    #[wasm_bindgen(js_name = stepTargetDb)]
    pub fn step_target_db(&mut self, steps: i32) -> Result<(), JsValue> {
        self.target.step_db(steps).map_err(to_js_err)
    }
}

impl WasmSmithChart {
    /// Get the inner SmithChart reference
    pub fn inner(&self) -> &SmithChart {
        &self.inner
    }
}
