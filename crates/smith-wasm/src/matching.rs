//! WASM bindings for the matching network engine

use js_sys::Float64Array;
use num_complex::Complex64;
use smith_core::frequency::FrequencyUnit;
use smith_core::matching::{Component, Element, LoadPolicy, MatchingNetwork, Placement};
use wasm_bindgen::prelude::*;

use crate::to_js_err;

/// Parse a component kind such as "series-inductor" or "shunt_capacitor"
fn parse_kind(kind: &str) -> Result<(Placement, Element), JsValue> {
    match kind.to_lowercase().replace('_', "-").as_str() {
        "series-inductor" => Ok((Placement::Series, Element::Inductor)),
        "series-capacitor" => Ok((Placement::Series, Element::Capacitor)),
        "shunt-inductor" => Ok((Placement::Shunt, Element::Inductor)),
        "shunt-capacitor" => Ok((Placement::Shunt, Element::Capacitor)),
        k => Err(JsValue::from_str(&format!("Invalid component kind: {}", k))),
    }
}

fn flatten(values: &[Complex64]) -> Float64Array {
    let flat: Vec<f64> = values.iter().flat_map(|z| [z.re, z.im]).collect();
    Float64Array::from(flat.as_slice())
}

/// Matching network engine for WASM
#[wasm_bindgen]
pub struct WasmMatchingNetwork {
    inner: MatchingNetwork,
}

#[wasm_bindgen]
impl WasmMatchingNetwork {
    /// Create an empty engine
    ///
    /// @param strict - Reject negative load resistance when true
    #[wasm_bindgen(constructor)]
    pub fn new(strict: Option<bool>) -> WasmMatchingNetwork {
        let policy = if strict.unwrap_or(false) {
            LoadPolicy::Strict
        } else {
            LoadPolicy::Permissive
        };
        WasmMatchingNetwork {
            inner: MatchingNetwork::with_policy(policy),
        }
    }

    /// Set the load; returns true when the load is passive
    #[wasm_bindgen(js_name = setLoad)]
    pub fn set_load(&mut self, r: f64, x: f64) -> Result<bool, JsValue> {
        let passivity = self.inner.set_load(Complex64::new(r, x)).map_err(to_js_err)?;
        Ok(passivity == smith_core::matching::Passivity::Passive)
    }

    /// Insert a component
    ///
    /// @param kind - 'series-inductor', 'series-capacitor', 'shunt-inductor' or 'shunt-capacitor'
    /// @param value - Inductance in H or capacitance in F
    /// @param frequency - Frequency in `unit`
    /// @param unit - Frequency unit ('Hz', 'kHz', 'MHz', 'GHz', 'THz'), default 'Hz'
    /// @returns Float64Array [R, X] of the new impedance
    #[wasm_bindgen(js_name = addComponent)]
    pub fn add_component(
        &mut self,
        kind: &str,
        value: f64,
        frequency: f64,
        unit: Option<String>,
    ) -> Result<Float64Array, JsValue> {
        let (placement, element) = parse_kind(kind)?;
        let unit: FrequencyUnit = unit
            .as_deref()
            .unwrap_or("Hz")
            .parse()
            .map_err(to_js_err)?;
        let component = Component::new(placement, element, value, unit.to_hz(frequency));
        let z = self.inner.add_component(component).map_err(to_js_err)?;
        Ok(Float64Array::from(&[z.re, z.im][..]))
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Number of trajectory points
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Trajectory impedances flattened as [R0, X0, R1, X1, ...]
    #[wasm_bindgen(getter)]
    pub fn trajectory(&self) -> Float64Array {
        flatten(self.inner.trajectory())
    }

    /// Trajectory in Γ flattened as [re0, im0, re1, im1, ...]
    #[wasm_bindgen(js_name = gammaTrajectory)]
    pub fn gamma_trajectory(&self, z0: f64) -> Result<Float64Array, JsValue> {
        let gammas = self.inner.gamma_trajectory(z0).map_err(to_js_err)?;
        Ok(flatten(&gammas))
    }
}
