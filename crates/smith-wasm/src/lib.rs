//! WASM bindings for smith-core
//!
//! This module exposes smith-core functionality to JavaScript/WASM.

use js_sys::Float64Array;
use num_complex::Complex64;
use smith_core::math;
use wasm_bindgen::prelude::*;

mod chart;
mod matching;

pub use chart::WasmSmithChart;
pub use matching::WasmMatchingNetwork;

/// Get the library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn to_js_err(err: smith_core::SmithError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Impedance for a reflection coefficient
///
/// @returns Float64Array [R, X]
#[wasm_bindgen(js_name = gammaToImpedance)]
pub fn gamma_to_impedance(gamma_re: f64, gamma_im: f64, z0: f64) -> Result<Float64Array, JsValue> {
    let z = math::gamma_to_impedance(Complex64::new(gamma_re, gamma_im), z0).map_err(to_js_err)?;
    Ok(Float64Array::from(&[z.re, z.im][..]))
}

/// Reflection coefficient for an impedance
///
/// @returns Float64Array [Γre, Γim]
#[wasm_bindgen(js_name = impedanceToGamma)]
pub fn impedance_to_gamma(r: f64, x: f64, z0: f64) -> Result<Float64Array, JsValue> {
    let g = math::impedance_to_gamma(Complex64::new(r, x), z0).map_err(to_js_err)?;
    Ok(Float64Array::from(&[g.re, g.im][..]))
}

/// |Γ| in dB; a zero magnitude returns -Infinity
#[wasm_bindgen(js_name = gammaMagnitudeToDb)]
pub fn gamma_magnitude_to_db(magnitude: f64) -> Result<f64, JsValue> {
    math::gamma_magnitude_to_db(magnitude).map_err(to_js_err)
}

/// |Γ| for a dB value ≤ 0
#[wasm_bindgen(js_name = dbToGammaMagnitude)]
pub fn db_to_gamma_magnitude(db: f64) -> Result<f64, JsValue> {
    math::db_to_gamma_magnitude(db).map_err(to_js_err)
}
