//! WASM-facing entry points for the drawing-to-solid pipeline.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Native tests use the `*_internal` helpers, which expose
//! Rust error types directly and do not need a JS host.
//!
//! ```
//! let pixels = vec![0u8; 4 * 8 * 8];
//! let stl = draw_wasm::create_stl_internal(&pixels, 8, 8, "{}", true).unwrap();
//! assert!(stl.len() > 84);
//! ```

use draw_mesh::{create_drawing_model, render_stl, MeshError, ModelOptions};
use draw_trace::{RasterImage, TraceOptions};
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

mod model_handle;
mod sizing;

pub use model_handle::ModelHandle;
pub use sizing::{fit_canvas_size, fit_canvas_size_internal, CanvasSize};

/// Errors surfaced across the JavaScript boundary.
#[derive(Debug, Error)]
pub enum WasmError {
    /// Options JSON could not be parsed
    #[error("Invalid options: {0}")]
    Options(#[from] serde_json::Error),

    /// Any pipeline failure
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Non-positive canvas or container size
    #[error("Invalid size: {0}")]
    InvalidSize(String),
}

impl From<draw_trace::TraceError> for WasmError {
    fn from(err: draw_trace::TraceError) -> Self {
        Self::Mesh(err.into())
    }
}

/// Everything the page sends along with the pixels.
///
/// Model dimensions use the same camelCase keys as [`ModelOptions`];
/// `lineTolerance` and `curveTolerance` override the tracing defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestOptions {
    #[serde(flatten)]
    model: ModelOptions,
    line_tolerance: Option<f64>,
    curve_tolerance: Option<f64>,
}

impl RequestOptions {
    fn parse(json: &str) -> Result<Self, WasmError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    fn trace_options(&self) -> TraceOptions {
        let defaults = TraceOptions::default();
        TraceOptions {
            line_tolerance: self.line_tolerance.unwrap_or(defaults.line_tolerance),
            curve_tolerance: self.curve_tolerance.unwrap_or(defaults.curve_tolerance),
            ..defaults
        }
    }
}

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "draw-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Traces canvas pixels and returns the framed model as STL.
///
/// `pixels` is the RGBA buffer of a canvas `ImageData`; `options_json`
/// holds the model options (see [`ModelOptions`]).
///
/// # Errors
/// Returns a JavaScript error value containing a human-readable message
/// when the options are malformed or any pipeline stage fails.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const bytes = create_stl(imageData.data, imageData.width, imageData.height,
/// //     JSON.stringify({ width: 100, height: 100 }), true);
/// ```
#[wasm_bindgen]
pub fn create_stl(
    pixels: &[u8],
    raster_width: u32,
    raster_height: u32,
    options_json: &str,
    binary: bool,
) -> Result<Vec<u8>, JsValue> {
    create_stl_internal(pixels, raster_width, raster_height, options_json, binary)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Host-only implementation of [`create_stl`].
pub fn create_stl_internal(
    pixels: &[u8],
    raster_width: u32,
    raster_height: u32,
    options_json: &str,
    binary: bool,
) -> Result<Vec<u8>, WasmError> {
    let options = RequestOptions::parse(options_json)?;
    let image = RasterImage::new(raster_width, raster_height, pixels.to_vec())?;
    Ok(render_stl(
        &image,
        &options.model,
        &options.trace_options(),
        binary,
    )?)
}

/// Traces canvas pixels and returns a handle with preview buffers and STL
/// bytes.
///
/// # Errors
/// Returns a JavaScript error value when the options are malformed or any
/// pipeline stage fails.
#[wasm_bindgen]
pub fn create_model(
    pixels: &[u8],
    raster_width: u32,
    raster_height: u32,
    options_json: &str,
) -> Result<ModelHandle, JsValue> {
    create_model_internal(pixels, raster_width, raster_height, options_json)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Host-only implementation of [`create_model`].
pub fn create_model_internal(
    pixels: &[u8],
    raster_width: u32,
    raster_height: u32,
    options_json: &str,
) -> Result<ModelHandle, WasmError> {
    let options = RequestOptions::parse(options_json)?;
    let image = RasterImage::new(raster_width, raster_height, pixels.to_vec())?;
    let model = create_drawing_model(&image, &options.model, &options.trace_options())?;
    Ok(ModelHandle::from_model(&model)?)
}
