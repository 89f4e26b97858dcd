//! # Canvas Sizing
//!
//! Fits a model aspect ratio into the space available for the drawing
//! canvas.

use crate::WasmError;
use wasm_bindgen::prelude::*;

/// Largest canvas with the model's aspect ratio that fits a container.
///
/// `scale` converts model units to canvas pixels, `max_scale` the reverse.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub ratio: f64,
    pub scale: f64,
    pub max_scale: f64,
    pub width: f64,
    pub height: f64,
    pub max_width: f64,
    pub max_height: f64,
}

/// Computes the canvas size for a `width` x `height` model inside a
/// `container_width` x `container_height` area.
///
/// The canvas spans the full container width unless that would make it
/// taller than the container, in which case it spans the full height.
///
/// # Example
///
/// ```
/// let size = draw_wasm::fit_canvas_size_internal(200.0, 100.0, 400.0, 400.0).unwrap();
/// assert_eq!((size.max_width, size.max_height), (400.0, 200.0));
/// assert_eq!(size.scale, 2.0);
/// ```
pub fn fit_canvas_size_internal(
    width: f64,
    height: f64,
    container_width: f64,
    container_height: f64,
) -> Result<CanvasSize, WasmError> {
    for (name, value) in [
        ("width", width),
        ("height", height),
        ("container width", container_width),
        ("container height", container_height),
    ] {
        if !(value > 0.0 && value.is_finite()) {
            return Err(WasmError::InvalidSize(format!(
                "{name} must be positive, got {value}"
            )));
        }
    }

    let ratio = width / height;
    let (max_width, max_height) = if container_width / ratio > container_height {
        (container_height * ratio, container_height)
    } else {
        (container_width, container_width / ratio)
    };

    Ok(CanvasSize {
        ratio,
        scale: max_width / width,
        max_scale: width / max_width,
        width,
        height,
        max_width,
        max_height,
    })
}

/// JavaScript entry point for [`fit_canvas_size_internal`].
#[wasm_bindgen]
pub fn fit_canvas_size(
    width: f64,
    height: f64,
    container_width: f64,
    container_height: f64,
) -> Result<CanvasSize, JsValue> {
    fit_canvas_size_internal(width, height, container_width, container_height)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}
