//! # Drawing Pipeline
//!
//! Raster in, model or STL bytes out:
//!
//! ```text
//! RasterImage → trace_image → resolve_shapes → extrude_shapes ─┐
//!                                               build_frame ───┴→ assemble_model → STL
//! ```

use crate::error::{MeshError, MeshResult};
use crate::export::{to_stl_ascii, to_stl_binary};
use crate::model::{assemble_model, Model, ModelLayout};
use crate::ops::extrude::{extrude_shapes, ExtrudeParams};
use crate::primitives::build_frame;
use config::constants::{
    BORDER_DEPTH_RATIO, BORDER_WIDTH_RATIO, CURVE_SUBDIVISIONS, DEFAULT_BORDER_DEPTH,
    DEFAULT_BORDER_WIDTH, DEFAULT_DRAWING_DEPTH, DEFAULT_FRAME_DEPTH, DEFAULT_SOLID_NAME,
    DRAWING_DEPTH_RATIO, FRAME_DEPTH_RATIO,
};
use draw_trace::{resolve_shapes, trace_image, RasterImage, TraceOptions, TracePalette};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Physical model dimensions.
///
/// Deserializes from camelCase JSON; omitted fields take their defaults.
///
/// # Example
///
/// ```rust
/// use draw_mesh::ModelOptions;
///
/// let options: ModelOptions = serde_json::from_str(r#"{"width": 150, "height": 80}"#).unwrap();
/// assert_eq!(options.width, 150.0);
/// assert_eq!(options.frame_depth, 5.0);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelOptions {
    /// Height of the frame floor the drawing stands on
    pub frame_depth: f64,
    /// Extrusion depth of the drawing
    pub drawing_depth: f64,
    /// Width of the frame rim
    pub border_width: f64,
    /// Height of the frame rim
    pub border_depth: f64,
    /// Outer model width
    pub width: f64,
    /// Outer model height
    pub height: f64,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            frame_depth: DEFAULT_FRAME_DEPTH,
            drawing_depth: DEFAULT_DRAWING_DEPTH,
            border_width: DEFAULT_BORDER_WIDTH,
            border_depth: DEFAULT_BORDER_DEPTH,
            width: 100.0,
            height: 100.0,
        }
    }
}

impl ModelOptions {
    /// Options whose depths and border scale with the mean of `width` and
    /// `height`.
    pub fn proportional(width: f64, height: f64) -> Self {
        let size = (width + height) / 2.0;
        Self {
            frame_depth: size * FRAME_DEPTH_RATIO,
            drawing_depth: size * DRAWING_DEPTH_RATIO,
            border_width: size * BORDER_WIDTH_RATIO,
            border_depth: size * BORDER_DEPTH_RATIO,
            width,
            height,
        }
    }

    /// Checks value ranges. The border width may be zero here; the frame
    /// builder rejects it later.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` naming the first offending field.
    pub fn validate(&self) -> MeshResult<()> {
        let positive = [
            ("frameDepth", self.frame_depth),
            ("drawingDepth", self.drawing_depth),
            ("borderDepth", self.border_depth),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(MeshError::invalid_dimensions(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.border_width >= 0.0 && self.border_width.is_finite()) {
            return Err(MeshError::invalid_dimensions(format!(
                "borderWidth must not be negative, got {}",
                self.border_width
            )));
        }
        Ok(())
    }

    /// Size the drawing is scaled to: the model minus the rim on each side.
    pub fn drawing_size(&self) -> (f64, f64) {
        (
            self.width - 2.0 * self.border_width,
            self.height - 2.0 * self.border_width,
        )
    }
}

/// Traces `image` and builds the framed model.
///
/// # Errors
///
/// The first failing stage aborts the pipeline:
/// - `InvalidDimensions` for bad options
/// - `Trace` for tracing or topology failures
/// - `Geometry` for contours that cannot be extruded
/// - `ResourceLimit` when a configured bound is exceeded
pub fn create_drawing_model(
    image: &RasterImage,
    options: &ModelOptions,
    trace_options: &TraceOptions,
) -> MeshResult<Model> {
    options.validate()?;
    let frame = build_frame(
        options.width,
        options.height,
        options.frame_depth,
        options.border_width,
        options.border_depth,
    )?;

    let trace = trace_image(image, &TracePalette::default(), trace_options)?;
    let shapes = resolve_shapes(&trace)?;
    info!(
        paths = trace.path_count(),
        shapes = shapes.len(),
        "Resolved drawing shapes"
    );

    let params = ExtrudeParams {
        depth: options.drawing_depth,
        curve_subdivisions: CURVE_SUBDIVISIONS,
        max_vertices: trace_options.limits.max_polygon_vertices,
    };
    let drawing = extrude_shapes(&shapes, &params)?;

    let (drawing_width, drawing_height) = options.drawing_size();
    let layout = ModelLayout {
        width: options.width,
        height: options.height,
        frame_depth: options.frame_depth,
        drawing_width,
        drawing_height,
        raster_width: f64::from(image.width()),
        raster_height: f64::from(image.height()),
    };
    let model = assemble_model(frame, drawing, &layout);
    info!(triangles = model.triangle_count(), "Model assembled");
    Ok(model)
}

/// Runs [`create_drawing_model`] and serializes the result as STL.
pub fn render_stl(
    image: &RasterImage,
    options: &ModelOptions,
    trace_options: &TraceOptions,
    binary: bool,
) -> MeshResult<Vec<u8>> {
    let model = create_drawing_model(image, options, trace_options)?;
    if binary {
        to_stl_binary(&model)
    } else {
        to_stl_ascii(&model, DEFAULT_SOLID_NAME).map(String::into_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_match_config() {
        let options = ModelOptions::default();
        assert_eq!(options.frame_depth, 5.0);
        assert_eq!(options.drawing_depth, 10.0);
        assert_eq!(options.border_width, 2.0);
        assert_eq!(options.border_depth, 2.0);
        assert_eq!(options.drawing_size(), (96.0, 96.0));
    }

    #[test]
    fn test_proportional_options() {
        let options = ModelOptions::proportional(300.0, 100.0);
        assert_relative_eq!(options.frame_depth, 4.0);
        assert_relative_eq!(options.drawing_depth, 20.0);
        assert_relative_eq!(options.border_width, 4.0);
        assert_relative_eq!(options.border_depth, 20.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_depth = ModelOptions {
            drawing_depth: 0.0,
            ..ModelOptions::default()
        };
        let err = zero_depth.validate().unwrap_err();
        assert!(err.to_string().contains("drawingDepth"));

        let negative_border = ModelOptions {
            border_width: -1.0,
            ..ModelOptions::default()
        };
        assert!(negative_border.validate().is_err());

        let nan_width = ModelOptions {
            width: f64::NAN,
            ..ModelOptions::default()
        };
        assert!(nan_width.validate().is_err());
    }

    #[test]
    fn test_zero_border_passes_validation() {
        let options = ModelOptions {
            border_width: 0.0,
            ..ModelOptions::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_json_keys() {
        let json = r#"{
            "frameDepth": 3,
            "drawingDepth": 7.5,
            "borderWidth": 1,
            "borderDepth": 4,
            "width": 120,
            "height": 60
        }"#;
        let options: ModelOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.frame_depth, 3.0);
        assert_eq!(options.drawing_depth, 7.5);
        assert_eq!(options.border_width, 1.0);
        assert_eq!(options.border_depth, 4.0);
        assert_eq!(options.width, 120.0);
        assert_eq!(options.height, 60.0);

        let round = serde_json::to_value(options).unwrap();
        assert!(round.get("frameDepth").is_some());
    }
}
