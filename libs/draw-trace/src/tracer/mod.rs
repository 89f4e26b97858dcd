//! # Contour Tracer
//!
//! Converts a raster into per-color layers of closed contours.
//!
//! ## Pipeline
//!
//! 1. Quantize every pixel to its nearest palette color
//! 2. Walk the boundary loops of each color layer on the pixel-corner lattice
//! 3. Fit line and quadratic segments to each loop, tightening the fit
//!    until the outline is a simple ring
//! 4. Link every hole to the smallest enclosing outer path of its layer
//!
//! Output coordinates are raster units: x in `[0, width]`, y in
//! `[0, height]`, y pointing down.
//!
//! ## Example
//!
//! ```rust
//! use draw_trace::{trace_image, RasterImage, Rgba, TraceOptions, TracePalette};
//!
//! let image = RasterImage::from_fn(8, 8, |x, y| {
//!     if (2..6).contains(&x) && (2..6).contains(&y) {
//!         Rgba::new(0, 0, 0, 255)
//!     } else {
//!         Rgba::new(255, 255, 255, 255)
//!     }
//! })
//! .unwrap();
//!
//! let trace = trace_image(&image, &TracePalette::default(), &TraceOptions::default()).unwrap();
//! assert_eq!(trace.layers.len(), 2);
//! assert_eq!(trace.layers[0].paths.len(), 1);
//! ```

mod edges;
mod fit;


use crate::error::{TraceError, TraceResult};
use crate::geometry::{bounds, find_ring_defect, point_in_polygon};
use crate::path::{TraceData, TracedLayer, TracedPath};
use crate::palette::TracePalette;
use crate::raster::RasterImage;
use config::constants::{
    ResourceLimits, CURVE_SUBDIVISIONS, DEFAULT_CURVE_TOLERANCE, DEFAULT_LINE_TOLERANCE,
};
use glam::DVec2;
use edges::BoundaryLoop;
use tracing::{debug, info, warn};

/// Tracing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOptions {
    /// Maximum distance, in pixels, a point may deviate from a fitted line.
    pub line_tolerance: f64,
    /// Maximum distance, in pixels, a point may deviate from a fitted curve.
    /// Zero disables curves.
    pub curve_tolerance: f64,
    pub limits: ResourceLimits,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            curve_tolerance: DEFAULT_CURVE_TOLERANCE,
            limits: ResourceLimits::default(),
        }
    }
}

impl TraceOptions {
    /// Checks that both tolerances are finite and non-negative.
    pub fn validate(&self) -> TraceResult<()> {
        for (name, value) in [
            ("line tolerance", self.line_tolerance),
            ("curve tolerance", self.curve_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TraceError::invalid_dimensions(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Traces `image` into one layer per palette color.
///
/// # Errors
///
/// - `InvalidDimensions` for invalid tolerances
/// - `ResourceLimit` when the raster or the traced path count exceeds
///   `options.limits`
pub fn trace_image(
    image: &RasterImage,
    palette: &TracePalette,
    options: &TraceOptions,
) -> TraceResult<TraceData> {
    options.validate()?;
    let limits = options.limits;
    if image.pixel_count() > limits.max_pixels {
        return Err(TraceError::resource_limit(
            "raster pixels",
            image.pixel_count(),
            limits.max_pixels,
        ));
    }

    debug!(
        width = image.width(),
        height = image.height(),
        colors = palette.len(),
        "Tracing raster"
    );

    let quantized = palette.quantize(image);
    let mut remaining = limits.max_paths;
    let mut layers = Vec::with_capacity(palette.len());

    for (index, &color) in palette.colors().iter().enumerate() {
        let loops = edges::trace_loops(&quantized, index, remaining).map_err(|err| match err {
            TraceError::ResourceLimit { what, .. } => {
                TraceError::resource_limit(what, limits.max_paths + 1, limits.max_paths)
            }
            other => other,
        })?;
        remaining -= loops.len();

        let paths = build_paths(&loops, options);
        debug!(layer = index, ?color, paths = paths.len(), "Traced layer");
        layers.push(TracedLayer { color, paths });
    }

    let trace = TraceData {
        width: image.width(),
        height: image.height(),
        layers,
    };
    info!(paths = trace.path_count(), "Trace complete");
    Ok(trace)
}

/// Fits every loop and links holes to their enclosing outer paths.
///
/// Loops whose outline stays degenerate after refitting are dropped. When a
/// fitted outer path and its holes touch each other, the whole group falls
/// back to its unsimplified outlines.
fn build_paths(loops: &[BoundaryLoop], options: &TraceOptions) -> Vec<TracedPath> {
    let (kept, mut paths): (Vec<&BoundaryLoop>, Vec<TracedPath>) = loops
        .iter()
        .filter_map(|l| {
            let Some(contour) =
                fit::fit_outline(&l.points, options.line_tolerance, options.curve_tolerance)
            else {
                warn!(points = l.points.len(), area = l.area, "Dropping degenerate loop");
                return None;
            };
            let path = TracedPath {
                contour,
                is_hole: l.is_hole(),
                holes: Vec::new(),
            };
            Some((l, path))
        })
        .unzip();

    let boxes: Vec<_> = kept.iter().map(|l| bounds(&l.points)).collect();
    for (h, hole) in kept.iter().enumerate().filter(|(_, l)| l.is_hole()) {
        let Some(&probe) = hole.points.first() else {
            continue;
        };
        let (hole_min, hole_max) = boxes[h];
        let parent = kept
            .iter()
            .enumerate()
            .filter(|(o, outer)| {
                let (min, max) = boxes[*o];
                !outer.is_hole()
                    && min.cmple(hole_min).all()
                    && max.cmpge(hole_max).all()
                    && point_in_polygon(probe, &outer.points)
            })
            .min_by(|(_, a), (_, b)| a.area.total_cmp(&b.area))
            .map(|(o, _)| o);

        match parent {
            Some(o) => paths[o].holes.push(h),
            None => warn!(path = h, "Hole has no enclosing outer path"),
        }
    }

    for o in 0..paths.len() {
        if paths[o].holes.is_empty() || group_is_valid(&paths, o) {
            continue;
        }
        debug!(path = o, holes = paths[o].holes.len(), "Refitting crossing hole group");
        for index in std::iter::once(o).chain(paths[o].holes.clone()) {
            if let Some(exact) = fit::fit_outline(&kept[index].points, 0.0, 0.0) {
                paths[index].contour = exact;
            }
        }
    }
    paths
}

/// True when outer path `o` and its holes form a valid polygon with holes.
fn group_is_valid(paths: &[TracedPath], o: usize) -> bool {
    let outer = paths[o].contour.flatten(CURVE_SUBDIVISIONS);
    let holes: Vec<Vec<DVec2>> = paths[o]
        .holes
        .iter()
        .map(|&h| paths[h].contour.flatten(CURVE_SUBDIVISIONS))
        .collect();
    find_ring_defect(&outer, &holes).is_none()
}
