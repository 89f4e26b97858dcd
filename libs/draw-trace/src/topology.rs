//! # Path Topology
//!
//! Groups traced paths into shapes: one outer contour plus the holes it owns.

use crate::error::{TraceError, TraceResult};
use crate::path::{Contour, TraceData};
use crate::raster::Rgba;
use config::constants::BACKGROUND_CHANNEL_THRESHOLD;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A closed outer contour and the hole contours cut out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub outer: Contour,
    pub holes: Vec<Contour>,
}

impl Shape {
    /// Creates a shape without holes.
    pub fn new(outer: Contour) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Adds a hole.
    pub fn with_hole(mut self, hole: Contour) -> Self {
        self.holes.push(hole);
        self
    }
}

/// True when every RGB channel exceeds the background threshold.
///
/// Alpha is ignored.
///
/// # Example
///
/// ```rust
/// use draw_trace::{is_near_white, Rgba};
///
/// assert!(is_near_white(Rgba::new(255, 255, 255, 255)));
/// assert!(!is_near_white(Rgba::new(0, 0, 0, 0)));
/// assert!(!is_near_white(Rgba::new(255, 255, 240, 255)));
/// ```
#[inline]
pub fn is_near_white(color: Rgba) -> bool {
    color.r > BACKGROUND_CHANNEL_THRESHOLD
        && color.g > BACKGROUND_CHANNEL_THRESHOLD
        && color.b > BACKGROUND_CHANNEL_THRESHOLD
}

/// Collects every shape of every layer that is not near-white.
pub fn resolve_shapes(trace: &TraceData) -> TraceResult<Vec<Shape>> {
    resolve_shapes_with(trace, is_near_white)
}

/// Collects every shape of every layer whose color `is_background` rejects.
///
/// Shapes come out in layer order, then path order. Each non-hole path
/// becomes one shape carrying the contours of all holes it references.
///
/// # Errors
///
/// `Topology` when a hole index is out of range, points at a path that is
/// not a hole, or is claimed by more than one outer path.
pub fn resolve_shapes_with<F>(trace: &TraceData, is_background: F) -> TraceResult<Vec<Shape>>
where
    F: Fn(Rgba) -> bool,
{
    let mut shapes = Vec::new();

    for (layer_index, layer) in trace.layers.iter().enumerate() {
        if is_background(layer.color) {
            debug!(layer = layer_index, color = ?layer.color, "Skipping background layer");
            continue;
        }

        let mut owner: Vec<Option<usize>> = vec![None; layer.paths.len()];
        for (path_index, path) in layer.paths.iter().enumerate() {
            if path.is_hole {
                continue;
            }

            let mut shape = Shape::new(path.contour.clone());
            for &hole_index in &path.holes {
                let hole = layer.paths.get(hole_index).ok_or_else(|| {
                    TraceError::topology(format!(
                        "layer {layer_index} path {path_index} references hole {hole_index}, \
                         but the layer has {} paths",
                        layer.paths.len()
                    ))
                })?;
                if !hole.is_hole {
                    return Err(TraceError::topology(format!(
                        "layer {layer_index} path {path_index} references path {hole_index}, \
                         which is not a hole"
                    )));
                }
                if let Some(previous) = owner[hole_index].replace(path_index) {
                    return Err(TraceError::topology(format!(
                        "layer {layer_index} hole {hole_index} is claimed by paths \
                         {previous} and {path_index}"
                    )));
                }
                shape.holes.push(hole.contour.clone());
            }
            shapes.push(shape);
        }
    }

    debug!(shapes = shapes.len(), "Resolved shapes");
    Ok(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{TracedLayer, TracedPath};
    use glam::DVec2;

    const INK: Rgba = Rgba::new(0, 0, 0, 0);
    const PAPER: Rgba = Rgba::new(255, 255, 255, 255);

    fn square(origin: DVec2, size: f64) -> Contour {
        Contour::polygon(&[
            origin,
            origin + DVec2::new(size, 0.0),
            origin + DVec2::new(size, size),
            origin + DVec2::new(0.0, size),
        ])
    }

    fn outer(origin: DVec2, size: f64, holes: Vec<usize>) -> TracedPath {
        TracedPath {
            contour: square(origin, size),
            is_hole: false,
            holes,
        }
    }

    fn hole(origin: DVec2, size: f64) -> TracedPath {
        TracedPath {
            contour: square(origin, size),
            is_hole: true,
            holes: Vec::new(),
        }
    }

    fn trace(layers: Vec<TracedLayer>) -> TraceData {
        TraceData {
            width: 100,
            height: 100,
            layers,
        }
    }

    #[test]
    fn test_every_hole_free_path_becomes_a_shape() {
        for n in [1, 2, 5] {
            let paths = (0..n)
                .map(|i| outer(DVec2::new(i as f64 * 10.0, 0.0), 5.0, Vec::new()))
                .collect();
            let data = trace(vec![TracedLayer { color: INK, paths }]);
            let shapes = resolve_shapes(&data).unwrap();
            assert_eq!(shapes.len(), n);
            assert!(shapes.iter().all(|s| s.holes.is_empty()));
        }
    }

    #[test]
    fn test_holes_attach_to_owner() {
        let data = trace(vec![TracedLayer {
            color: INK,
            paths: vec![
                outer(DVec2::ZERO, 50.0, vec![1, 2]),
                hole(DVec2::new(5.0, 5.0), 10.0),
                hole(DVec2::new(20.0, 20.0), 10.0),
                outer(DVec2::new(60.0, 0.0), 10.0, Vec::new()),
            ],
        }]);
        let shapes = resolve_shapes(&data).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].holes.len(), 2);
        assert_eq!(shapes[0].holes[1].start(), DVec2::new(20.0, 20.0));
        assert!(shapes[1].holes.is_empty());
    }

    #[test]
    fn test_background_layer_is_skipped() {
        let data = trace(vec![
            TracedLayer {
                color: INK,
                paths: vec![outer(DVec2::ZERO, 5.0, Vec::new())],
            },
            TracedLayer {
                color: PAPER,
                paths: vec![outer(DVec2::ZERO, 100.0, Vec::new())],
            },
        ]);
        assert_eq!(resolve_shapes(&data).unwrap().len(), 1);
        assert_eq!(resolve_shapes_with(&data, |_| false).unwrap().len(), 2);
    }

    #[test]
    fn test_hole_index_out_of_range() {
        let data = trace(vec![TracedLayer {
            color: INK,
            paths: vec![outer(DVec2::ZERO, 5.0, vec![3])],
        }]);
        let err = resolve_shapes(&data).unwrap_err();
        assert!(matches!(err, TraceError::Topology { .. }));
    }

    #[test]
    fn test_hole_must_be_flagged() {
        let data = trace(vec![TracedLayer {
            color: INK,
            paths: vec![
                outer(DVec2::ZERO, 50.0, vec![1]),
                outer(DVec2::new(5.0, 5.0), 5.0, Vec::new()),
            ],
        }]);
        let err = resolve_shapes(&data).unwrap_err();
        assert!(err.to_string().contains("not a hole"));
    }

    #[test]
    fn test_hole_claimed_twice() {
        let data = trace(vec![TracedLayer {
            color: INK,
            paths: vec![
                outer(DVec2::ZERO, 50.0, vec![1]),
                hole(DVec2::new(5.0, 5.0), 5.0),
                outer(DVec2::ZERO, 60.0, vec![1]),
            ],
        }]);
        let err = resolve_shapes(&data).unwrap_err();
        assert!(err.to_string().contains("claimed"));
    }

    #[test]
    fn test_near_white_threshold() {
        assert!(is_near_white(Rgba::new(241, 241, 241, 0)));
        assert!(!is_near_white(Rgba::new(241, 100, 241, 255)));
    }
}
