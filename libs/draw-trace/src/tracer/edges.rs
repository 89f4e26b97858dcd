//! Boundary loops on the pixel-corner lattice.
//!
//! Every pixel side separating a layer pixel from a non-layer pixel (or from
//! the image border) becomes a directed edge with the layer on its right in
//! screen space. Linking the edges yields closed loops: outer boundaries run
//! clockwise on screen (positive shoelace area in raster coordinates), holes
//! run counter-clockwise.

use crate::error::{TraceError, TraceResult};
use crate::geometry::signed_area;
use crate::palette::QuantizedImage;
use glam::DVec2;

/// Screen-space direction of a lattice edge (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    East,
    South,
    West,
    North,
}

impl Dir {
    const ALL: [Dir; 4] = [Dir::East, Dir::South, Dir::West, Dir::North];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }

    #[inline]
    fn step(self) -> (isize, isize) {
        match self {
            Dir::East => (1, 0),
            Dir::South => (0, 1),
            Dir::West => (-1, 0),
            Dir::North => (0, -1),
        }
    }

    /// Clockwise quarter turn on screen.
    #[inline]
    fn right(self) -> Dir {
        Dir::ALL[(self as usize + 1) % 4]
    }

    #[inline]
    fn left(self) -> Dir {
        Dir::ALL[(self as usize + 3) % 4]
    }
}

/// A closed boundary loop through lattice edge midpoints.
#[derive(Debug, Clone)]
pub(crate) struct BoundaryLoop {
    /// Midpoint of every edge, in walk order.
    pub points: Vec<DVec2>,
    /// Shoelace area of `points` in raster coordinates.
    pub area: f64,
}

impl BoundaryLoop {
    /// Holes wind opposite to outer boundaries.
    #[inline]
    pub fn is_hole(&self) -> bool {
        self.area < 0.0
    }
}

/// Traces every boundary loop of `layer`, in row-major order of each loop's
/// first lattice vertex.
///
/// Fails with a resource limit error once more than `max_loops` loops have
/// been found.
pub(crate) fn trace_loops(
    image: &QuantizedImage,
    layer: usize,
    max_loops: usize,
) -> TraceResult<Vec<BoundaryLoop>> {
    let w = image.width();
    let h = image.height();
    let stride = w + 1;
    let mut outgoing = vec![0u8; stride * (h + 1)];

    for y in 0..h {
        for x in 0..w {
            if image.index(x, y) != layer {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            if !image.is_layer(xi, yi - 1, layer) {
                outgoing[y * stride + x] |= Dir::East.bit();
            }
            if !image.is_layer(xi + 1, yi, layer) {
                outgoing[y * stride + x + 1] |= Dir::South.bit();
            }
            if !image.is_layer(xi, yi + 1, layer) {
                outgoing[(y + 1) * stride + x + 1] |= Dir::West.bit();
            }
            if !image.is_layer(xi - 1, yi, layer) {
                outgoing[(y + 1) * stride + x] |= Dir::North.bit();
            }
        }
    }

    let mut loops = Vec::new();
    for start in 0..outgoing.len() {
        while outgoing[start] != 0 {
            if loops.len() == max_loops {
                return Err(TraceError::resource_limit(
                    "traced paths",
                    max_loops + 1,
                    max_loops,
                ));
            }
            loops.push(walk_loop(&mut outgoing, stride, start));
        }
    }
    Ok(loops)
}

/// Follows edges from `start` until the loop closes, consuming them.
///
/// At vertices with two outgoing edges (diagonal pixel contacts) the walk
/// prefers a right turn, so layer regions are 4-connected.
fn walk_loop(outgoing: &mut [u8], stride: usize, start: usize) -> BoundaryLoop {
    let Some(first) = Dir::ALL.into_iter().find(|d| outgoing[start] & d.bit() != 0) else {
        return BoundaryLoop {
            points: Vec::new(),
            area: 0.0,
        };
    };

    let mut points = Vec::new();
    let mut vertex = start;
    let mut dir = first;
    loop {
        outgoing[vertex] &= !dir.bit();
        let (dx, dy) = dir.step();
        let corner = DVec2::new((vertex % stride) as f64, (vertex / stride) as f64);
        points.push(corner + DVec2::new(dx as f64, dy as f64) * 0.5);

        let x = (vertex % stride) as isize + dx;
        let y = (vertex / stride) as isize + dy;
        vertex = y as usize * stride + x as usize;

        let mut available = outgoing[vertex];
        if vertex == start {
            available |= first.bit();
        }
        let next = [dir.right(), dir, dir.left()]
            .into_iter()
            .find(|d| available & d.bit() != 0);
        match next {
            Some(d) if vertex == start && d == first => break,
            Some(d) => dir = d,
            None => break,
        }
    }

    let area = signed_area(&points);
    BoundaryLoop { points, area }
}
