//! # Trace Palette
//!
//! Fixed color palettes and nearest-color quantization.

use crate::error::{TraceError, TraceResult};
use crate::raster::{RasterImage, Rgba};
use config::constants::{BACKGROUND_COLOR, INK_COLOR};

/// Ordered list of pairwise distinct quantization colors.
///
/// Palette order is layer order: the tracer emits one layer per color, in
/// this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracePalette {
    colors: Vec<Rgba>,
}

impl TracePalette {
    /// Creates a palette, rejecting empty, oversized or duplicated color
    /// lists.
    ///
    /// # Example
    ///
    /// ```rust
    /// use draw_trace::{Rgba, TracePalette};
    ///
    /// let palette = TracePalette::new(vec![Rgba::new(0, 0, 0, 255), Rgba::new(255, 0, 0, 255)]).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// assert!(TracePalette::new(vec![Rgba::new(1, 1, 1, 1); 2]).is_err());
    /// ```
    pub fn new(colors: Vec<Rgba>) -> TraceResult<Self> {
        if colors.is_empty() {
            return Err(TraceError::topology("palette must contain at least one color"));
        }
        if colors.len() > usize::from(u8::MAX) + 1 {
            return Err(TraceError::topology(format!(
                "palette holds {} colors, at most 256 are supported",
                colors.len()
            )));
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(TraceError::topology(format!(
                    "palette color {i} duplicates an earlier entry: {color:?}"
                )));
            }
        }
        Ok(Self { colors })
    }

    /// Returns the palette colors in layer order.
    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the palette color nearest to `color`. Ties resolve to the
    /// lower index.
    pub fn nearest(&self, color: Rgba) -> usize {
        let mut best = 0;
        let mut best_distance = u32::MAX;
        for (i, candidate) in self.colors.iter().enumerate() {
            let d = candidate.distance(color);
            if d < best_distance {
                best = i;
                best_distance = d;
            }
        }
        best
    }

    /// Maps every pixel of `image` to its nearest palette index.
    pub fn quantize(&self, image: &RasterImage) -> QuantizedImage {
        let indices = image.pixels().map(|p| self.nearest(p) as u8).collect();
        QuantizedImage {
            width: image.width() as usize,
            height: image.height() as usize,
            indices,
        }
    }
}

impl Default for TracePalette {
    /// Transparent black ink on opaque white paper.
    fn default() -> Self {
        Self {
            colors: vec![Rgba::from_array(INK_COLOR), Rgba::from_array(BACKGROUND_COLOR)],
        }
    }
}

/// A raster whose pixels are palette indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    width: usize,
    height: usize,
    indices: Vec<u8>,
}

impl QuantizedImage {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette index at `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        usize::from(self.indices[y * self.width + x])
    }

    /// True when `(x, y)` lies inside the image and is quantized to
    /// `layer`. Coordinates outside the image are never inside a layer.
    #[inline]
    pub fn is_layer(&self, x: isize, y: isize, layer: usize) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && self.index(x as usize, y as usize) == layer
    }
}
