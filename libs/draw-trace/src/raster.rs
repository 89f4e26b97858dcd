//! # Raster Image
//!
//! Immutable RGBA8 pixel buffers as captured from a drawing surface.

use crate::error::{TraceError, TraceResult};
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Creates a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from a `[r, g, b, a]` array.
    pub const fn from_array(channels: [u8; 4]) -> Self {
        Self::new(channels[0], channels[1], channels[2], channels[3])
    }

    /// Sum of absolute channel differences, alpha included.
    #[inline]
    pub fn distance(self, other: Rgba) -> u32 {
        u32::from(self.r.abs_diff(other.r))
            + u32::from(self.g.abs_diff(other.g))
            + u32::from(self.b.abs_diff(other.b))
            + u32::from(self.a.abs_diff(other.a))
    }
}

/// A row-major RGBA8 raster with a top-left origin.
///
/// # Example
///
/// ```rust
/// use draw_trace::RasterImage;
///
/// let image = RasterImage::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
/// assert_eq!(image.pixel(1, 0).r, 255);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wraps a pixel buffer, checking it holds exactly `width * height`
    /// RGBA pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> TraceResult<Self> {
        if width == 0 || height == 0 {
            return Err(TraceError::invalid_dimensions(format!(
                "raster must not be empty: {width}x{height}"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| TraceError::invalid_dimensions("raster size overflows"))?;
        if pixels.len() != expected {
            return Err(TraceError::invalid_dimensions(format!(
                "pixel buffer holds {} bytes, {width}x{height} RGBA needs {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a raster filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgba) -> TraceResult<Self> {
        let count = (width as usize) * (height as usize);
        let pixels = [color.r, color.g, color.b, color.a].repeat(count);
        Self::new(width, height, pixels)
    }

    /// Builds a raster by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Rgba) -> TraceResult<Self> {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            for x in 0..width {
                let c = f(x, y);
                pixels.extend_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        Self::new(width, height, pixels)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Rgba::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        )
    }

    /// Iterates over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.pixels
            .chunks_exact(4)
            .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
    }
}
