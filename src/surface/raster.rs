//! CPU rasterizer backed by an RGBA image.
//!
//! Leaves are flattened to polygons and scan-filled (even-odd, sampled at
//! pixel centers). Lines are stepped one pixel at a time; widths below one
//! pixel are approximated by scaling coverage. Every write is a source-over
//! blend onto an opaque background.

use std::path::Path;

use glam::Vec2;
use image::{Rgba as Pixel, RgbaImage};

use super::{Rgba, Surface};
use crate::error::RenderError;
use crate::field::LeafShape;

/// Default page background (a very light gray).
const DEFAULT_BACKGROUND: [u8; 3] = [249, 250, 251];

/// Flattening segments per quadratic curve.
const DEFAULT_CURVE_SEGMENTS: usize = 12;

/// A surface that draws into an [`RgbaImage`].
pub struct RasterSurface {
    image: RgbaImage,
    background: [u8; 3],
    curve_segments: usize,
}

impl RasterSurface {
    /// Create a surface of the given pixel size, cleared to the background.
    pub fn new(width: u32, height: u32) -> Self {
        let [r, g, b] = DEFAULT_BACKGROUND;
        Self {
            image: RgbaImage::from_pixel(width, height, Pixel([r, g, b, 255])),
            background: DEFAULT_BACKGROUND,
            curve_segments: DEFAULT_CURVE_SEGMENTS,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self.clear();
        self
    }

    pub fn with_curve_segments(mut self, segments: usize) -> Self {
        self.curve_segments = segments.max(1);
        self
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Write the current contents as an image file (format from the extension).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.image.save(path)?;
        Ok(())
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba, coverage: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let a = (color.a * coverage).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        let src = [color.r, color.g, color.b];
        for channel in 0..3 {
            let dst = pixel.0[channel] as f32;
            pixel.0[channel] = (src[channel] as f32 * a + dst * (1.0 - a)).round() as u8;
        }
        pixel.0[3] = 255;
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let first_row = (min_y - 0.5).ceil().max(0.0) as i64;
        let last_row = (max_y - 0.5).floor().min(self.image.height() as f32 - 1.0) as i64;

        let mut crossings = Vec::with_capacity(8);
        for row in first_row..=last_row {
            let sample_y = row as f32 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                // Half-open rule so shared vertices count once
                if (a.y <= sample_y) != (b.y <= sample_y) {
                    let t = (sample_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil() as i64;
                let end = (span[1] - 0.5).floor() as i64;
                for x in start.max(0)..=end {
                    self.blend(x, row, color, 1.0);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self) {
        let [r, g, b] = self.background;
        for pixel in self.image.pixels_mut() {
            *pixel = Pixel([r, g, b, 255]);
        }
    }

    fn fill_leaf(&mut self, leaf: &LeafShape, color: Rgba) {
        // Control points bound both curves, so this never drops a visible leaf
        let (min, max) = leaf.bounds();
        if max.x < 0.0 || max.y < 0.0 || min.x >= self.width() as f32 || min.y >= self.height() as f32 {
            return;
        }
        let outline = leaf.outline(self.curve_segments);
        self.fill_polygon(&outline, color);
        if let Some((from, to)) = leaf.vein_line() {
            self.stroke_line(from, to, 0.5, color);
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
        let coverage = width.clamp(0.0, 1.0);
        for i in 0..=steps {
            let p = from + delta * (i as f32 / steps as f32);
            self.blend(p.x.floor() as i64, p.y.floor() as i64, color, coverage);
        }
    }
}
