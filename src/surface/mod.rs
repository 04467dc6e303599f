//! Drawable surfaces for the particle field.
//!
//! The field only needs three operations from whatever it draws on: clear,
//! fill a leaf, stroke a line. [`Surface`] captures that, and three
//! implementations ship with the crate:
//!
//! - [`DisplayList`] - records commands, for tests and for inspecting a frame
//! - [`RasterSurface`] - rasterizes into an RGBA image that can be saved as PNG
//! - `PainterSurface` - draws through an `egui::Painter` (feature `egui`)

pub mod raster;
#[cfg(feature = "egui")]
pub mod egui_painter;

use glam::Vec2;

use crate::field::LeafShape;

pub use raster::RasterSurface;
#[cfg(feature = "egui")]
pub use egui_painter::PainterSurface;

/// An sRGB color with straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Alpha scaled to a byte.
    #[inline]
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// A 2D target the particle field can draw on.
pub trait Surface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill a leaf silhouette (and its vein, when present).
    fn fill_leaf(&mut self, leaf: &LeafShape, color: Rgba);

    /// Stroke a straight line.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Leaf {
        shape: LeafShape,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
}

/// A surface that records what was drawn on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Leaves in draw order.
    pub fn leaves(&self) -> impl Iterator<Item = (&LeafShape, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Leaf { shape, color } => Some((shape, *color)),
            _ => None,
        })
    }

    /// Lines in draw order as `(from, to, color)`.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, color, .. } => Some((*from, *to, *color)),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_leaf(&mut self, leaf: &LeafShape, color: Rgba) {
        self.commands.push(DrawCommand::Leaf {
            shape: *leaf,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_discards_previous_commands() {
        let mut list = DisplayList::new();
        list.fill_leaf(&LeafShape::new(Vec2::ZERO, 0.0, 5.0), Rgba::rgb(1, 2, 3));
        list.clear();
        assert_eq!(list.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Rgba::rgb(0, 0, 0).with_alpha(1.7).a, 1.0);
        assert_eq!(Rgba::rgb(0, 0, 0).with_alpha(-0.2).alpha_u8(), 0);
        assert_eq!(Rgba::rgb(0, 0, 0).with_alpha(0.5).alpha_u8(), 128);
    }
}
