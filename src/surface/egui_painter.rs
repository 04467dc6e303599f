//! Drawing the particle field through an [`egui::Painter`].

use egui::{Color32, Pos2, Shape, Stroke};
use glam::Vec2;

use super::{Rgba, Surface};
use crate::field::LeafShape;

/// Flattening segments per outline curve; leaves are small on screen.
const CURVE_SEGMENTS: usize = 8;

/// Width of the vein stroke in points.
const VEIN_WIDTH: f32 = 0.5;

impl From<Rgba> for Color32 {
    fn from(color: Rgba) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.alpha_u8())
    }
}

/// A surface over an egui painter, with field coordinates offset by the
/// painter's clip rect origin.
///
/// egui repaints every frame from scratch, so [`clear`](Surface::clear) is a no-op.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    offset: Vec2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter) -> Self {
        let origin = painter.clip_rect().min;
        Self {
            painter,
            offset: Vec2::new(origin.x, origin.y),
        }
    }

    #[inline]
    fn pos(&self, p: Vec2) -> Pos2 {
        let p = p + self.offset;
        Pos2::new(p.x, p.y)
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {}

    fn fill_leaf(&mut self, leaf: &LeafShape, color: Rgba) {
        let points = leaf
            .outline(CURVE_SEGMENTS)
            .into_iter()
            .map(|p| self.pos(p))
            .collect();
        self.painter
            .add(Shape::convex_polygon(points, Color32::from(color), Stroke::NONE));

        if let Some((from, to)) = leaf.vein_line() {
            self.painter
                .line_segment([self.pos(from), self.pos(to)], Stroke::new(VEIN_WIDTH, color));
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.painter
            .line_segment([self.pos(from), self.pos(to)], Stroke::new(width, color));
    }
}
