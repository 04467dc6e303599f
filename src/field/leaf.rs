//! Leaf silhouette geometry.
//!
//! A leaf is two quadratic curves mirrored about the local Y axis:
//!
//! ```text
//! M (0, -s)
//! Q (s, 0)  -> (0, s)
//! Q (-s, 0) -> (0, -s)
//! ```
//!
//! plus an optional straight vein from `(0, -0.6s)` to `(0, 0.6s)`. The local
//! frame is rotated by the particle's rotation and translated to its position.
//! Affine transforms preserve Bézier curves, so the control points can be
//! transformed directly.

use glam::Vec2;

/// Fraction of the leaf half-length covered by the vein.
const VEIN_EXTENT: f32 = 0.6;

/// A quadratic Bézier segment in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadCurve {
    pub from: Vec2,
    pub ctrl: Vec2,
    pub to: Vec2,
}

impl QuadCurve {
    /// Point on the curve at parameter `t` in `[0, 1]`.
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.from * (u * u) + self.ctrl * (2.0 * u * t) + self.to * (t * t)
    }
}

/// One rendered leaf: where it is, how it is turned and how large it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafShape {
    pub center: Vec2,
    pub rotation: f32,
    pub size: f32,
    pub vein: bool,
}

impl LeafShape {
    pub fn new(center: Vec2, rotation: f32, size: f32) -> Self {
        Self {
            center,
            rotation,
            size,
            vein: false,
        }
    }

    pub fn with_vein(mut self, vein: bool) -> Self {
        self.vein = vein;
        self
    }

    /// Map a point from the leaf's local frame to surface coordinates.
    #[inline]
    pub fn to_surface(&self, local: Vec2) -> Vec2 {
        self.center + Vec2::from_angle(self.rotation).rotate(local)
    }

    /// The two outline curves, tip to tail then tail to tip.
    pub fn curves(&self) -> [QuadCurve; 2] {
        let s = self.size;
        let tip = self.to_surface(Vec2::new(0.0, -s));
        let tail = self.to_surface(Vec2::new(0.0, s));
        [
            QuadCurve {
                from: tip,
                ctrl: self.to_surface(Vec2::new(s, 0.0)),
                to: tail,
            },
            QuadCurve {
                from: tail,
                ctrl: self.to_surface(Vec2::new(-s, 0.0)),
                to: tip,
            },
        ]
    }

    /// Closed outline flattened into a polygon.
    ///
    /// Returns `2 * segments` points; the closing point is implied.
    pub fn outline(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        let mut points = Vec::with_capacity(segments * 2);
        for curve in self.curves() {
            for i in 0..segments {
                points.push(curve.point_at(i as f32 / segments as f32));
            }
        }
        points
    }

    /// Vein endpoints, if this leaf has one.
    pub fn vein_line(&self) -> Option<(Vec2, Vec2)> {
        if !self.vein {
            return None;
        }
        let half = self.size * VEIN_EXTENT;
        Some((
            self.to_surface(Vec2::new(0.0, -half)),
            self.to_surface(Vec2::new(0.0, half)),
        ))
    }

    /// Axis-aligned bounds `(min, max)` of the outline's control hull.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let [a, b] = self.curves();
        let points = [a.from, a.ctrl, a.to, b.ctrl];
        let min = points.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
        let max = points.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_unrotated_curves() {
        let leaf = LeafShape::new(Vec2::new(100.0, 50.0), 0.0, 8.0);
        let [right, left] = leaf.curves();

        assert!(close(right.from, Vec2::new(100.0, 42.0)));
        assert!(close(right.ctrl, Vec2::new(108.0, 50.0)));
        assert!(close(right.to, Vec2::new(100.0, 58.0)));
        assert!(close(left.ctrl, Vec2::new(92.0, 50.0)));
        assert!(close(left.to, right.from));
    }

    #[test]
    fn test_curve_midpoint_is_half_width() {
        let leaf = LeafShape::new(Vec2::ZERO, 0.0, 10.0);
        let [right, left] = leaf.curves();
        assert!(close(right.point_at(0.5), Vec2::new(5.0, 0.0)));
        assert!(close(left.point_at(0.5), Vec2::new(-5.0, 0.0)));
    }

    #[test]
    fn test_rotation_turns_tip() {
        let leaf = LeafShape::new(Vec2::ZERO, FRAC_PI_2, 6.0);
        let [right, _] = leaf.curves();
        // (0, -6) rotated a quarter turn lands on (6, 0)
        assert!(close(right.from, Vec2::new(6.0, 0.0)));
    }

    #[test]
    fn test_outline_is_symmetric() {
        let leaf = LeafShape::new(Vec2::ZERO, 0.0, 12.0);
        let outline = leaf.outline(8);
        assert_eq!(outline.len(), 16);
        for i in 0..8 {
            let p = outline[i];
            let mirrored = outline[8 + i];
            assert!(close(Vec2::new(-p.x, -p.y), mirrored));
        }
    }

    #[test]
    fn test_vein_only_when_flagged() {
        let leaf = LeafShape::new(Vec2::ZERO, 0.0, 11.0);
        assert!(leaf.vein_line().is_none());

        let (a, b) = leaf.with_vein(true).vein_line().unwrap();
        assert!(close(a, Vec2::new(0.0, -6.6)));
        assert!(close(b, Vec2::new(0.0, 6.6)));
    }

    #[test]
    fn test_bounds_contain_outline() {
        let leaf = LeafShape::new(Vec2::new(30.0, 40.0), 0.7, 9.0);
        let (min, max) = leaf.bounds();
        for p in leaf.outline(16) {
            assert!(p.x >= min.x - 1e-3 && p.x <= max.x + 1e-3);
            assert!(p.y >= min.y - 1e-3 && p.y <= max.y + 1e-3);
        }
    }
}
