//! Spawn context for particle initialization.
//!
//! Wraps the field's RNG with the handful of draws a leaf needs, so
//! [`Particle::spawn`](super::Particle::spawn) reads as a description of the
//! distribution rather than a list of `gen_range` calls.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Random draws for spawning a batch of particles on one surface.
pub struct SpawnContext<'a> {
    /// Surface size in pixels.
    pub bounds: Vec2,
    rng: &'a mut SmallRng,
}

impl<'a> SpawnContext<'a> {
    pub(crate) fn new(bounds: Vec2, rng: &'a mut SmallRng) -> Self {
        Self { bounds, rng }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// `(rand - 0.5) * spread`, i.e. uniform in `[-spread/2, spread/2)`.
    #[inline]
    pub fn random_centered(&mut self, spread: f32) -> f32 {
        (self.random() - 0.5) * spread
    }

    // ========== Position helpers ==========

    /// Random point in `[0, w) x [0, h)`.
    pub fn random_in_bounds(&mut self) -> Vec2 {
        Vec2::new(
            self.random_range(0.0, self.bounds.x),
            self.random_range(0.0, self.bounds.y),
        )
    }

    /// Random vector with each component from [`random_centered`](Self::random_centered).
    pub fn random_velocity(&mut self, spread: f32) -> Vec2 {
        Vec2::new(self.random_centered(spread), self.random_centered(spread))
    }

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.random() * TAU
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_random_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut ctx = SpawnContext::new(Vec2::new(300.0, 200.0), &mut rng);
        for _ in 0..1000 {
            let p = ctx.random_in_bounds();
            assert!(p.x >= 0.0 && p.x < 300.0);
            assert!(p.y >= 0.0 && p.y < 200.0);
        }
    }

    #[test]
    fn test_random_centered_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut ctx = SpawnContext::new(Vec2::ONE, &mut rng);
        for _ in 0..1000 {
            let v = ctx.random_centered(0.4);
            assert!((-0.2..0.2).contains(&v));
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut ctx = SpawnContext::new(Vec2::ZERO, &mut rng);
        assert_eq!(ctx.random_range(5.0, 5.0), 5.0);
        assert_eq!(ctx.random_in_bounds(), Vec2::ZERO);
    }
}
