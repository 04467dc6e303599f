//! The leaf particle field.
//!
//! [`ParticleField`] owns the particles, the surface bounds and a handle to the
//! shared pointer. Each [`step`](ParticleField::step) clears the surface and
//! then, particle by particle, advances it, reflects it off the edges, works
//! out its pointer response and draws the leaf (plus a link line when the
//! pointer is close).
//!
//! ```ignore
//! use gauhatt::field::ParticleField;
//! use gauhatt::surface::DisplayList;
//!
//! let mut field = ParticleField::new(Default::default()).with_seed(42);
//! field.resize(1280, 720);
//! field.pointer().set(glam::Vec2::new(640.0, 360.0));
//!
//! let frame: DisplayList = field.frames().next().unwrap();
//! ```

pub mod background;
pub mod leaf;
pub mod particle;
pub mod spawn;

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::input::PointerHandle;
use crate::surface::{DisplayList, Surface};

pub use background::ParticleBackground;
pub use leaf::{LeafShape, QuadCurve};
pub use particle::{proximity_response, Particle, Proximity};
pub use spawn::SpawnContext;

/// Number of particles for a `width` x `height` surface.
pub fn particle_count_for(width: u32, height: u32, area_per_particle: f32) -> usize {
    if area_per_particle <= 0.0 {
        return 0;
    }
    (width as f64 * height as f64 / area_per_particle as f64).floor() as usize
}

/// A field of drifting leaves on a `width` x `height` surface.
pub struct ParticleField {
    config: FieldConfig,
    bounds: Vec2,
    particles: Vec<Particle>,
    pointer: PointerHandle,
    rng: SmallRng,
    frame: u64,
}

impl ParticleField {
    /// Create an unsized field. Nothing is drawn until [`resize`](Self::resize)
    /// gives it a non-empty surface.
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            bounds: Vec2::ZERO,
            particles: Vec::new(),
            pointer: PointerHandle::new(),
            rng: SmallRng::from_entropy(),
            frame: 0,
        }
    }

    /// Use a deterministic RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Read the pointer from an existing handle instead of a private one.
    pub fn with_pointer(mut self, pointer: PointerHandle) -> Self {
        self.pointer = pointer;
        self
    }

    /// Handle for writing pointer positions; clones share state with the field.
    pub fn pointer(&self) -> PointerHandle {
        self.pointer.clone()
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Frames stepped so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether the surface has a non-zero size.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.bounds.x > 0.0 && self.bounds.y > 0.0
    }

    /// Adopt a new surface size and regenerate every particle.
    ///
    /// A zero dimension leaves the field empty until the next resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.bounds = Vec2::new(width as f32, height as f32);
        self.particles.clear();
        if !self.is_ready() {
            log::debug!("particle field deferred: surface is {}x{}", width, height);
            return;
        }

        let count = particle_count_for(width, height, self.config.area_per_particle);
        self.particles.reserve(count);
        let mut ctx = SpawnContext::new(self.bounds, &mut self.rng);
        for _ in 0..count {
            self.particles.push(Particle::spawn(&mut ctx, &self.config));
        }
        log::debug!("particle field resized to {}x{}: {} leaves", width, height, count);
    }

    /// Advance every particle by one frame and draw the result.
    ///
    /// Does nothing at all (not even a clear) on an unsized surface.
    pub fn step(&mut self, surface: &mut dyn Surface) {
        if !self.is_ready() {
            return;
        }
        self.frame += 1;

        let pointer = self.pointer.get();
        let leaf_color = self.config.color();
        surface.clear();

        for particle in &mut self.particles {
            particle.advance();
            particle.reflect(self.bounds);

            let response = particle.respond_to(pointer, &self.config);
            surface.fill_leaf(
                &particle.leaf(response.size, &self.config),
                leaf_color.with_alpha(response.alpha),
            );

            if let Some(alpha) = response.link_alpha {
                surface.stroke_line(
                    particle.position,
                    pointer,
                    self.config.link_width,
                    leaf_color.with_alpha(alpha),
                );
            }
        }
    }

    /// The endless frame sequence, one recorded frame per `next()`.
    ///
    /// The iterator borrows the field, so frames continue from wherever the
    /// field currently is; it never returns `None`.
    pub fn frames(&mut self) -> Frames<'_> {
        Frames { field: self }
    }
}

/// Iterator returned by [`ParticleField::frames`].
pub struct Frames<'a> {
    field: &'a mut ParticleField,
}

impl Iterator for Frames<'_> {
    type Item = DisplayList;

    fn next(&mut self) -> Option<DisplayList> {
        let mut list = DisplayList::new();
        self.field.step(&mut list);
        Some(list)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawCommand;

    fn field(width: u32, height: u32) -> ParticleField {
        let mut field = ParticleField::new(FieldConfig::default()).with_seed(1);
        field.resize(width, height);
        field
    }

    #[test]
    fn test_particle_count() {
        assert_eq!(particle_count_for(1000, 1000, 25_000.0), 40);
        assert_eq!(particle_count_for(1280, 720, 25_000.0), 36);
        assert_eq!(particle_count_for(100, 100, 25_000.0), 0);
        assert_eq!(particle_count_for(100, 100, 0.0), 0);
    }

    #[test]
    fn test_resize_regenerates() {
        let mut f = field(1000, 1000);
        assert_eq!(f.particles().len(), 40);
        let before = f.particles().to_vec();

        f.resize(500, 500);
        assert_eq!(f.particles().len(), 10);
        assert_ne!(f.particles()[0], before[0]);
        for p in f.particles() {
            assert!(p.position.x < 500.0 && p.position.y < 500.0);
        }
    }

    #[test]
    fn test_zero_size_defers() {
        let mut f = field(0, 600);
        assert!(!f.is_ready());
        assert!(f.particles().is_empty());
        assert!(f.frames().next().unwrap().is_empty());
        assert_eq!(f.frame(), 0);

        f.resize(800, 600);
        assert!(f.is_ready());
        assert_eq!(f.particles().len(), 19);
    }

    #[test]
    fn test_step_draws_one_leaf_per_particle() {
        let mut f = field(1000, 1000);
        let frame = f.frames().next().unwrap();
        assert_eq!(frame.commands()[0], DrawCommand::Clear);
        assert_eq!(frame.leaves().count(), 40);
        // Sentinel pointer is far off-screen: no links, ambient alpha
        assert_eq!(frame.lines().count(), 0);
        assert!(frame.leaves().all(|(_, c)| c.a == 0.25));
    }

    #[test]
    fn test_pointer_links_nearby_leaves() {
        let mut f = field(1000, 1000);
        let target = f.particles()[0].position + f.particles()[0].velocity;
        f.pointer().set(target);

        let frame = f.frames().next().unwrap();
        let links: Vec<_> = frame.lines().collect();
        assert!(!links.is_empty());
        for (_, to, color) in links {
            assert_eq!(to, target);
            assert!(color.a > 0.0 && color.a <= 0.2);
        }
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = field(640, 480);
        let mut b = field(640, 480);
        let fa: Vec<_> = a.frames().take(3).collect();
        let fb: Vec<_> = b.frames().take(3).collect();
        assert_eq!(fa, fb);
    }
}
