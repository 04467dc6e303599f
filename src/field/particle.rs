//! A single drifting leaf and its response to the pointer.

use glam::Vec2;

use super::leaf::LeafShape;
use super::spawn::SpawnContext;
use crate::config::FieldConfig;

/// One leaf in the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub base_size: f32,
    /// Radians.
    pub rotation: f32,
    /// Radians per frame.
    pub rotation_speed: f32,
}

/// How a particle is drawn this frame, given the pointer distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    pub distance: f32,
    pub size: f32,
    pub alpha: f32,
    /// Alpha of the link line to the pointer, when within link range.
    pub link_alpha: Option<f32>,
}

impl Particle {
    /// Draw a fresh particle from the configured distributions.
    pub fn spawn(ctx: &mut SpawnContext<'_>, config: &FieldConfig) -> Self {
        Self {
            position: ctx.random_in_bounds(),
            velocity: ctx.random_velocity(config.velocity_spread),
            base_size: ctx.random() * config.size_spread + config.min_size,
            rotation: ctx.random_angle(),
            rotation_speed: ctx.random_centered(config.rotation_spread),
        }
    }

    /// Move by one frame's worth of velocity and spin.
    #[inline]
    pub fn advance(&mut self) {
        self.position += self.velocity;
        self.rotation += self.rotation_speed;
    }

    /// Turn the particle back toward the surface if it has left it.
    ///
    /// A component is flipped only while the particle is outside *and* still
    /// heading away, so one boundary contact produces exactly one flip.
    /// Returns whether anything was flipped.
    pub fn reflect(&mut self, bounds: Vec2) -> bool {
        let mut flipped = false;
        if (self.position.x < 0.0 && self.velocity.x < 0.0)
            || (self.position.x > bounds.x && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
            flipped = true;
        }
        if (self.position.y < 0.0 && self.velocity.y < 0.0)
            || (self.position.y > bounds.y && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
            flipped = true;
        }
        flipped
    }

    /// Size, alpha and link for the current pointer position.
    pub fn respond_to(&self, pointer: Vec2, config: &FieldConfig) -> Proximity {
        proximity_response(self.base_size, self.position.distance(pointer), config)
    }

    /// The leaf to draw at the given size.
    pub fn leaf(&self, size: f32, config: &FieldConfig) -> LeafShape {
        LeafShape::new(self.position, self.rotation, size).with_vein(size > config.vein_threshold)
    }
}

/// Pointer response for a leaf of `base_size` at `distance` from the pointer.
pub fn proximity_response(base_size: f32, distance: f32, config: &FieldConfig) -> Proximity {
    let (size, alpha) = if distance < config.max_distance {
        let scale = 1.0 - distance / config.max_distance;
        (
            base_size + config.size_gain * scale,
            config.near_alpha + config.alpha_gain * scale,
        )
    } else {
        (base_size, config.ambient_alpha)
    };

    let link_alpha = (distance < config.link_distance)
        .then(|| config.link_alpha * (1.0 - distance / config.link_distance));

    Proximity {
        distance,
        size,
        alpha,
        link_alpha,
    }
}
