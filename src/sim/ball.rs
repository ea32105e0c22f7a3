//! Ball kinematics
//!
//! One explicit Euler step per frame: velocities are in pixels per tick.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Owner;
use crate::tuning::SpeedEnvelope;

/// Direction used when a velocity collapses to zero
pub const DEFAULT_DIRECTION: Vec2 = Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2);

/// Below this speed the direction is considered lost
const DEGENERATE_SPEED: f32 = 1e-6;

/// A ball painting tiles for its owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub owner: Owner,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(owner: Owner, pos: Vec2, vel: Vec2) -> Self {
        Self { owner, pos, vel }
    }

    /// Fresh day/night pair, each on its own side of the canvas
    pub fn launch_pair(canvas_width: f32, canvas_height: f32, envelope: &SpeedEnvelope) -> [Ball; 2] {
        let base = envelope.launch_speed();
        let mid_y = canvas_height * 0.5;
        [
            Ball::new(Owner::Day, Vec2::new(canvas_width * 0.25, mid_y), Vec2::new(base, -base)),
            Ball::new(Owner::Night, Vec2::new(canvas_width * 0.75, mid_y), Vec2::new(-base, base)),
        ]
    }

    /// Add uniform noise in `[-chaos/2, chaos/2)` to each velocity axis
    pub fn apply_jitter<R: Rng>(&mut self, chaos: f32, rng: &mut R) {
        self.vel.x += (rng.random::<f32>() - 0.5) * chaos;
        self.vel.y += (rng.random::<f32>() - 0.5) * chaos;
    }

    /// Rescale velocity so its magnitude lies within the envelope
    pub fn clamp_speed(&mut self, envelope: &SpeedEnvelope) {
        let speed = self.vel.length();
        if !speed.is_finite() || speed < DEGENERATE_SPEED {
            log::debug!("Ball velocity degenerate ({:?}), relaunching", self.vel);
            self.vel = DEFAULT_DIRECTION * envelope.min_speed;
            return;
        }
        if speed > envelope.max_speed {
            self.vel *= envelope.max_speed / speed;
        }
        if speed < envelope.min_speed {
            self.vel *= envelope.min_speed / speed;
        }
    }

    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Bounce off the canvas edges, keeping the whole ball inside
    pub fn reflect_off_bounds(&mut self, radius: f32, canvas_width: f32, canvas_height: f32) {
        if self.pos.x < radius || self.pos.x > canvas_width - radius {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(radius, (canvas_width - radius).max(radius));
        }
        if self.pos.y < radius || self.pos.y > canvas_height - radius {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(radius, (canvas_height - radius).max(radius));
        }
    }

    /// Stretch position and velocity after the canvas changed size
    pub fn rescale(&mut self, scale: Vec2) {
        self.pos *= scale;
        self.vel *= scale;
    }

    /// Mirror across the vertical midline and switch sides
    pub fn mirror(&mut self, canvas_width: f32) {
        self.pos.x = canvas_width - self.pos.x;
        self.vel.x = -self.vel.x;
        self.owner = self.owner.opposite();
    }
}
