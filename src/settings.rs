//! Physics settings
//!
//! Only the values the simulation needs live here. Theme, colors, ball style
//! and other presentation preferences belong to the UI layer.

use serde::{Deserialize, Serialize};

use crate::clamp_finite;
use crate::consts::*;
use crate::tuning::{chaos_from_slider, speed_mood_from_slider, tile_size_from_slider};

/// Settings the simulation core reads every tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsSettings {
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Multiplier for the ball speed envelope
    pub speed_mood: f32,
    /// Per-tick velocity jitter magnitude
    pub chaos: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        SliderSettings::default().physics()
    }
}

impl PhysicsSettings {
    /// Copy with every field forced into its valid range
    pub fn sanitized(self) -> Self {
        Self {
            tile_size: sanitize_tile_size(self.tile_size),
            speed_mood: sanitize_speed_mood(self.speed_mood),
            chaos: sanitize_chaos(self.chaos),
        }
    }
}

/// Raw slider positions (`0..=100`) as the UI stores them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSettings {
    pub tile_size: f32,
    pub speed: f32,
    pub chaos: f32,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            tile_size: 35.0,
            speed: 22.0,
            chaos: 40.0,
        }
    }
}

impl SliderSettings {
    /// Map slider positions to physics values
    pub fn physics(&self) -> PhysicsSettings {
        PhysicsSettings {
            tile_size: tile_size_from_slider(self.tile_size),
            speed_mood: speed_mood_from_slider(self.speed),
            chaos: chaos_from_slider(self.chaos),
        }
    }
}

pub(crate) fn sanitize_tile_size(px: u32) -> u32 {
    let clamped = px.clamp(MIN_TILE_SIZE, MAX_TILE_SIZE);
    if clamped != px {
        log::warn!("Tile size {px}px out of range, using {clamped}px");
    }
    clamped
}

/// Tile size from a raw pixel value (UI input), rounded to whole pixels
pub(crate) fn sanitize_tile_px(px: f32) -> u32 {
    let clamped = clamp_finite(px, MIN_TILE_SIZE as f32, MAX_TILE_SIZE as f32).round() as u32;
    if clamped as f32 != px {
        log::warn!("Tile size {px}px out of range, using {clamped}px");
    }
    clamped
}

pub(crate) fn sanitize_speed_mood(value: f32) -> f32 {
    let clamped = clamp_finite(value, SPEED_MOOD_MIN, SPEED_MOOD_MAX);
    if clamped != value {
        log::warn!("Speed mood {value} out of range, using {clamped}");
    }
    clamped
}

pub(crate) fn sanitize_chaos(value: f32) -> f32 {
    let clamped = clamp_finite(value, 0.0, CHAOS_MAX);
    if clamped != value {
        log::warn!("Chaos {value} out of range, using {clamped}");
    }
    clamped
}
