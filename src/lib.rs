//! Daynite Drift - two balls fighting over a tile grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid ownership, ball physics, scoring)
//! - `simulation`: Frame loop controller (play/pause, resize coalescing)
//! - `platform`: Host abstraction (headless host, browser frame callbacks)
//! - `settings`: Physics settings consumed by the core
//! - `tuning`: Slider curves and the derived speed envelope

pub mod platform;
pub mod settings;
pub mod sim;
pub mod simulation;
pub mod tuning;

pub use platform::{FrameHost, FrameView, ManualHost};
pub use settings::{PhysicsSettings, SliderSettings};
pub use simulation::Simulation;
pub use tuning::SpeedEnvelope;

/// Simulation configuration constants
pub mod consts {
    /// Minimum tiles per grid axis, regardless of frame or tile size
    pub const MIN_GRID_DIM: u32 = 8;

    /// Frame dimension bounds (pixels per axis)
    pub const MIN_FRAME_DIM: f32 = 420.0;
    pub const MAX_FRAME_DIM: f32 = 4096.0;
    /// Frame used before the host reports a real size
    pub const DEFAULT_FRAME_DIM: f32 = 720.0;

    /// Tile size bounds (pixels)
    pub const MIN_TILE_SIZE: u32 = 14;
    pub const MAX_TILE_SIZE: u32 = 52;
    pub const TILE_SIZE_EXPONENT: f32 = 1.7;

    /// Speed mood bounds (multiplier)
    pub const SPEED_MOOD_MIN: f32 = 0.2;
    pub const SPEED_MOOD_MAX: f32 = 20.0;
    /// Slider value where the speed curve turns exponential
    pub const SPEED_MOOD_KNEE: f32 = 2.5;
    pub const SPEED_MOOD_EXPONENT: f32 = 2.2;

    /// Chaos (per-tick velocity jitter magnitude)
    pub const CHAOS_MAX: f32 = 1.1;
    pub const CHAOS_EXPONENT: f32 = 2.4;

    /// Ball radius as a fraction of tile size
    pub const BALL_RADIUS_FACTOR: f32 = 0.44;
    /// Launch speed as a fraction of the way from min to max speed
    pub const BALL_LAUNCH_FRACTION: f32 = 0.32;
}

/// Clamp a possibly malformed input into `[min, max]`.
///
/// NaN collapses to `min`; infinities land on the nearest bound.
#[inline]
pub fn clamp_finite(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
