//! Deterministic simulation module
//!
//! All board logic lives here. This module must be pure and deterministic:
//! - One tick per host frame, unit timestep
//! - Seeded RNG only
//! - Stable iteration order (balls in order, tiles row-major)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod grid;
pub mod state;
pub mod stats;
pub mod tick;

pub use ball::{Ball, DEFAULT_DIRECTION};
pub use collision::{claim_tiles, reflect_from_tile, tile_overlap};
pub use grid::{Grid, Owner, Tile, remap_ownership, split_ownership};
pub use state::{SimulationState, ball_radius_for};
pub use stats::Score;
pub use tick::tick;
