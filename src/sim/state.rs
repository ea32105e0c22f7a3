//! Simulation state and the operations the UI layer can trigger
//!
//! Everything the frame loop mutates lives on `SimulationState`; there is no
//! ambient global state. Geometry changes go through `rebuild`, which remaps
//! ownership onto the new resolution and stretches the balls to match.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::grid::Grid;
use super::stats::Score;
use crate::clamp_finite;
use crate::consts::*;
use crate::settings::{PhysicsSettings, sanitize_chaos, sanitize_speed_mood, sanitize_tile_px, sanitize_tile_size};
use crate::tuning::SpeedEnvelope;

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Jitter and scatter draw from this source only
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub settings: PhysicsSettings,
    /// Derived from `settings.speed_mood`
    pub envelope: SpeedEnvelope,
    /// Requested frame size, before snapping to whole tiles
    pub frame: Vec2,
    pub grid: Grid,
    /// Day ball first, night ball second (until a swap)
    pub balls: [Ball; 2],
    pub ball_radius: f32,
    /// Tally as of the last tick or manual refresh
    pub score: Score,
}

impl SimulationState {
    /// Create a new simulation seeded from `seed`
    pub fn new(seed: u64, frame_width: f32, frame_height: f32, settings: PhysicsSettings) -> Self {
        Self::with_rng(seed, Pcg32::seed_from_u64(seed), frame_width, frame_height, settings)
    }

    /// Create a new simulation drawing from an already-seeded RNG
    pub fn with_rng(
        seed: u64,
        rng: Pcg32,
        frame_width: f32,
        frame_height: f32,
        settings: PhysicsSettings,
    ) -> Self {
        let settings = settings.sanitized();
        let envelope = SpeedEnvelope::from_mood(settings.speed_mood);
        let frame = Vec2::new(sanitize_frame_dim(frame_width), sanitize_frame_dim(frame_height));
        let grid = Grid::build(frame.x, frame.y, settings.tile_size, None);
        let balls = Ball::launch_pair(grid.canvas_width(), grid.canvas_height(), &envelope);
        let score = Score::compute(&grid);

        log::info!(
            "Simulation created: seed={}, grid={}x{}, tile={}px",
            seed,
            grid.width,
            grid.height,
            settings.tile_size
        );

        Self {
            seed,
            rng,
            time_ticks: 0,
            settings,
            envelope,
            frame,
            ball_radius: ball_radius_for(settings.tile_size),
            grid,
            balls,
            score,
        }
    }

    /// Canvas size in pixels (whole tiles)
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.grid.canvas_width(), self.grid.canvas_height())
    }

    /// Recompute the tally without advancing physics
    pub fn refresh_score(&mut self) -> Score {
        self.score = Score::compute(&self.grid);
        self.score
    }

    /// Resize the frame and rebuild the grid for it
    pub fn set_frame_size(&mut self, width: f32, height: f32, preserve_ownership: bool) {
        self.frame = Vec2::new(sanitize_frame_dim(width), sanitize_frame_dim(height));
        self.rebuild(preserve_ownership);
    }

    /// Change tile size, keeping the painted picture.
    ///
    /// Takes the raw pixel value from the UI; it is rounded and clamped to
    /// the supported range.
    pub fn set_tile_size(&mut self, px: f32) {
        self.resize_tiles(sanitize_tile_px(px));
    }

    fn resize_tiles(&mut self, px: u32) {
        if px == self.settings.tile_size {
            return;
        }
        self.settings.tile_size = px;
        self.ball_radius = ball_radius_for(px);
        self.rebuild(true);
    }

    pub fn set_speed_mood(&mut self, value: f32) {
        self.settings.speed_mood = sanitize_speed_mood(value);
        self.envelope = SpeedEnvelope::from_mood(self.settings.speed_mood);
    }

    pub fn set_chaos(&mut self, value: f32) {
        self.settings.chaos = sanitize_chaos(value);
    }

    /// Apply a full settings bundle (tile size changes rebuild the grid)
    pub fn apply_settings(&mut self, settings: PhysicsSettings) {
        self.set_speed_mood(settings.speed_mood);
        self.set_chaos(settings.chaos);
        self.resize_tiles(sanitize_tile_size(settings.tile_size));
    }

    /// Rebuild the grid for the current frame and tile size.
    ///
    /// With `preserve_ownership` the old map is resampled onto the new
    /// resolution; otherwise the board restarts from the split. Balls are
    /// stretched by the canvas scale either way.
    pub fn rebuild(&mut self, preserve_ownership: bool) {
        let old_canvas = self.canvas_size();
        let previous = preserve_ownership.then_some(&self.grid);
        let grid = Grid::build(self.frame.x, self.frame.y, self.settings.tile_size, previous);
        let new_canvas = Vec2::new(grid.canvas_width(), grid.canvas_height());

        log::info!(
            "Grid rebuilt: {}x{} -> {}x{} tiles, tile={}px, preserve={}",
            self.grid.width,
            self.grid.height,
            grid.width,
            grid.height,
            grid.tile_size,
            preserve_ownership
        );

        self.grid = grid;
        let scale = new_canvas / old_canvas;
        for ball in &mut self.balls {
            ball.rescale(scale);
        }
        self.refresh_score();
    }

    /// Split the board again and relaunch both balls
    pub fn reset(&mut self) {
        self.grid.reset_split();
        self.balls = Ball::launch_pair(self.grid.canvas_width(), self.grid.canvas_height(), &self.envelope);
        self.refresh_score();
        log::info!("Board reset");
    }

    /// Randomize every tile's owner
    pub fn scatter(&mut self) {
        self.grid.scatter(&mut self.rng);
        self.refresh_score();
        log::info!("Board scattered: day={} night={}", self.score.day, self.score.night);
    }

    /// Flip every tile and mirror both balls across the vertical midline
    pub fn swap_sides(&mut self) {
        self.grid.invert();
        let width = self.grid.canvas_width();
        for ball in &mut self.balls {
            ball.mirror(width);
        }
        self.refresh_score();
        log::info!("Sides swapped");
    }
}

/// Ball radius for a tile size
#[inline]
pub fn ball_radius_for(tile_size: u32) -> f32 {
    tile_size as f32 * BALL_RADIUS_FACTOR
}

fn sanitize_frame_dim(value: f32) -> f32 {
    let clamped = clamp_finite(value, MIN_FRAME_DIM, MAX_FRAME_DIM);
    if clamped != value {
        log::warn!("Frame dimension {value} out of range, using {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Owner;

    fn settings(tile_size: u32) -> PhysicsSettings {
        PhysicsSettings {
            tile_size,
            speed_mood: 1.0,
            chaos: 0.2,
        }
    }

    #[test]
    fn test_new_state_example_board() {
        let state = SimulationState::new(1, 720.0, 720.0, settings(36));
        assert_eq!((state.grid.width, state.grid.height), (20, 20));
        assert_eq!(state.canvas_size(), Vec2::new(720.0, 720.0));
        assert_eq!(state.score.day, 200);
        assert_eq!(state.score.night, 200);
        assert!((state.ball_radius - 15.84).abs() < 1e-4);
        assert_eq!(state.balls[0].owner, Owner::Day);
        assert_eq!(state.balls[1].owner, Owner::Night);
    }

    #[test]
    fn test_degenerate_frame_clamps_to_floor() {
        let state = SimulationState::new(1, -5.0, f32::NAN, settings(14));
        assert_eq!(state.frame, Vec2::splat(MIN_FRAME_DIM));
        assert_eq!((state.grid.width, state.grid.height), (30, 30));
    }

    #[test]
    fn test_resize_rescales_balls_and_keeps_ownership() {
        let mut state = SimulationState::new(5, 420.0, 420.0, settings(21));
        state.balls[0].pos = Vec2::new(100.0, 200.0);
        state.balls[0].vel = Vec2::new(2.0, -3.0);
        state.set_frame_size(840.0, 420.0, true);
        assert_eq!(state.canvas_size(), Vec2::new(840.0, 420.0));
        assert_eq!(state.balls[0].pos, Vec2::new(200.0, 200.0));
        assert_eq!(state.balls[0].vel, Vec2::new(4.0, -3.0));
        assert_eq!(state.score.day, state.score.night);
        assert_eq!(state.score.total(), 40 * 20);
    }

    #[test]
    fn test_resize_without_preserve_resplits() {
        let mut state = SimulationState::new(5, 420.0, 420.0, settings(21));
        state.grid.ownership.iter_mut().for_each(|o| *o = Owner::Night);
        state.set_frame_size(630.0, 630.0, false);
        assert_eq!(state.score.day, state.score.night);

        state.grid.ownership.iter_mut().for_each(|o| *o = Owner::Night);
        state.set_frame_size(420.0, 420.0, true);
        assert_eq!(state.score.day, 0);
    }

    #[test]
    fn test_tile_size_change_keeps_frame_request() {
        let mut state = SimulationState::new(5, 730.0, 730.0, settings(36));
        state.set_tile_size(20.0);
        assert_eq!((state.grid.width, state.grid.height), (36, 36));
        state.set_tile_size(36.0);
        assert_eq!((state.grid.width, state.grid.height), (20, 20));
        assert_eq!(state.frame, Vec2::splat(730.0));
        assert!((state.ball_radius - 36.0 * BALL_RADIUS_FACTOR).abs() < 1e-5);
    }

    #[test]
    fn test_tile_size_clamped() {
        let mut state = SimulationState::new(5, 720.0, 720.0, settings(36));
        state.set_tile_size(0.0);
        assert_eq!(state.settings.tile_size, MIN_TILE_SIZE);
        state.set_tile_size(500.0);
        assert_eq!(state.settings.tile_size, MAX_TILE_SIZE);
        state.set_tile_size(-5.0);
        assert_eq!(state.settings.tile_size, MIN_TILE_SIZE);
        state.set_tile_size(f32::NAN);
        assert_eq!(state.settings.tile_size, MIN_TILE_SIZE);
        state.set_tile_size(29.7);
        assert_eq!(state.settings.tile_size, 30);
        assert!(state.grid.width >= MIN_GRID_DIM && state.grid.height >= MIN_GRID_DIM);
    }

    #[test]
    fn test_speed_mood_updates_envelope() {
        let mut state = SimulationState::new(5, 720.0, 720.0, settings(36));
        let before = state.envelope;
        state.set_speed_mood(10.0);
        assert!(state.envelope.max_speed > before.max_speed);
        state.set_speed_mood(f32::NAN);
        assert_eq!(state.settings.speed_mood, SPEED_MOOD_MIN);
        assert!(state.envelope.min_speed > 0.0 && state.envelope.min_speed < state.envelope.max_speed);
    }

    #[test]
    fn test_swap_sides_twice_restores() {
        let mut state = SimulationState::new(9, 720.0, 720.0, settings(36));
        state.scatter();
        let owners = state.grid.ownership.clone();
        let balls = state.balls;
        state.swap_sides();
        assert_ne!(state.grid.ownership, owners);
        assert_eq!(state.balls[0].owner, Owner::Night);
        state.swap_sides();
        assert_eq!(state.grid.ownership, owners);
        assert_eq!(state.balls, balls);
    }

    #[test]
    fn test_scatter_keeps_tile_count() {
        let mut state = SimulationState::new(11, 720.0, 720.0, settings(36));
        state.scatter();
        assert_eq!(state.score.total(), 400);
    }

    #[test]
    fn test_reset_restores_split_and_balls() {
        let mut state = SimulationState::new(11, 720.0, 720.0, settings(36));
        let launch = state.balls;
        state.scatter();
        state.balls[0].pos = Vec2::new(1.0, 1.0);
        state.reset();
        assert_eq!(state.score.day, 200);
        assert_eq!(state.score.night, 200);
        assert_eq!(state.balls, launch);
    }
}
