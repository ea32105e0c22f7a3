//! Platform abstraction layer
//!
//! The simulation never talks to a display directly. A `FrameHost` delivers
//! redraw callbacks and draws whatever `FrameView` it is handed:
//! - `ManualHost`: headless host, frames are pumped by the caller
//! - `web::WebSimulation` (wasm32): `requestAnimationFrame` driven

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;

use serde::Serialize;

use crate::sim::{Ball, Owner, Score, SimulationState, Tile};

/// Host side of the frame loop
pub trait FrameHost {
    /// Schedule one call to `Simulation::on_frame` at the next redraw
    fn request_frame(&mut self);
    /// Drop the scheduled call, if any
    fn cancel_frame(&mut self);
    /// Draw the board
    fn present(&mut self, frame: &FrameView<'_>);
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView<'a> {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub tile_size: u32,
    pub ball_radius: f32,
    pub tiles: &'a [Tile],
    pub ownership: &'a [Owner],
    pub balls: &'a [Ball],
    pub score: Score,
    pub time_ticks: u64,
}

impl<'a> FrameView<'a> {
    pub fn of(state: &'a SimulationState) -> Self {
        Self {
            canvas_width: state.grid.canvas_width(),
            canvas_height: state.grid.canvas_height(),
            tile_size: state.grid.tile_size,
            ball_radius: state.ball_radius,
            tiles: &state.grid.tiles,
            ownership: &state.grid.ownership,
            balls: &state.balls,
            score: state.score,
            time_ticks: state.time_ticks,
        }
    }
}

/// Headless host: records requests and presents, the caller pumps frames
#[derive(Debug, Default)]
pub struct ManualHost {
    pending: bool,
    pub requests: u32,
    pub cancels: u32,
    pub presents: u32,
    pub last_score: Option<Score>,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame callback is waiting to be delivered
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending callback (the caller then runs `on_frame`)
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameHost for ManualHost {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }

    fn cancel_frame(&mut self) {
        self.pending = false;
        self.cancels += 1;
    }

    fn present(&mut self, frame: &FrameView<'_>) {
        self.presents += 1;
        self.last_score = Some(frame.score);
    }
}

/// Mutate a shared host-side value unless it is already borrowed.
///
/// A host callback (such as `present`) runs while the simulation is borrowed;
/// calls that re-enter from it are dropped with a warning.
pub fn try_mutate<T, R>(cell: &RefCell<T>, op: &str, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    match cell.try_borrow_mut() {
        Ok(mut value) => Some(f(&mut value)),
        Err(_) => {
            log::warn!("{op} ignored: called while the simulation is busy");
            None
        }
    }
}
