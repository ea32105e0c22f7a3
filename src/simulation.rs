//! Frame loop controller
//!
//! `Simulation` owns the state and a `FrameHost`. While playing it ticks once
//! per host frame and asks for the next one; pausing cancels the scheduled
//! frame. Board changes made while paused are presented once right away,
//! since no tick will come along to draw them.
//!
//! Resize requests are coalesced: only the latest pending size is kept and it
//! is applied at the start of the next frame.

use glam::Vec2;

use crate::platform::{FrameHost, FrameView};
use crate::settings::{PhysicsSettings, SliderSettings};
use crate::sim::{Score, SimulationState, tick};

pub struct Simulation<H: FrameHost> {
    state: SimulationState,
    host: H,
    playing: bool,
    /// A host frame is scheduled and not yet delivered
    frame_scheduled: bool,
    pending_size: Option<Vec2>,
}

impl<H: FrameHost> Simulation<H> {
    /// Wrap a state; the loop starts paused
    pub fn new(state: SimulationState, host: H) -> Self {
        Self {
            state,
            host,
            playing: false,
            frame_scheduled: false,
            pending_size: None,
        }
    }

    /// Convenience constructor with a fresh seeded state
    pub fn with_seed(seed: u64, frame_width: f32, frame_height: f32, settings: PhysicsSettings, host: H) -> Self {
        Self::new(SimulationState::new(seed, frame_width, frame_height, settings), host)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn score(&self) -> Score {
        self.state.score
    }

    /// Current board for rendering
    pub fn frame(&self) -> FrameView<'_> {
        FrameView::of(&self.state)
    }

    pub fn start(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        log::info!("Playing");
        self.schedule();
    }

    pub fn stop(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        // A pending resize still needs its frame
        if self.frame_scheduled && self.pending_size.is_none() {
            self.host.cancel_frame();
            self.frame_scheduled = false;
        }
        log::info!("Paused");
    }

    /// Flip play/pause; returns whether the loop is now playing
    pub fn toggle_play_pause(&mut self) -> bool {
        if self.playing {
            self.stop();
        } else {
            self.start();
        }
        self.playing
    }

    /// Host redraw callback
    pub fn on_frame(&mut self) {
        self.frame_scheduled = false;
        let resized = self.flush_resize();
        if !self.playing {
            if resized {
                self.render();
            }
            return;
        }
        self.step();
        self.schedule();
    }

    /// Advance one tick and present it, regardless of play state
    pub fn step(&mut self) -> Score {
        let score = tick(&mut self.state);
        self.host.present(&FrameView::of(&self.state));
        score
    }

    /// Resize immediately, dropping any queued drag resize
    pub fn set_frame_size(&mut self, width: f32, height: f32, preserve_ownership: bool) {
        if self.pending_size.take().is_some() {
            log::debug!("Resize to {width}x{height} replaces a queued one");
        }
        self.state.set_frame_size(width, height, preserve_ownership);
        self.render_if_paused();
    }

    /// Queue a resize for the next frame, replacing any earlier request
    pub fn request_frame_size(&mut self, width: f32, height: f32) {
        if self.pending_size.replace(Vec2::new(width, height)).is_some() {
            log::debug!("Resize to {width}x{height} supersedes a pending one");
        }
        self.schedule();
    }

    /// Apply the pending resize, if any. Returns whether one was applied.
    pub fn flush_resize(&mut self) -> bool {
        match self.pending_size.take() {
            Some(size) => {
                log::debug!("Applying coalesced resize {}x{}", size.x, size.y);
                self.state.set_frame_size(size.x, size.y, true);
                true
            }
            None => false,
        }
    }

    pub fn set_tile_size(&mut self, px: f32) {
        self.state.set_tile_size(px);
        self.render_if_paused();
    }

    pub fn set_speed_mood(&mut self, value: f32) {
        self.state.set_speed_mood(value);
    }

    pub fn set_chaos(&mut self, value: f32) {
        self.state.set_chaos(value);
    }

    /// Apply raw slider positions through the tuning curves
    pub fn apply_sliders(&mut self, sliders: &SliderSettings) {
        self.state.apply_settings(sliders.physics());
        self.render_if_paused();
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.render_if_paused();
    }

    pub fn scatter(&mut self) {
        self.state.scatter();
        self.render_if_paused();
    }

    pub fn swap_sides(&mut self) {
        self.state.swap_sides();
        self.render_if_paused();
    }

    fn schedule(&mut self) {
        if !self.frame_scheduled {
            self.host.request_frame();
            self.frame_scheduled = true;
        }
    }

    fn render(&mut self) {
        self.state.refresh_score();
        self.host.present(&FrameView::of(&self.state));
    }

    fn render_if_paused(&mut self) {
        if !self.playing {
            self.render();
        }
    }
}
