//! Browser host: `requestAnimationFrame` scheduling and a JS-facing handle
//!
//! The page owns all chrome (theme, pickers, drag handles). It creates a
//! `WebSimulation`, forwards control events to it, and draws each frame from
//! the JSON passed to its `on_present` callback. Calls made from inside that
//! callback find the simulation busy; they are dropped with a warning.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameHost, FrameView, try_mutate};
use crate::settings::{PhysicsSettings, SliderSettings};
use crate::simulation::Simulation;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Frame host backed by the window's animation frame queue
pub struct RafHost {
    window: web_sys::Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
    handle: Option<i32>,
    on_present: Option<js_sys::Function>,
}

impl FrameHost for RafHost {
    fn request_frame(&mut self) {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.handle = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    fn present(&mut self, frame: &FrameView<'_>) {
        let Some(on_present) = &self.on_present else {
            return;
        };
        match serde_json::to_string(frame) {
            Ok(json) => {
                if let Err(e) = on_present.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("on_present callback threw: {:?}", e);
                }
            }
            Err(e) => log::warn!("Failed to encode frame: {}", e),
        }
    }
}

/// JS handle for one running simulation
#[wasm_bindgen]
pub struct WebSimulation {
    inner: Rc<RefCell<Simulation<RafHost>>>,
}

#[wasm_bindgen]
impl WebSimulation {
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f32,
        height: f32,
        on_present: Option<js_sys::Function>,
    ) -> Result<WebSimulation, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let seed = js_sys::Date::now() as u64;
        let slot = Rc::new(RefCell::new(None));
        let host = RafHost {
            window,
            callback: slot.clone(),
            handle: None,
            on_present,
        };
        let inner = Rc::new(RefCell::new(Simulation::with_seed(
            seed,
            width,
            height,
            PhysicsSettings::default(),
            host,
        )));

        let weak: Weak<RefCell<Simulation<RafHost>>> = Rc::downgrade(&inner);
        *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            if let Some(sim) = weak.upgrade() {
                try_mutate(&*sim, "on_frame", |sim| sim.on_frame());
            }
        }));

        log::info!("Simulation initialized with seed: {}", seed);
        Ok(Self { inner })
    }

    pub fn start(&self) {
        self.with_mut("start", |sim| {
            sim.start();
        });
    }

    pub fn stop(&self) {
        self.with_mut("stop", |sim| {
            sim.stop();
        });
    }

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) -> bool {
        self.with_mut("toggle_play_pause", |sim| sim.toggle_play_pause())
            .unwrap_or_else(|| self.is_playing())
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.with_ref(|sim| sim.is_playing()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = setFrameSize)]
    pub fn set_frame_size(&self, width: f32, height: f32, preserve_ownership: bool) {
        self.with_mut("set_frame_size", |sim| {
            sim.set_frame_size(width, height, preserve_ownership);
        });
    }

    /// Coalesced resize for drag handles; applied on the next animation frame
    #[wasm_bindgen(js_name = requestFrameSize)]
    pub fn request_frame_size(&self, width: f32, height: f32) {
        self.with_mut("request_frame_size", |sim| {
            sim.request_frame_size(width, height);
        });
    }

    #[wasm_bindgen(js_name = setTileSize)]
    pub fn set_tile_size(&self, px: f32) {
        self.with_mut("set_tile_size", |sim| {
            sim.set_tile_size(px);
        });
    }

    #[wasm_bindgen(js_name = setSpeedMood)]
    pub fn set_speed_mood(&self, value: f32) {
        self.with_mut("set_speed_mood", |sim| {
            sim.set_speed_mood(value);
        });
    }

    #[wasm_bindgen(js_name = setChaos)]
    pub fn set_chaos(&self, value: f32) {
        self.with_mut("set_chaos", |sim| {
            sim.set_chaos(value);
        });
    }

    /// Apply raw `0..=100` slider positions
    #[wasm_bindgen(js_name = setSliders)]
    pub fn set_sliders(&self, tile_size: f32, speed: f32, chaos: f32) {
        let sliders = SliderSettings {
            tile_size,
            speed,
            chaos,
        };
        self.with_mut("apply_sliders", |sim| {
            sim.apply_sliders(&sliders);
        });
    }

    pub fn reset(&self) {
        self.with_mut("reset", |sim| {
            sim.reset();
        });
    }

    pub fn scatter(&self) {
        self.with_mut("scatter", |sim| {
            sim.scatter();
        });
    }

    #[wasm_bindgen(js_name = swapSides)]
    pub fn swap_sides(&self) {
        self.with_mut("swap_sides", |sim| {
            sim.swap_sides();
        });
    }

    #[wasm_bindgen(js_name = dayScore)]
    pub fn day_score(&self) -> u32 {
        self.with_ref(|sim| sim.score().day).unwrap_or(0)
    }

    #[wasm_bindgen(js_name = nightScore)]
    pub fn night_score(&self) -> u32 {
        self.with_ref(|sim| sim.score().night).unwrap_or(0)
    }

    /// Current board as JSON (same shape `on_present` receives)
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self) -> Result<String, JsValue> {
        let sim = self
            .inner
            .try_borrow()
            .map_err(|_| JsValue::from_str("simulation is busy"))?;
        serde_json::to_string(&sim.frame()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl WebSimulation {
    /// Run `f` unless the simulation is already borrowed (a re-entrant call
    /// from `on_present`)
    fn with_mut<R>(&self, op: &str, f: impl FnOnce(&mut Simulation<RafHost>) -> R) -> Option<R> {
        try_mutate(&*self.inner, op, f)
    }

    fn with_ref<R>(&self, f: impl FnOnce(&Simulation<RafHost>) -> R) -> Option<R> {
        self.inner.try_borrow().ok().map(|sim| f(&sim))
    }
}
