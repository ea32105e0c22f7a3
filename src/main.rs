//! Daynite Drift entry point
//!
//! On the web the page drives `WebSimulation`; this only sets up logging.
//! Natively it runs a short headless match and logs the tally.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Daynite Drift loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use daynite_drift::consts::DEFAULT_FRAME_DIM;
    use daynite_drift::{ManualHost, Simulation, SliderSettings};

    /// Headless frames per phase (10 seconds at 60 Hz)
    const FRAMES: u32 = 600;

    env_logger::init();
    log::info!("Daynite Drift (native) starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let sliders = SliderSettings::default();
    let mut sim = Simulation::with_seed(
        seed,
        DEFAULT_FRAME_DIM,
        DEFAULT_FRAME_DIM,
        sliders.physics(),
        ManualHost::new(),
    );

    fn run(sim: &mut Simulation<ManualHost>, label: &str) {
        sim.start();
        for frame in 1..=FRAMES {
            if !sim.host_mut().take_pending() {
                break;
            }
            sim.on_frame();
            if frame % 120 == 0 {
                let score = sim.score();
                log::info!(
                    "[{label}] tick {}: day={} night={} top={:.2}",
                    sim.state().time_ticks,
                    score.day,
                    score.night,
                    score.top_half_ratio
                );
            }
        }
        sim.stop();
    }

    run(&mut sim, "split");
    sim.scatter();
    run(&mut sim, "scatter");
    sim.request_frame_size(1000.0, 600.0);
    sim.swap_sides();
    run(&mut sim, "swapped");

    match serde_json::to_string_pretty(&sim.score()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode score: {}", e),
    }
}
