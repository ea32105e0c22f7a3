//! Fixed timestep simulation tick
//!
//! One tick per host frame. Each ball, in order: claim overlapping enemy
//! tiles, bounce off the canvas edges, jitter, clamp speed, then move.

use super::collision::claim_tiles;
use super::state::SimulationState;
use super::stats::Score;

/// Advance the simulation by one frame and return the new tally
pub fn tick(state: &mut SimulationState) -> Score {
    state.time_ticks += 1;

    let radius = state.ball_radius;
    let width = state.grid.canvas_width();
    let height = state.grid.canvas_height();
    let chaos = state.settings.chaos;
    let envelope = state.envelope;

    for ball in state.balls.iter_mut() {
        claim_tiles(ball, radius, &mut state.grid);
        ball.reflect_off_bounds(radius, width, height);
        ball.apply_jitter(chaos, &mut state.rng);
        ball.clamp_speed(&envelope);
        ball.integrate();
    }

    state.refresh_score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PhysicsSettings;
    use crate::sim::grid::{Owner, split_ownership};
    use glam::Vec2;
    use proptest::prelude::*;

    fn state(seed: u64) -> SimulationState {
        SimulationState::new(
            seed,
            720.0,
            720.0,
            PhysicsSettings {
                tile_size: 36,
                speed_mood: 1.2,
                chaos: 0.3,
            },
        )
    }

    #[test]
    fn test_tick_advances_counter_and_moves_balls() {
        let mut s = state(12345);
        let before = s.balls;
        tick(&mut s);
        assert_eq!(s.time_ticks, 1);
        assert_ne!(s.balls[0].pos, before[0].pos);
        assert_ne!(s.balls[1].pos, before[1].pos);
    }

    #[test]
    fn test_determinism() {
        let mut a = state(99999);
        let mut b = state(99999);
        for _ in 0..500 {
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.grid.ownership, b.grid.ownership);
        assert_eq!(a.balls, b.balls);
        assert_eq!(a.score, b.score);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = state(1);
        let mut b = state(2);
        for _ in 0..200 {
            tick(&mut a);
            tick(&mut b);
        }
        assert_ne!(a.balls, b.balls);
    }

    #[test]
    fn test_ball_stays_on_canvas() {
        let mut s = state(77);
        s.set_speed_mood(20.0);
        s.set_chaos(1.1);
        for _ in 0..2000 {
            tick(&mut s);
            for ball in &s.balls {
                // One step past the clamp at most
                let slack = s.envelope.max_speed + 1e-3;
                assert!(ball.pos.x >= s.ball_radius - slack);
                assert!(ball.pos.x <= s.grid.canvas_width() - s.ball_radius + slack);
                assert!(ball.pos.y >= s.ball_radius - slack);
                assert!(ball.pos.y <= s.grid.canvas_height() - s.ball_radius + slack);
            }
        }
    }

    #[test]
    fn test_balls_paint_enemy_territory() {
        let mut s = state(4242);
        for _ in 0..600 {
            tick(&mut s);
        }
        assert_ne!(s.grid.ownership, split_ownership(20, 20), "no tiles changed hands");
    }

    #[test]
    fn test_ball_flips_tile_under_it() {
        let mut s = state(8);
        s.set_chaos(0.0);
        // Put the day ball in the middle of a night tile
        let idx = 5 * s.grid.width as usize + 15;
        assert_eq!(s.grid.ownership[idx], Owner::Night);
        s.balls[0].pos = s.grid.tile_center(idx);
        tick(&mut s);
        assert_eq!(s.grid.ownership[idx], Owner::Day);
    }

    #[test]
    fn test_tile_bounce_sees_ball_before_edge_clamp() {
        let mut s = state(8);
        s.set_chaos(0.0);
        // Bottom row night tile at col 15 (center 558, 702); col 16 is ours
        let idx = 19 * s.grid.width as usize + 15;
        s.grid.ownership[idx + 1] = Owner::Day;
        assert_eq!(s.grid.ownership[idx], Owner::Night);

        // Past the bottom edge: dy 17 > dx 8 before clamping, 2.16 < 8 after
        s.balls[0].pos = Vec2::new(566.0, 719.0);
        s.balls[0].vel = Vec2::new(2.0, 3.0);
        tick(&mut s);

        // Tile flips vy, edge flips it back; vx untouched
        assert_eq!(s.grid.ownership[idx], Owner::Day);
        let ball = s.balls[0];
        assert_eq!(ball.vel, Vec2::new(2.0, 3.0));
        let bottom = s.grid.canvas_height() - s.ball_radius;
        assert!((ball.pos.x - 568.0).abs() < 1e-4);
        assert!((ball.pos.y - (bottom + 3.0)).abs() < 1e-4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_invariants_hold_every_tick(seed in any::<u64>(), mood in 0.2f32..20.0, chaos in 0.0f32..1.1) {
            let mut s = state(seed);
            s.set_speed_mood(mood);
            s.set_chaos(chaos);
            let total = s.grid.len() as u32;
            for _ in 0..150 {
                let score = tick(&mut s);
                prop_assert_eq!(score.day + score.night, total);
                for ball in &s.balls {
                    let speed = ball.vel.length();
                    prop_assert!(speed >= s.envelope.min_speed * 0.9999);
                    prop_assert!(speed <= s.envelope.max_speed * 1.0001);
                }
            }
        }
    }
}
