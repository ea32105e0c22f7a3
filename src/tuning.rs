//! Slider curves and derived physics values
//!
//! The UI hands over raw slider positions in `0..=100`. Every curve here is
//! pure and monotonic so a slider never runs "backwards".

use serde::{Deserialize, Serialize};

use crate::clamp_finite;
use crate::consts::*;

/// Normalize a raw slider value to `[0, 1]`
#[inline]
fn slider_fraction(raw: f32) -> f32 {
    clamp_finite(raw, 0.0, 100.0) / 100.0
}

/// Tile size in pixels for a raw slider value
pub fn tile_size_from_slider(raw: f32) -> u32 {
    let t = slider_fraction(raw).powf(TILE_SIZE_EXPONENT);
    let span = (MAX_TILE_SIZE - MIN_TILE_SIZE) as f32;
    let size = (MIN_TILE_SIZE as f32 + t * span).round() as u32;
    size.clamp(MIN_TILE_SIZE, MAX_TILE_SIZE)
}

/// Chaos magnitude for a raw slider value, rounded to 3 decimals
pub fn chaos_from_slider(raw: f32) -> f32 {
    let t = slider_fraction(raw).powf(CHAOS_EXPONENT);
    ((t * CHAOS_MAX) * 1000.0).round() / 1000.0
}

/// Speed mood multiplier for a raw slider value
///
/// Lower half of the slider is linear from the floor up to the knee, which
/// keeps slow speeds easy to dial in. The upper half is a power curve from
/// the knee to the ceiling.
pub fn speed_mood_from_slider(raw: f32) -> f32 {
    let n = slider_fraction(raw);
    let mood = if n < 0.5 {
        SPEED_MOOD_MIN + n * 2.0 * (SPEED_MOOD_KNEE - SPEED_MOOD_MIN)
    } else {
        let u = (n - 0.5) * 2.0;
        SPEED_MOOD_KNEE + u.powf(SPEED_MOOD_EXPONENT) * (SPEED_MOOD_MAX - SPEED_MOOD_KNEE)
    };
    mood.clamp(SPEED_MOOD_MIN, SPEED_MOOD_MAX)
}

/// Allowed ball speed range (pixels per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedEnvelope {
    pub min_speed: f32,
    pub max_speed: f32,
}

impl SpeedEnvelope {
    /// Derive the envelope for a speed mood (clamped to the mood range)
    pub fn from_mood(speed_mood: f32) -> Self {
        let mood = clamp_finite(speed_mood, SPEED_MOOD_MIN, SPEED_MOOD_MAX);
        let t = (mood - SPEED_MOOD_MIN) / (SPEED_MOOD_MAX - SPEED_MOOD_MIN);
        let lift = t.powf(0.82);
        let punch = t.powf(1.2);
        Self {
            min_speed: 1.0 + mood * 0.7 + lift * 8.0,
            max_speed: 3.0 + mood * 1.4 + punch * 28.0,
        }
    }

    /// Speed a freshly launched ball starts with on each axis
    pub fn launch_speed(&self) -> f32 {
        self.min_speed + (self.max_speed - self.min_speed) * BALL_LAUNCH_FRACTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tile_size_endpoints() {
        assert_eq!(tile_size_from_slider(0.0), MIN_TILE_SIZE);
        assert_eq!(tile_size_from_slider(100.0), MAX_TILE_SIZE);
        assert_eq!(tile_size_from_slider(35.0), 20);
    }

    #[test]
    fn test_chaos_rounding() {
        assert_eq!(chaos_from_slider(0.0), 0.0);
        assert_eq!(chaos_from_slider(100.0), 1.1);
        let c = chaos_from_slider(40.0);
        assert!((c - 0.122).abs() < 1e-6, "chaos(40) = {c}");
    }

    #[test]
    fn test_speed_mood_knee_is_continuous() {
        let below = speed_mood_from_slider(49.999);
        let at = speed_mood_from_slider(50.0);
        assert!((at - SPEED_MOOD_KNEE).abs() < 1e-5);
        assert!((at - below).abs() < 0.01);
        assert_eq!(speed_mood_from_slider(0.0), SPEED_MOOD_MIN);
        assert_eq!(speed_mood_from_slider(100.0), SPEED_MOOD_MAX);
    }

    #[test]
    fn test_malformed_slider_values_clamp() {
        assert_eq!(tile_size_from_slider(f32::NAN), MIN_TILE_SIZE);
        assert_eq!(tile_size_from_slider(-50.0), MIN_TILE_SIZE);
        assert_eq!(tile_size_from_slider(1e9), MAX_TILE_SIZE);
        assert_eq!(chaos_from_slider(f32::INFINITY), CHAOS_MAX);
        assert_eq!(speed_mood_from_slider(f32::NEG_INFINITY), SPEED_MOOD_MIN);
    }

    #[test]
    fn test_sweep_has_no_inversions() {
        let mut prev = (0u32, 0.0f32, 0.0f32);
        for step in 0..=1000 {
            let raw = step as f32 / 10.0;
            let cur = (
                tile_size_from_slider(raw),
                chaos_from_slider(raw),
                speed_mood_from_slider(raw),
            );
            if step > 0 {
                assert!(cur.0 >= prev.0, "tile size inverted at {raw}");
                assert!(cur.1 >= prev.1, "chaos inverted at {raw}");
                assert!(cur.2 >= prev.2, "speed mood inverted at {raw}");
            }
            prev = cur;
        }
    }

    #[test]
    fn test_envelope_endpoints() {
        let slow = SpeedEnvelope::from_mood(SPEED_MOOD_MIN);
        assert!((slow.min_speed - 1.14).abs() < 1e-4);
        assert!((slow.max_speed - 3.28).abs() < 1e-4);
        let fast = SpeedEnvelope::from_mood(SPEED_MOOD_MAX);
        assert!((fast.min_speed - 23.0).abs() < 1e-3);
        assert!((fast.max_speed - 59.0).abs() < 1e-3);
    }

    #[test]
    fn test_launch_speed_inside_envelope() {
        let env = SpeedEnvelope::from_mood(1.2);
        let base = env.launch_speed();
        assert!(base > env.min_speed && base < env.max_speed);
    }

    proptest! {
        #[test]
        fn prop_curves_monotonic(a in 0.0f32..=100.0, b in 0.0f32..=100.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tile_size_from_slider(lo) <= tile_size_from_slider(hi));
            prop_assert!(chaos_from_slider(lo) <= chaos_from_slider(hi));
            prop_assert!(speed_mood_from_slider(lo) <= speed_mood_from_slider(hi));
        }

        #[test]
        fn prop_envelope_ordered_and_monotonic(a in SPEED_MOOD_MIN..=SPEED_MOOD_MAX, b in SPEED_MOOD_MIN..=SPEED_MOOD_MAX) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let e_lo = SpeedEnvelope::from_mood(lo);
            let e_hi = SpeedEnvelope::from_mood(hi);
            prop_assert!(0.0 < e_lo.min_speed && e_lo.min_speed < e_lo.max_speed);
            prop_assert!(e_lo.min_speed <= e_hi.min_speed);
            prop_assert!(e_lo.max_speed <= e_hi.max_speed);
        }
    }
}
