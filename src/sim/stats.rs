//! Score and aggregate board statistics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{Grid, Owner};

/// Per-tick tally of the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub day: u32,
    pub night: u32,
    /// Share of top-half tiles owned by day (0.5 when there are none)
    pub top_half_ratio: f32,
    /// Center of mass of day tiles as a fraction of the canvas
    pub day_centroid: Vec2,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            day: 0,
            night: 0,
            top_half_ratio: 0.5,
            day_centroid: Vec2::splat(0.5),
        }
    }
}

impl Score {
    /// Tally ownership over the whole grid
    pub fn compute(grid: &Grid) -> Self {
        let half_height = grid.canvas_height() / 2.0;
        let mut day = 0u32;
        let mut night = 0u32;
        let mut top_day = 0u32;
        let mut top_total = 0u32;
        let mut day_mass = Vec2::ZERO;

        for (idx, (tile, owner)) in grid.tiles.iter().zip(&grid.ownership).enumerate() {
            match owner {
                Owner::Day => {
                    day += 1;
                    day_mass += grid.tile_center(idx);
                }
                Owner::Night => night += 1,
            }
            if tile.y < half_height {
                top_total += 1;
                if *owner == Owner::Day {
                    top_day += 1;
                }
            }
        }

        let top_half_ratio = if top_total > 0 {
            top_day as f32 / top_total as f32
        } else {
            0.5
        };
        let day_centroid = if day > 0 {
            let canvas = Vec2::new(grid.canvas_width(), grid.canvas_height());
            day_mass / day as f32 / canvas
        } else {
            Vec2::splat(0.5)
        };

        Self {
            day,
            night,
            top_half_ratio,
            day_centroid,
        }
    }

    #[inline]
    pub fn total(&self) -> u32 {
        self.day + self.night
    }

    /// Day share of the whole board
    pub fn day_ratio(&self) -> f32 {
        match self.total() {
            0 => 0.5,
            total => self.day as f32 / total as f32,
        }
    }
}
