//! Tile grid and ownership map
//!
//! Tiles are stored row-major. The ownership map always has exactly one entry
//! per tile; there is no unclaimed state.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_GRID_DIM;

/// The two factions competing for tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Day,
    Night,
}

impl Owner {
    /// Numeric id (day = 0, night = 1)
    pub fn index(self) -> u8 {
        match self {
            Owner::Day => 0,
            Owner::Night => 1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Owner::Day => Owner::Night,
            Owner::Night => Owner::Day,
        }
    }
}

/// Top-left corner of a tile in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: f32,
    pub y: f32,
}

/// Grid geometry plus per-tile ownership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// Columns
    pub width: u32,
    /// Rows
    pub height: u32,
    /// Tile edge length in pixels
    pub tile_size: u32,
    pub tiles: Vec<Tile>,
    pub ownership: Vec<Owner>,
}

impl Grid {
    /// Tile counts for a frame, never below the 8x8 floor
    pub fn dims_for(frame_width: f32, frame_height: f32, tile_size: u32) -> (u32, u32) {
        let ts = tile_size.max(1) as f32;
        let fit = |extent: f32| ((extent.max(0.0) / ts).floor() as u32).max(MIN_GRID_DIM);
        (fit(frame_width), fit(frame_height))
    }

    /// Build a grid that fits the frame, snapped down to whole tiles.
    ///
    /// With a `previous` grid its ownership is remapped onto the new
    /// resolution; otherwise the board starts split down the middle.
    pub fn build(frame_width: f32, frame_height: f32, tile_size: u32, previous: Option<&Grid>) -> Self {
        let tile_size = tile_size.max(1);
        let (width, height) = Self::dims_for(frame_width, frame_height, tile_size);
        let ownership = match previous {
            Some(old) => remap_ownership(&old.ownership, old.width, old.height, width, height),
            None => split_ownership(width, height),
        };
        let tiles = (0..width * height)
            .map(|idx| Tile {
                x: ((idx % width) * tile_size) as f32,
                y: ((idx / width) * tile_size) as f32,
            })
            .collect();
        Self {
            width,
            height,
            tile_size,
            tiles,
            ownership,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Canvas width in pixels (always a whole number of tiles)
    #[inline]
    pub fn canvas_width(&self) -> f32 {
        (self.width * self.tile_size) as f32
    }

    #[inline]
    pub fn canvas_height(&self) -> f32 {
        (self.height * self.tile_size) as f32
    }

    /// Center of a tile in canvas pixels
    #[inline]
    pub fn tile_center(&self, idx: usize) -> Vec2 {
        let half = self.tile_size as f32 * 0.5;
        let tile = self.tiles[idx];
        Vec2::new(tile.x + half, tile.y + half)
    }

    /// Restore the left/right split
    pub fn reset_split(&mut self) {
        self.ownership = split_ownership(self.width, self.height);
    }

    /// Give every tile a coin-flip owner
    pub fn scatter<R: Rng>(&mut self, rng: &mut R) {
        for owner in &mut self.ownership {
            *owner = if rng.random::<f32>() > 0.5 {
                Owner::Night
            } else {
                Owner::Day
            };
        }
    }

    /// Flip every tile to the other faction
    pub fn invert(&mut self) {
        for owner in &mut self.ownership {
            *owner = owner.opposite();
        }
    }
}

/// Left half of the columns to day, right half to night.
///
/// On odd widths the middle column goes to day.
pub fn split_ownership(width: u32, height: u32) -> Vec<Owner> {
    (0..width * height)
        .map(|idx| {
            if (idx % width) * 2 < width {
                Owner::Day
            } else {
                Owner::Night
            }
        })
        .collect()
}

/// Nearest-neighbor resample of an ownership map to a new resolution.
///
/// Each destination cell copies the source cell at
/// `floor(dest / dest_dim * src_dim)`, so owners are never blended. An empty
/// or mis-sized source falls back to the split layout.
pub fn remap_ownership(old: &[Owner], old_w: u32, old_h: u32, new_w: u32, new_h: u32) -> Vec<Owner> {
    if old.is_empty() || old_w == 0 || old_h == 0 || old.len() != (old_w * old_h) as usize {
        return split_ownership(new_w, new_h);
    }
    let mut mapped = Vec::with_capacity((new_w * new_h) as usize);
    for y in 0..new_h {
        let src_y = (y as u64 * old_h as u64 / new_h as u64).min(old_h as u64 - 1);
        for x in 0..new_w {
            let src_x = (x as u64 * old_w as u64 / new_w as u64).min(old_w as u64 - 1);
            mapped.push(old[(src_y * old_w as u64 + src_x) as usize]);
        }
    }
    mapped
}
