//! Ball vs tile collision
//!
//! A ball's bounding box is tested against tile boxes. Every overlapping tile
//! owned by the other faction flips to the ball's owner and bounces the ball
//! on one axis. There is no early exit: a ball touching three enemy tiles in
//! one tick flips all three and reflects three times.

use glam::Vec2;

use super::ball::Ball;
use super::grid::{Grid, Tile};

/// Strict AABB overlap between a ball's box and a tile
#[inline]
pub fn tile_overlap(ball_pos: Vec2, radius: f32, tile: &Tile, tile_size: f32) -> bool {
    ball_pos.x + radius > tile.x
        && ball_pos.x - radius < tile.x + tile_size
        && ball_pos.y + radius > tile.y
        && ball_pos.y - radius < tile.y + tile_size
}

/// Reflect one velocity axis based on where the ball sits relative to a tile.
///
/// Horizontal offset strictly larger flips `vx`; ties flip `vy`.
#[inline]
pub fn reflect_from_tile(ball: &mut Ball, tile_center: Vec2) {
    let d = ball.pos - tile_center;
    if d.x.abs() > d.y.abs() {
        ball.vel.x = -ball.vel.x;
    } else {
        ball.vel.y = -ball.vel.y;
    }
}

/// Claim every enemy tile the ball overlaps, in row-major order.
///
/// Only the rows and columns under the ball's box are visited; the order
/// among them is the same as a full scan. Returns how many tiles flipped.
pub fn claim_tiles(ball: &mut Ball, radius: f32, grid: &mut Grid) -> u32 {
    if grid.is_empty() {
        return 0;
    }
    let ts = grid.tile_size as f32;
    let span = |lo: f32, hi: f32, cells: u32| -> Option<(u32, u32)> {
        let first = (lo / ts).floor().max(0.0);
        let last = (hi / ts).floor().min((cells - 1) as f32);
        if !first.is_finite() || !last.is_finite() || first > last {
            None
        } else {
            Some((first as u32, last as u32))
        }
    };
    let Some((col0, col1)) = span(ball.pos.x - radius, ball.pos.x + radius, grid.width) else {
        return 0;
    };
    let Some((row0, row1)) = span(ball.pos.y - radius, ball.pos.y + radius, grid.height) else {
        return 0;
    };

    let mut flipped = 0;
    for row in row0..=row1 {
        for col in col0..=col1 {
            let idx = (row * grid.width + col) as usize;
            if grid.ownership[idx] == ball.owner {
                continue;
            }
            if !tile_overlap(ball.pos, radius, &grid.tiles[idx], ts) {
                continue;
            }
            grid.ownership[idx] = ball.owner;
            reflect_from_tile(ball, grid.tile_center(idx));
            flipped += 1;
        }
    }
    flipped
}
