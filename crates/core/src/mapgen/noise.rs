//! Rock noise seeding followed by cellular-automata smoothing.

use std::mem;

use crate::types::{GridPos, TerrainType};

use super::grid::Grid;
use super::seed::SeedStream;

const NOISE_MARGIN: usize = 2;
const BASE_ROCK_CHANCE: f32 = 0.08;
const ROCK_CHANCE_PER_COMPLEXITY: f32 = 0.02;
const BLOCKED_NEIGHBOURS_TO_FILL: usize = 5;
const BLOCKED_NEIGHBOURS_TO_CLEAR: usize = 2;

pub(super) fn rock_chance(complexity: u8) -> f32 {
    BASE_ROCK_CHANCE + ROCK_CHANCE_PER_COMPLEXITY * f32::from(complexity)
}

pub(super) fn smoothing_passes(complexity: u8) -> usize {
    2 + usize::from(complexity)
}

/// Turns interior `Open` cells into rock with probability `rock_chance`.
///
/// One draw per `Open` cell, column-major, two-cell margin excluded.
pub(super) fn seed_rock_noise(grid: &mut Grid, stream: &mut SeedStream, complexity: u8) {
    let chance = rock_chance(complexity);
    let (width, height) = (grid.width(), grid.height());
    for x in NOISE_MARGIN..width.saturating_sub(NOISE_MARGIN) {
        for y in NOISE_MARGIN..height.saturating_sub(NOISE_MARGIN) {
            let pos = GridPos::new(x as i32, y as i32);
            if grid.terrain(pos) == TerrainType::Open && stream.value() < chance {
                grid.set_terrain(pos, TerrainType::BlockedRock);
            }
        }
    }
}

/// Runs `passes` smoothing passes over the interior (one-cell margin excluded).
///
/// A cell with 5+ obstructed neighbours becomes rock, one with 2 or fewer
/// becomes `Open`. Every pass reads the previous pass's buffer only. Wall
/// buffer cells are never retagged.
pub(super) fn smooth(grid: &mut Grid, passes: usize) {
    let (width, height) = (grid.width(), grid.height());
    let mut current = grid.terrain_snapshot();
    let mut next = current.clone();

    for _ in 0..passes {
        next.copy_from_slice(&current);
        for x in 1..width.saturating_sub(1) {
            for y in 1..height.saturating_sub(1) {
                let index = y * width + x;
                if current[index] == TerrainType::BlockedWallBuffer {
                    continue;
                }
                let blocked = blocked_neighbours(&current, width, x, y);
                if blocked >= BLOCKED_NEIGHBOURS_TO_FILL {
                    next[index] = TerrainType::BlockedRock;
                } else if blocked <= BLOCKED_NEIGHBOURS_TO_CLEAR {
                    next[index] = TerrainType::Open;
                }
            }
        }
        mem::swap(&mut current, &mut next);
    }

    grid.apply_terrain(&current);
}

fn blocked_neighbours(terrain: &[TerrainType], width: usize, x: usize, y: usize) -> usize {
    let mut count = 0;
    for ny in (y - 1)..=(y + 1) {
        for nx in (x - 1)..=(x + 1) {
            if (nx, ny) != (x, y) && !terrain[ny * width + nx].is_clear() {
                count += 1;
            }
        }
    }
    count
}
