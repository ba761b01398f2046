//! Pocket rooms and funnel corridors: the large open features of a battlefield.

use crate::types::{GridPos, TerrainType};

use super::grid::Grid;
use super::seed::SeedStream;

const POCKET_MARGIN: i32 = 2;
const MIN_POCKET_SIDE: i32 = 2;
const FUNNEL_MOVES: [GridPos; 3] = [GridPos::UP, GridPos::LEFT, GridPos::RIGHT];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct PocketRect {
    pub(super) x: i32,
    pub(super) y: i32,
    pub(super) width: i32,
    pub(super) height: i32,
}

impl PocketRect {
    /// Cells covered by the rectangle that also lie inside `grid`.
    fn cells(self, grid: &Grid) -> impl Iterator<Item = GridPos> + '_ {
        (self.x..self.x + self.width)
            .flat_map(move |x| (self.y..self.y + self.height).map(move |y| GridPos::new(x, y)))
            .filter(move |&pos| grid.in_bounds(pos))
    }
}

/// Draws one pocket rectangle. Sides are bounded by `max(3, dim / 6)` and the
/// anchor keeps a two-cell margin from the low edges.
pub(super) fn roll_pocket(stream: &mut SeedStream, width: usize, height: usize) -> PocketRect {
    let (width, height) = (width as i32, height as i32);
    let pocket_width = stream.range_i32(MIN_POCKET_SIDE, (width / 6).max(3));
    let pocket_height = stream.range_i32(MIN_POCKET_SIDE, (height / 6).max(3));
    let x = stream.range_i32(POCKET_MARGIN, width - pocket_width - POCKET_MARGIN);
    let y = stream.range_i32(POCKET_MARGIN, height - pocket_height - POCKET_MARGIN);
    PocketRect { x, y, width: pocket_width, height: pocket_height }
}

/// Carves `[1, 3 + complexity)` pockets and returns how many were carved.
///
/// Pockets overwrite whatever lies underneath, wall buffer included.
pub(super) fn carve_pockets(grid: &mut Grid, stream: &mut SeedStream, complexity: u8) -> usize {
    let pocket_count = stream.range_i32(1, 3 + i32::from(complexity)) as usize;
    for _ in 0..pocket_count {
        let pocket = roll_pocket(stream, grid.width(), grid.height());
        let cells: Vec<GridPos> = pocket.cells(grid).collect();
        for pos in cells {
            grid.set_terrain(pos, TerrainType::OpenPocket);
        }
    }
    pocket_count
}

/// Carves `[0, 1 + cohesion)` funnels and returns how many were carved.
pub(super) fn carve_funnels(grid: &mut Grid, stream: &mut SeedStream, cohesion: u8) -> usize {
    let funnel_count = stream.range_i32(0, 1 + i32::from(cohesion)) as usize;
    for _ in 0..funnel_count {
        carve_funnel(grid, stream, f32::from(cohesion));
    }
    funnel_count
}

/// Biased upward walk from a bottom-edge entrance toward a point near the centre.
///
/// Moves are limited to up, left and right inside a one-cell margin. Each
/// candidate scores `-distance + jitter`; the first strictly best candidate in
/// `FUNNEL_MOVES` order wins. Wall-buffer cells the walk crosses keep their tag.
fn carve_funnel(grid: &mut Grid, stream: &mut SeedStream, cohesion: f32) {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let entrance = GridPos::new(stream.range_i32(1, width - 1), 0);
    let target_x = width / 2 + stream.range_i32(-width / 6, width / 6);
    let target_y = height / 2 + stream.range_i32(-height / 6, height / 6);
    let target = GridPos::new(target_x, target_y);

    let max_steps = grid.len() / 2;
    let mut current = entrance;
    for _ in 0..max_steps {
        if grid.terrain(current) != TerrainType::BlockedWallBuffer {
            grid.set_terrain(current, TerrainType::Funnel);
        }
        if current == target {
            break;
        }

        current = next_funnel_step(current, target, (width, height), stream, cohesion);
    }
}

/// Picks the next funnel cell among `FUNNEL_MOVES` that stay inside the
/// one-cell margin. Ties keep the earliest move; stays put when none fit.
fn next_funnel_step(
    current: GridPos,
    target: GridPos,
    (width, height): (i32, i32),
    stream: &mut SeedStream,
    cohesion: f32,
) -> GridPos {
    let mut best = current;
    let mut best_score = f32::NEG_INFINITY;
    for step in FUNNEL_MOVES {
        let next = current + step;
        if next.x < 1 || next.y < 1 || next.x >= width - 1 || next.y >= height - 1 {
            continue;
        }
        let score = -next.distance(target) + stream.range_f32(-cohesion, cohesion);
        if score > best_score {
            best_score = score;
            best = next;
        }
    }
    best
}
