//! Best-effort repair pass pushing the open-cell count into `[min, max]`.

use crate::types::{GridPos, TerrainType};

use super::grid::Grid;
use super::seed::SeedStream;

pub(super) const MAX_BALANCE_ATTEMPTS: usize = 1000;
const SMALL_CLUSTER_LIMIT: usize = 4;
const RANDOM_CELL_MARGIN: i32 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct BalanceOutcome {
    pub(super) raise_attempts: usize,
    pub(super) lower_attempts: usize,
    pub(super) open_cells: usize,
}

/// Raises the open count toward `min_open` by clearing small rock clusters (or
/// widening a random 3x3 patch when none remain), then lowers it toward
/// `max_open` by dropping single rocks. Each direction gives up after
/// `MAX_BALANCE_ATTEMPTS`; missing the bounds is not an error.
pub(super) fn balance_open_cells(
    grid: &mut Grid,
    stream: &mut SeedStream,
    min_open: usize,
    max_open: usize,
) -> BalanceOutcome {
    let mut outcome = BalanceOutcome { open_cells: grid.count_open(), ..Default::default() };

    while outcome.open_cells < min_open && outcome.raise_attempts < MAX_BALANCE_ATTEMPTS {
        if !clear_small_rock_cluster(grid) {
            widen_random_patch(grid, stream);
        }
        outcome.open_cells = grid.count_open();
        outcome.raise_attempts += 1;
    }

    while outcome.open_cells > max_open && outcome.lower_attempts < MAX_BALANCE_ATTEMPTS {
        add_random_blocker(grid, stream);
        outcome.open_cells = grid.count_open();
        outcome.lower_attempts += 1;
    }

    outcome
}

/// Clears the first rock cluster (column-major scan, one-cell margin) of at most
/// `SMALL_CLUSTER_LIMIT` cells. Returns `false` when there is none.
fn clear_small_rock_cluster(grid: &mut Grid) -> bool {
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    let mut measured = vec![false; grid.len()];

    for x in 1..width - 1 {
        for y in 1..height - 1 {
            let index = (y * width + x) as usize;
            if measured[index] || grid.terrain(GridPos::new(x, y)) != TerrainType::BlockedRock {
                continue;
            }
            let cluster = grid.flood_region(GridPos::new(x, y), TerrainType::BlockedRock);
            if cluster.len() <= SMALL_CLUSTER_LIMIT {
                for pos in cluster {
                    grid.set_terrain(pos, TerrainType::Open);
                }
                return true;
            }
            for pos in cluster {
                measured[(pos.y * width + pos.x) as usize] = true;
            }
        }
    }

    false
}

/// Opens the 3x3 patch around a random interior cell, leaving wall buffer alone.
fn widen_random_patch(grid: &mut Grid, stream: &mut SeedStream) {
    let centre = random_interior_cell(grid, stream);
    for dx in -1..=1 {
        for dy in -1..=1 {
            let pos = GridPos::new(centre.x + dx, centre.y + dy);
            if grid.in_bounds(pos) && grid.terrain(pos) != TerrainType::BlockedWallBuffer {
                grid.set_terrain(pos, TerrainType::Open);
            }
        }
    }
}

/// Tags a random interior cell as rock, whatever it was before.
fn add_random_blocker(grid: &mut Grid, stream: &mut SeedStream) {
    let pos = random_interior_cell(grid, stream);
    grid.set_terrain(pos, TerrainType::BlockedRock);
}

fn random_interior_cell(grid: &Grid, stream: &mut SeedStream) -> GridPos {
    let x = stream.range_i32(RANDOM_CELL_MARGIN, grid.width() as i32 - RANDOM_CELL_MARGIN);
    let y = stream.range_i32(RANDOM_CELL_MARGIN, grid.height() as i32 - RANDOM_CELL_MARGIN);
    GridPos::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::grid::mark_edge_buffer;
    use crate::types::{Bounds, Vec2};

    fn buffered_grid(width: usize, height: usize) -> Grid {
        let bounds = Bounds::from_size(Vec2::ZERO, Vec2::new(width as f32, height as f32));
        let mut grid = Grid::new(width, height, 1.0, &bounds);
        mark_edge_buffer(&mut grid, 1);
        grid
    }

    fn fill_interior_with_rock(grid: &mut Grid) {
        for x in 1..grid.width() as i32 - 1 {
            for y in 1..grid.height() as i32 - 1 {
                grid.set_terrain(GridPos::new(x, y), TerrainType::BlockedRock);
            }
        }
    }

    #[test]
    fn small_clusters_are_cleared_before_large_ones_are_touched() {
        let mut grid = buffered_grid(12, 12);
        for x in 2..=6 {
            grid.set_terrain(GridPos::new(x, 2), TerrainType::BlockedRock);
        }
        grid.set_terrain(GridPos::new(8, 8), TerrainType::BlockedRock);
        grid.set_terrain(GridPos::new(8, 9), TerrainType::BlockedRock);

        assert!(clear_small_rock_cluster(&mut grid));
        assert_eq!(grid.terrain(GridPos::new(8, 8)), TerrainType::Open);
        assert_eq!(grid.terrain(GridPos::new(8, 9)), TerrainType::Open);
        assert_eq!(grid.count_terrain(TerrainType::BlockedRock), 5);

        assert!(!clear_small_rock_cluster(&mut grid), "five-cell bar is not small");
    }

    #[test]
    fn raising_reaches_minimum_when_possible() {
        let mut grid = buffered_grid(20, 12);
        fill_interior_with_rock(&mut grid);
        assert_eq!(grid.count_open(), 0);

        let outcome = balance_open_cells(&mut grid, &mut SeedStream::new(8), 60, 400);
        assert!(outcome.open_cells >= 60, "{outcome:?}");
        assert_eq!(outcome.open_cells, grid.count_open());
        assert_eq!(outcome.lower_attempts, 0);
        assert_eq!(grid.count_terrain(TerrainType::BlockedWallBuffer), 2 * 20 + 2 * 10);
    }

    #[test]
    fn unreachable_minimum_stops_after_attempt_cap() {
        let mut grid = buffered_grid(12, 8);
        let total = grid.len();
        let outcome = balance_open_cells(&mut grid, &mut SeedStream::new(1), total + 1, total + 1);
        assert_eq!(outcome.raise_attempts, MAX_BALANCE_ATTEMPTS);
        assert!(outcome.open_cells <= total);
        assert_eq!(grid.count_terrain(TerrainType::BlockedWallBuffer), 2 * 12 + 2 * 6);
    }

    #[test]
    fn lowering_blocks_cells_until_maximum() {
        let mut grid = buffered_grid(20, 12);
        let outcome = balance_open_cells(&mut grid, &mut SeedStream::new(21), 0, 150);
        assert_eq!(outcome.raise_attempts, 0);
        assert!(outcome.open_cells <= 150, "{outcome:?}");
        assert!(outcome.lower_attempts >= 180 - 150);
    }

    #[test]
    fn bounds_already_met_consume_no_attempts() {
        let mut grid = buffered_grid(20, 12);
        let before = grid.clone();
        let outcome = balance_open_cells(&mut grid, &mut SeedStream::new(2), 10, 400);
        assert_eq!(
            outcome,
            BalanceOutcome { raise_attempts: 0, lower_attempts: 0, open_cells: 180 }
        );
        assert_eq!(grid, before);
    }
}
