//! Enemy spawn point selection from clear ground far enough from the centre.

use crate::types::Vec2;

use super::grid::Grid;
use super::model::EnemySpawn;
use super::seed::SeedStream;

/// Candidate cells in column-major order: `Open` or `OpenPocket` (funnels are
/// excluded) whose centre lies farther than `min_distance` from the origin.
pub(super) fn spawn_candidates(grid: &Grid, min_distance: f32) -> Vec<EnemySpawn> {
    grid.iter_columns()
        .filter(|cell| cell.terrain.is_clear())
        .filter(|cell| cell.world_pos.distance(Vec2::ZERO) > min_distance)
        .map(|cell| EnemySpawn { cell: cell.pos, position: cell.world_pos })
        .collect()
}

/// Shuffles the candidates forward (index `i` swaps with a draw from `[i, len)`)
/// and keeps the first `spawn_count`.
///
/// Returns the picks and the candidate count.
pub(super) fn pick_spawn_points(
    grid: &Grid,
    stream: &mut SeedStream,
    spawn_count: usize,
    min_distance: f32,
) -> (Vec<EnemySpawn>, usize) {
    let mut candidates = spawn_candidates(grid, min_distance);
    let candidate_count = candidates.len();
    for index in 0..candidate_count {
        let swap_with = stream.range_usize(index, candidate_count);
        candidates.swap(index, swap_with);
    }
    candidates.truncate(spawn_count);
    (candidates, candidate_count)
}
