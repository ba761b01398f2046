//! Battlefield construction pipeline that runs every stage in fixed order.

use log::{debug, info, warn};

use crate::options::GenerationOptions;
use crate::types::{Bounds, MapPreset, Vec2};

use super::super::balance::balance_open_cells;
use super::super::grid::{Grid, buffer_cell_count, grid_dimensions, mark_edge_buffer};
use super::super::launchers::generate_launcher_nodes;
use super::super::layout::{carve_funnels, carve_pockets};
use super::super::model::{BattlefieldData, GenerationReport};
use super::super::noise::{seed_rock_noise, smooth, smoothing_passes};
use super::super::seed::SeedStream;
use super::super::spawns::pick_spawn_points;
use super::super::walls::build_wall_segments;

pub(super) fn generate_battlefield(
    seed: u64,
    preset: MapPreset,
    options: &GenerationOptions,
) -> BattlefieldData {
    let options = options.sanitized();
    let mut stream = SeedStream::new(seed);
    let cell_size = options.cell_size;

    let (width, height) = grid_dimensions(preset.nominal_size(), cell_size);
    let bounds = Bounds::from_size(
        Vec2::ZERO,
        Vec2::new(width as f32 * cell_size, height as f32 * cell_size),
    );
    let mut grid = Grid::new(width, height, cell_size, &bounds);
    debug!("seed {seed}: {preset} grid is {width}x{height} cells of {cell_size}");

    let buffer_cells = buffer_cell_count(options.wall_buffer, cell_size);
    mark_edge_buffer(&mut grid, buffer_cells);

    let launcher_nodes =
        generate_launcher_nodes(&bounds, options.launcher_node_spacing, options.launcher_offset);
    debug!("seed {seed}: {} launcher nodes, buffer {buffer_cells} cells", launcher_nodes.len());

    let pockets_carved = carve_pockets(&mut grid, &mut stream, options.complexity);
    let funnels_carved = carve_funnels(&mut grid, &mut stream, options.cohesion);
    debug!("seed {seed}: carved {pockets_carved} pockets and {funnels_carved} funnels");

    seed_rock_noise(&mut grid, &mut stream, options.complexity);
    let passes = smoothing_passes(options.complexity);
    smooth(&mut grid, passes);

    let balance =
        balance_open_cells(&mut grid, &mut stream, options.min_open_cells, options.max_open_cells);
    debug!(
        "seed {seed}: balancer used {} raise and {} lower attempts",
        balance.raise_attempts, balance.lower_attempts
    );
    if balance.open_cells < options.min_open_cells || balance.open_cells > options.max_open_cells
    {
        warn!(
            "seed {seed}: {} open cells outside requested [{}, {}]",
            balance.open_cells, options.min_open_cells, options.max_open_cells
        );
    }

    let (enemy_spawns, spawn_candidates) = pick_spawn_points(
        &grid,
        &mut stream,
        options.spawn_count,
        options.spawn_distance_from_launcher_exit,
    );
    debug!("seed {seed}: {} of {spawn_candidates} spawn candidates picked", enemy_spawns.len());

    let wall_segments = build_wall_segments(&bounds, options.wall_thickness);

    let open_cell_count = grid.count_open();
    let spawn_count = enemy_spawns.len();
    info!("generated battlefield seed={seed} open_cells={open_cell_count} spawns={spawn_count}");

    BattlefieldData {
        seed,
        preset,
        cell_size,
        bounds,
        grid,
        launcher_nodes,
        enemy_spawns,
        wall_segments,
        open_cell_count,
        spawn_count,
        report: GenerationReport {
            buffer_cells,
            pockets_carved,
            funnels_carved,
            smoothing_passes: passes,
            raise_attempts: balance.raise_attempts,
            lower_attempts: balance.lower_attempts,
            spawn_candidates,
        },
    }
}
