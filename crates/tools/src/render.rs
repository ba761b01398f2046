use std::collections::BTreeSet;
use std::fmt::Write;

use battlegen::{BattlefieldData, GridPos, TerrainType};

const SPAWN_GLYPH: char = 'E';

pub fn terrain_glyph(terrain: TerrainType) -> char {
    match terrain {
        TerrainType::Open => '.',
        TerrainType::OpenPocket => 'o',
        TerrainType::Funnel => '~',
        TerrainType::BlockedRock => '#',
        TerrainType::BlockedWallBuffer => '=',
    }
}

/// Draws the terrain grid top row first, marking spawn cells with `E`.
pub fn render_ascii(data: &BattlefieldData) -> String {
    let spawns: BTreeSet<GridPos> = data.enemy_spawns.iter().map(|spawn| spawn.cell).collect();
    let mut out = String::with_capacity((data.width() + 1) * data.height());

    for y in (0..data.height() as i32).rev() {
        for x in 0..data.width() as i32 {
            let pos = GridPos::new(x, y);
            let glyph = if spawns.contains(&pos) {
                SPAWN_GLYPH
            } else {
                terrain_glyph(data.terrain_at(pos))
            };
            out.push(glyph);
        }
        out.push('\n');
    }

    out
}

pub fn render_summary(data: &BattlefieldData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Seed: {}", data.seed);
    let _ = writeln!(out, "Preset: {}", data.preset);
    let _ = writeln!(out, "Grid: {}x{} (cell size {})", data.width(), data.height(), data.cell_size);
    let _ = writeln!(out, "Open cells: {}", data.open_cell_count);
    let _ = writeln!(out, "Spawns: {}", data.spawn_count);
    let _ = writeln!(out, "Launcher nodes: {}", data.launcher_nodes.len());
    let _ = writeln!(out, "Fingerprint: {:016x}", data.fingerprint());
    out
}
