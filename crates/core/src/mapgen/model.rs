//! Public data models for a generated battlefield.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{Bounds, Edge, GridPos, MapPreset, TerrainType, Vec2, WallType};

use super::grid::{Grid, GridCell};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LauncherNode {
    pub edge: Edge,
    pub position: Vec2,
    /// Unit vector pointing into the battlefield.
    pub inward_normal: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub wall_type: WallType,
    pub center: Vec2,
    /// Full width and height of the rectangle.
    pub size: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub cell: GridPos,
    pub position: Vec2,
}

/// What each stage actually did for this seed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub buffer_cells: usize,
    pub pockets_carved: usize,
    pub funnels_carved: usize,
    pub smoothing_passes: usize,
    pub raise_attempts: usize,
    pub lower_attempts: usize,
    pub spawn_candidates: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattlefieldData {
    pub seed: u64,
    pub preset: MapPreset,
    pub cell_size: f32,
    pub bounds: Bounds,
    pub grid: Grid,
    pub launcher_nodes: Vec<LauncherNode>,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub wall_segments: Vec<WallSegment>,
    pub open_cell_count: usize,
    pub spawn_count: usize,
    pub report: GenerationReport,
}

impl BattlefieldData {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&GridCell> {
        self.grid.get(GridPos::new(x as i32, y as i32))
    }

    /// Terrain at `pos`, treating anything off-grid as wall buffer.
    pub fn terrain_at(&self, pos: GridPos) -> TerrainType {
        self.grid.get(pos).map_or(TerrainType::BlockedWallBuffer, |cell| cell.terrain)
    }

    pub fn count_terrain(&self, terrain: TerrainType) -> usize {
        self.grid.count_terrain(terrain)
    }

    /// Rock cells in column-major order, for consumers that materialise colliders.
    pub fn blocked_rock_cells(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.grid.iter_columns().filter(|cell| cell.terrain == TerrainType::BlockedRock)
    }

    pub fn launcher_nodes_on(&self, edge: Edge) -> impl Iterator<Item = &LauncherNode> + '_ {
        self.launcher_nodes.iter().filter(move |node| node.edge == edge)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        bytes.push(self.preset.code());
        bytes.extend(self.cell_size.to_le_bytes());
        push_vec2(&mut bytes, self.bounds.center);
        push_vec2(&mut bytes, self.bounds.extents);

        bytes.extend((self.grid.width() as u32).to_le_bytes());
        bytes.extend((self.grid.height() as u32).to_le_bytes());
        for cell in self.grid.cells() {
            bytes.push(cell.terrain.code());
        }

        bytes.extend((self.launcher_nodes.len() as u32).to_le_bytes());
        for node in &self.launcher_nodes {
            bytes.push(node.edge.code());
            push_vec2(&mut bytes, node.position);
            push_vec2(&mut bytes, node.inward_normal);
        }

        bytes.extend((self.enemy_spawns.len() as u32).to_le_bytes());
        for spawn in &self.enemy_spawns {
            bytes.extend(spawn.cell.x.to_le_bytes());
            bytes.extend(spawn.cell.y.to_le_bytes());
            push_vec2(&mut bytes, spawn.position);
        }

        bytes.extend((self.wall_segments.len() as u32).to_le_bytes());
        for wall in &self.wall_segments {
            bytes.push(wall.wall_type.code());
            push_vec2(&mut bytes, wall.center);
            push_vec2(&mut bytes, wall.size);
        }

        bytes.extend((self.open_cell_count as u32).to_le_bytes());
        bytes.extend((self.spawn_count as u32).to_le_bytes());
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_vec2(bytes: &mut Vec<u8>, value: Vec2) {
    bytes.extend(value.x.to_le_bytes());
    bytes.extend(value.y.to_le_bytes());
}
