//! Flat terrain grid, its sizing rules, and the edge-buffer ring.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::types::{Bounds, GridPos, TerrainType, Vec2};

pub(super) const MIN_GRID_CELLS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub pos: GridPos,
    /// Centre of the cell in world space. Fixed at construction.
    pub world_pos: Vec2,
    pub terrain: TerrainType,
}

/// Row-major cell storage: index `y * width + x`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<GridCell>,
}

impl Grid {
    /// Builds an all-`Open` grid whose cells tile `bounds` from its bottom-left corner.
    pub(super) fn new(width: usize, height: usize, cell_size: f32, bounds: &Bounds) -> Self {
        let bottom_left = bounds.min();
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let offset = Vec2::new((x as f32 + 0.5) * cell_size, (y as f32 + 0.5) * cell_size);
                cells.push(GridCell {
                    pos: GridPos::new(x as i32, y as i32),
                    world_pos: bottom_left + offset,
                    terrain: TerrainType::Open,
                });
            }
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: GridPos) -> usize {
        debug_assert!(self.in_bounds(pos), "{pos:?} outside {}x{}", self.width, self.height);
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    pub fn get(&self, pos: GridPos) -> Option<&GridCell> {
        self.in_bounds(pos).then(|| &self.cells[self.index(pos)])
    }

    /// Panics when `pos` is outside the grid.
    pub fn terrain(&self, pos: GridPos) -> TerrainType {
        self.cells[self.index(pos)].terrain
    }

    pub(super) fn set_terrain(&mut self, pos: GridPos, terrain: TerrainType) {
        let index = self.index(pos);
        self.cells[index].terrain = terrain;
    }

    /// Cells in storage (row-major) order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cells in column-major order: outer loop over `x`, inner over `y`.
    ///
    /// Every stage whose draws or first-match choices depend on scan order uses this.
    pub fn iter_columns(&self) -> impl Iterator<Item = &GridCell> + '_ {
        (0..self.width)
            .flat_map(move |x| (0..self.height).map(move |y| &self.cells[y * self.width + x]))
    }

    pub fn count_open(&self) -> usize {
        self.cells.iter().filter(|cell| cell.terrain.is_open()).count()
    }

    pub fn count_terrain(&self, terrain: TerrainType) -> usize {
        self.cells.iter().filter(|cell| cell.terrain == terrain).count()
    }

    pub(super) fn terrain_snapshot(&self) -> Vec<TerrainType> {
        self.cells.iter().map(|cell| cell.terrain).collect()
    }

    pub(super) fn apply_terrain(&mut self, terrain: &[TerrainType]) {
        debug_assert_eq!(terrain.len(), self.cells.len());
        for (cell, &tag) in self.cells.iter_mut().zip(terrain) {
            cell.terrain = tag;
        }
    }

    /// Breadth-first 4-connected region of `terrain` containing `start`.
    ///
    /// Returns an empty list when `start` itself is not `terrain`. The visited
    /// set lives only for this call.
    pub(super) fn flood_region(&self, start: GridPos, terrain: TerrainType) -> Vec<GridPos> {
        let mut region = Vec::new();
        let mut seen = vec![false; self.cells.len()];
        let mut open = VecDeque::from([start]);

        while let Some(pos) = open.pop_front() {
            if !self.in_bounds(pos) {
                continue;
            }
            let index = self.index(pos);
            if seen[index] {
                continue;
            }
            seen[index] = true;
            if self.cells[index].terrain != terrain {
                continue;
            }
            region.push(pos);
            for step in [GridPos::UP, GridPos::DOWN, GridPos::LEFT, GridPos::RIGHT] {
                open.push_back(pos + step);
            }
        }

        region
    }
}

/// Cells per axis for a world size: `floor(world / cell_size)`, at least 4.
pub(super) fn grid_dimensions(world_size: Vec2, cell_size: f32) -> (usize, usize) {
    let cells = |world: f32| ((world / cell_size).floor().max(0.0) as usize).max(MIN_GRID_CELLS);
    (cells(world_size.x), cells(world_size.y))
}

/// Depth of the blocked border ring in cells, at least 1. Halves round to even.
pub(super) fn buffer_cell_count(wall_buffer: f32, cell_size: f32) -> usize {
    ((wall_buffer / cell_size).round_ties_even().max(0.0) as usize).max(1)
}

pub(super) fn mark_edge_buffer(grid: &mut Grid, buffer_cells: usize) {
    let (width, height) = (grid.width, grid.height);
    for cell in &mut grid.cells {
        let x = cell.pos.x as usize;
        let y = cell.pos.y as usize;
        if x < buffer_cells
            || y < buffer_cells
            || x + buffer_cells >= width
            || y + buffer_cells >= height
        {
            cell.terrain = TerrainType::BlockedWallBuffer;
        }
    }
}
