//! Deterministic battlefield generation split into one module per stage.
//!
//! Stage order is fixed and every stage draws from the same seeded stream:
//! grid and edge buffer, launcher nodes, pockets and funnels, rock noise and
//! smoothing, open-cell balancing, spawn selection, then boundary walls.

pub mod grid;
pub mod model;

mod balance;
mod generator;
mod launchers;
mod layout;
mod noise;
mod seed;
mod spawns;
mod walls;

use crate::options::GenerationOptions;
use crate::types::{MapPreset, Vec2};

pub use generator::BattlefieldGenerator;
pub use grid::{Grid, GridCell};
pub use model::{BattlefieldData, EnemySpawn, GenerationReport, LauncherNode, WallSegment};

/// Attempt cap per direction for the open-cell balancer.
pub const MAX_BALANCE_ATTEMPTS: usize = balance::MAX_BALANCE_ATTEMPTS;

pub fn generate(seed: u64, preset: MapPreset, options: &GenerationOptions) -> BattlefieldData {
    BattlefieldGenerator::new(seed, preset).with_options(options.clone()).generate()
}

/// Nominal world size of `preset`; the realized bounds snap to whole cells.
pub fn preset_size(preset: MapPreset) -> Vec2 {
    preset.nominal_size()
}
