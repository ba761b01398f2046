pub mod mapgen;
pub mod options;
pub mod types;

pub use mapgen::{
    BattlefieldData, BattlefieldGenerator, EnemySpawn, GenerationReport, Grid, GridCell,
    LauncherNode, WallSegment, generate, preset_size,
};
pub use options::{GenerationOptions, OptionsError};
pub use types::*;
