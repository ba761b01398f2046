//! Generation tuning knobs, their baseline values, and TOML loading.
//!
//! Options files are TOML documents naming any subset of the fields below;
//! missing fields take the baseline value:
//!
//! ```toml
//! cell_size = 1.0
//! complexity = 3
//! spawn_count = 12
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de;

const MIN_LAUNCHER_OFFSET: f32 = 0.01;
const MIN_LAUNCHER_SPACING: f32 = 0.1;

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid options TOML in '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: de::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationOptions {
    /// World units per grid cell.
    pub cell_size: f32,
    /// World-unit depth of the blocked border ring.
    pub wall_buffer: f32,
    pub launcher_node_spacing: f32,
    /// How far outside the bounds launcher nodes sit.
    pub launcher_offset: f32,
    pub wall_thickness: f32,
    pub min_open_cells: usize,
    pub max_open_cells: usize,
    pub spawn_count: usize,
    /// Minimum world distance from the origin for a spawn point.
    pub spawn_distance_from_launcher_exit: f32,
    /// 0..=4. Scales pocket count, rock density and smoothing passes.
    pub complexity: u8,
    /// 0..=3. Scales funnel count and funnel walk jitter.
    pub cohesion: u8,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            wall_buffer: 1.0,
            launcher_node_spacing: 2.0,
            launcher_offset: 1.5,
            wall_thickness: 0.5,
            min_open_cells: 20,
            max_open_cells: 400,
            spawn_count: 8,
            spawn_distance_from_launcher_exit: 3.0,
            complexity: 2,
            cohesion: 1,
        }
    }
}

impl GenerationOptions {
    pub const MAX_COMPLEXITY: u8 = 4;
    pub const MAX_COHESION: u8 = 3;

    pub fn from_toml_str(content: &str) -> Result<Self, de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let content = fs::read_to_string(path)
            .map_err(|source| OptionsError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&content)
            .map_err(|source| OptionsError::Parse { path: path.to_path_buf(), source })
    }

    /// Returns a copy with every numeric field forced into a usable range.
    ///
    /// Open-cell bounds are left alone even when `min_open_cells > max_open_cells`;
    /// the balancer treats them as best-effort targets.
    pub fn sanitized(&self) -> Self {
        let baseline = Self::default();
        Self {
            cell_size: positive_or(self.cell_size, baseline.cell_size),
            wall_buffer: non_negative(self.wall_buffer),
            launcher_node_spacing: positive_or(
                self.launcher_node_spacing,
                baseline.launcher_node_spacing,
            )
            .max(MIN_LAUNCHER_SPACING),
            launcher_offset: if self.launcher_offset.is_finite() {
                self.launcher_offset.max(MIN_LAUNCHER_OFFSET)
            } else {
                baseline.launcher_offset
            },
            wall_thickness: non_negative(self.wall_thickness),
            min_open_cells: self.min_open_cells,
            max_open_cells: self.max_open_cells,
            spawn_count: self.spawn_count,
            spawn_distance_from_launcher_exit: if self
                .spawn_distance_from_launcher_exit
                .is_finite()
            {
                self.spawn_distance_from_launcher_exit
            } else {
                baseline.spawn_distance_from_launcher_exit
            },
            complexity: self.complexity.min(Self::MAX_COMPLEXITY),
            cohesion: self.cohesion.min(Self::MAX_COHESION),
        }
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
