//! High-level battlefield generation entry point.

mod pipeline;

use crate::options::GenerationOptions;
use crate::types::MapPreset;

use super::model::BattlefieldData;

/// Holds the inputs of one generation run. `generate` owns a fresh seeded
/// stream per call, so generators can be shared across threads freely.
#[derive(Clone, Debug, PartialEq)]
pub struct BattlefieldGenerator {
    seed: u64,
    preset: MapPreset,
    options: GenerationOptions,
}

impl BattlefieldGenerator {
    pub fn new(seed: u64, preset: MapPreset) -> Self {
        Self { seed, preset, options: GenerationOptions::default() }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn preset(&self) -> MapPreset {
        self.preset
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn generate(&self) -> BattlefieldData {
        pipeline::generate_battlefield(self.seed, self.preset, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use proptest::prelude::*;

    use super::*;
    use crate::types::{Edge, GridPos, TerrainType, Vec2};

    fn ring_distance(data: &BattlefieldData, pos: GridPos) -> usize {
        let x = pos.x as usize;
        let y = pos.y as usize;
        x.min(y).min(data.width() - 1 - x).min(data.height() - 1 - y)
    }

    fn assert_battlefield_invariants(data: &BattlefieldData, options: &GenerationOptions) {
        assert!(data.width() >= 4 && data.height() >= 4);
        assert_eq!(data.grid.len(), data.width() * data.height());
        assert_eq!(data.open_cell_count, data.grid.count_open());
        assert_eq!(data.wall_segments.len(), 4);

        assert_eq!(data.spawn_count, data.enemy_spawns.len());
        assert_eq!(data.spawn_count, options.spawn_count.min(data.report.spawn_candidates));
        for spawn in &data.enemy_spawns {
            let terrain = data.terrain_at(spawn.cell);
            assert!(terrain.is_clear(), "spawn {spawn:?} on {terrain:?}");
            let distance = spawn.position.distance(Vec2::ZERO);
            assert!(distance > options.spawn_distance_from_launcher_exit, "{spawn:?} too close");
            assert_eq!(data.grid.get(spawn.cell).map(|cell| cell.world_pos), Some(spawn.position));
        }

        for node in &data.launcher_nodes {
            assert!(!data.bounds.contains(node.position), "{node:?} inside bounds");
        }
        let count = |edge| data.launcher_nodes_on(edge).count();
        assert!(count(Edge::Top).abs_diff(count(Edge::Bottom)) <= 1);
        assert!(count(Edge::Left).abs_diff(count(Edge::Right)) <= 1);
    }

    #[test]
    fn same_inputs_produce_byte_identical_battlefields() {
        let a = BattlefieldGenerator::new(123_456, MapPreset::Large).generate();
        let b = BattlefieldGenerator::new(123_456, MapPreset::Large).generate();
        assert_eq!(a, b);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn different_seeds_change_the_terrain() {
        let grids: Vec<_> = (0..8)
            .map(|seed| BattlefieldGenerator::new(seed, MapPreset::Medium).generate().grid)
            .collect();
        for (index, grid) in grids.iter().enumerate() {
            assert!(
                !grids[index + 1..].contains(grid),
                "seed {index} produced the same terrain as a later seed"
            );
        }
    }

    #[test]
    fn concurrent_generation_matches_sequential_generation() {
        let fingerprint =
            |seed| BattlefieldGenerator::new(seed, MapPreset::BossRoom).generate().fingerprint();
        let expected: Vec<u64> = (0..4).map(fingerprint).collect();

        let handles: Vec<_> = (0..4)
            .map(|seed| {
                thread::spawn(move || fingerprint(seed))
            })
            .collect();
        let concurrent: Vec<u64> = handles
            .into_iter()
            .map(|handle| handle.join().expect("generation thread panicked"))
            .collect();

        assert_eq!(expected, concurrent);
    }

    #[test]
    fn wall_buffer_ring_survives_default_generation() {
        for preset in MapPreset::ALL {
            for seed in [1_u64, 7, 99, 2_024] {
                let data = BattlefieldGenerator::new(seed, preset).generate();
                let buffer = data.report.buffer_cells;
                for cell in data.grid.cells() {
                    if ring_distance(&data, cell.pos) < buffer {
                        assert_eq!(
                            cell.terrain,
                            TerrainType::BlockedWallBuffer,
                            "seed={seed} preset={preset} cell={:?}",
                            cell.pos
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn huge_cells_still_yield_a_four_by_four_grid() {
        for preset in MapPreset::ALL {
            let size = preset.nominal_size();
            let options =
                GenerationOptions { cell_size: size.x.min(size.y), ..GenerationOptions::default() };
            let data =
                BattlefieldGenerator::new(5, preset).with_options(options.clone()).generate();
            assert_eq!((data.width(), data.height()), (4, 4));
            assert_battlefield_invariants(&data, &options);
        }
    }

    #[test]
    fn realized_bounds_follow_clamped_cell_counts() {
        let options = GenerationOptions { cell_size: 1.5, ..GenerationOptions::default() };
        let data = BattlefieldGenerator::new(3, MapPreset::Medium).with_options(options).generate();
        assert_eq!((data.width(), data.height()), (13, 8));
        assert_eq!(data.bounds.size(), Vec2::new(19.5, 12.0));
        assert_eq!(data.bounds.center, Vec2::ZERO);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_battlefields_hold_their_invariants(
            seed in any::<u64>(),
            preset_selector in 0_usize..4,
            complexity in 0_u8..=4,
            cohesion in 0_u8..=3,
            spawn_count in 0_usize..24,
        ) {
            let preset = MapPreset::ALL[preset_selector];
            let options = GenerationOptions {
                complexity,
                cohesion,
                spawn_count,
                ..GenerationOptions::default()
            };
            let data =
                BattlefieldGenerator::new(seed, preset).with_options(options.clone()).generate();
            assert_battlefield_invariants(&data, &options);
            prop_assert!(data.report.pockets_carved >= 1);
            prop_assert!(data.report.pockets_carved < 3 + usize::from(complexity));
            prop_assert!(data.report.funnels_carved < 1 + usize::from(cohesion));
        }
    }
}
