use anyhow::{Result, ensure};
use battlegen::{BattlefieldData, Edge, GenerationOptions, MapPreset, TerrainType, generate};
use clap::Parser;
use env_logger::{Builder, Env};
use log::debug;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    count: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_options(rng: &mut ChaCha8Rng) -> GenerationOptions {
    GenerationOptions {
        complexity: choose(rng, &[0, 1, 2, 3, 4]),
        cohesion: choose(rng, &[0, 1, 2, 3]),
        spawn_count: choose(rng, &[0, 1, 8, 32]),
        wall_buffer: choose(rng, &[0.5, 1.0, 2.0]),
        ..GenerationOptions::default()
    }
}

fn check_invariants(data: &BattlefieldData, options: &GenerationOptions) -> Result<()> {
    let seed = data.seed;
    ensure!(data.width() >= 4 && data.height() >= 4, "seed {seed}: grid below 4x4");
    ensure!(data.wall_segments.len() == 4, "seed {seed}: expected four walls");
    ensure!(
        data.open_cell_count == data.grid.count_open(),
        "seed {seed}: open cell count out of sync"
    );

    let buffer = data.report.buffer_cells;
    for cell in data.grid.cells() {
        let (x, y) = (cell.pos.x as usize, cell.pos.y as usize);
        let ring = x.min(y).min(data.width() - 1 - x).min(data.height() - 1 - y);
        // Deep buffers can be overrun by pockets; only the outer two rings are guaranteed.
        if ring < buffer.min(2) {
            ensure!(
                cell.terrain == TerrainType::BlockedWallBuffer,
                "seed {seed}: buffer cell {:?} retagged as {:?}",
                cell.pos,
                cell.terrain
            );
        }
    }

    let min_distance = options.spawn_distance_from_launcher_exit;
    for spawn in &data.enemy_spawns {
        ensure!(data.terrain_at(spawn.cell).is_clear(), "seed {seed}: spawn on blocked ground");
        ensure!(spawn.position.length() > min_distance, "seed {seed}: spawn too close to centre");
    }
    ensure!(
        data.spawn_count == options.spawn_count.min(data.report.spawn_candidates),
        "seed {seed}: spawn count {} does not match candidates",
        data.spawn_count
    );

    let on = |edge| data.launcher_nodes_on(edge).count();
    ensure!(on(Edge::Top).abs_diff(on(Edge::Bottom)) <= 1, "seed {seed}: top/bottom asymmetry");
    ensure!(on(Edge::Left).abs_diff(on(Edge::Right)) <= 1, "seed {seed}: left/right asymmetry");
    for node in &data.launcher_nodes {
        ensure!(!data.bounds.contains(node.position), "seed {seed}: launcher inside bounds");
    }

    Ok(())
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} battlefields...", args.seed, args.count);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for _ in 0..args.count {
        let seed = rng.next_u64();
        let preset = choose(&mut rng, &MapPreset::ALL);
        let options = random_options(&mut rng);

        let data = generate(seed, preset, &options);
        check_invariants(&data, &options)?;

        let again = generate(seed, preset, &options);
        ensure!(data.fingerprint() == again.fingerprint(), "seed {seed}: generation not repeatable");
        debug!("seed={seed} preset={preset} fingerprint={:016x}", data.fingerprint());
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
