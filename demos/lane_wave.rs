//! Route four border spawners to the center of a seeded random world.
//!
//! Run: cargo run --bin lane-wave -- [seed] [obstacles]
//! Set `RUST_LOG=lane_paths=debug` to see search classification.

use lane_demos::{WaveScenario, render};
use lane_paths::SearchConfig;
use log::info;

const BOUNDS: f64 = 16.0;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let obstacles = args.next().and_then(|s| s.parse().ok()).unwrap_or(40);

    let scenario = WaveScenario::generate(seed, BOUNDS, obstacles);
    info!(
        "seed {seed}: placed {} of {obstacles} obstacles",
        scenario.colliders.len()
    );

    let config = SearchConfig::default();
    if let Some(region) = scenario
        .colliders
        .last()
        .and_then(|c| scenario.invalidation_region(c, &config, 1))
    {
        info!("last obstacle invalidates {} cells: {region}", region.len());
    }

    for lane in scenario.route_all(&config) {
        println!(
            "spawner {} -> {}: {}, {} visited, {} points, length {:.2}",
            lane.spawner,
            scenario.target,
            lane.result.state(),
            lane.result.visited(),
            lane.result.points().len(),
            lane.result.length()
        );
        if let Some(grid) = &lane.grid {
            println!("{}", render(grid, &lane.result));
        }
    }
}
