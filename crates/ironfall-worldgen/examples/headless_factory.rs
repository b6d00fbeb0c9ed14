//! Headless factory: generate a world, mine the nearest ore, and watch the
//! core fill up.
//!
//! Takes an optional RON/TOML/JSON world config path; without one the
//! classic 480x270 map is generated from seed 2024.
//!
//! Run with: `cargo run -p ironfall-worldgen --example headless_factory [config]`

use ironfall_core::building::Building;
use ironfall_core::fixed::frame_dt;
use ironfall_core::spatial::GridPosition;
use ironfall_placement::{AxisOrder, PathPlanner, miner_site_ok, place_conveyor_path};
use ironfall_worldgen::{ConfigError, WorldConfig, generate_world};
use std::path::Path;

fn main() -> Result<(), ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => WorldConfig::load(Path::new(&path))?,
        None => WorldConfig {
            seed: 2024,
            ..WorldConfig::default()
        },
    };

    let mut generated = generate_world(&config);
    let world = &generated.world;
    let registry = &mut generated.registry;
    let Some(core) = registry
        .core_id()
        .and_then(|id| registry.get(id))
        .map(|b| b.origin)
    else {
        println!("no room for a core on a {}x{} map", world.width(), world.height());
        return Ok(());
    };
    println!(
        "world {}x{} seed {}: core at ({}, {}), site score {:?}",
        world.width(),
        world.height(),
        config.seed,
        core.x,
        core.y,
        generated.report.score
    );

    // --- Three miners west of the core, each belted into it ---

    let target = GridPosition::new(core.x + 1, core.y + 1);
    for _ in 0..3 {
        let site = (0..world.height() as i32 - 1)
            .flat_map(|y| (0..core.x - 3).map(move |x| GridPosition::new(x, y)))
            .filter(|p| miner_site_ok(world, registry, p.x, p.y))
            .min_by_key(|p| p.manhattan_distance(&core));
        let Some(site) = site else {
            println!("no more ore west of the core");
            break;
        };
        registry.place(Building::miner(site.x, site.y, world));

        let outlet = GridPosition::new(site.x + 2, site.y + 1);
        let steps = PathPlanner::new(registry).plan(outlet, target, AxisOrder::HorizontalFirst);
        let belts = place_conveyor_path(registry, &steps);
        println!(
            "miner at ({}, {}) -> {} of {} belts placed",
            site.x,
            site.y,
            belts.len(),
            steps.len()
        );
    }

    // --- Simulate two minutes at 60 fps ---

    let dt = frame_dt(60);
    for second in 1..=120 {
        for _ in 0..60 {
            registry.update(dt);
        }
        if second % 30 == 0 {
            let total = registry.core_inventory().map_or(0, |inv| inv.total());
            println!("t = {second:>3}s: {total} items delivered");
        }
    }

    if let Some(inventory) = registry.core_inventory() {
        println!("\ncore inventory:\n{}", inventory.summary());
    }
    Ok(())
}
