//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::building::Building;
use crate::fixed::{Fixed64, frame_dt};
use crate::id::BuildingId;
use crate::item::{Item, ItemKind};
use crate::registry::BuildingRegistry;
use crate::spatial::Direction;
use crate::tile::{TileType, TileWorld};

// ===========================================================================
// Fixed-point helpers
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// One frame at 60 fps.
pub fn frame() -> Fixed64 {
    frame_dt(60)
}

// ===========================================================================
// Items
// ===========================================================================

pub fn coal() -> Item {
    Item::new(ItemKind::Coal)
}

pub fn iron() -> Item {
    Item::new(ItemKind::Iron)
}

pub fn copper() -> Item {
    Item::new(ItemKind::Copper)
}

// ===========================================================================
// Worlds
// ===========================================================================

/// A `width` x `height` world of dirt.
pub fn dirt_world(width: u32, height: u32) -> TileWorld {
    TileWorld::filled(width, height, TileType::Dirt)
}

/// A dirt world with `ore` painted on each listed tile.
pub fn world_with_ore(width: u32, height: u32, ore: TileType, tiles: &[(i32, i32)]) -> TileWorld {
    let mut world = dirt_world(width, height);
    for &(x, y) in tiles {
        world.set_tile(x, y, ore);
    }
    world
}

// ===========================================================================
// Factories
// ===========================================================================

/// Place a straight run of `len` conveyors starting at `(x, y)`, all facing
/// `direction` and laid out along it.
pub fn belt_line(
    registry: &mut BuildingRegistry,
    x: i32,
    y: i32,
    direction: Direction,
    len: u32,
) -> Vec<BuildingId> {
    let (dx, dy) = direction.offset();
    (0..len as i32)
        .filter_map(|i| registry.place(Building::conveyor(x + dx * i, y + dy * i, direction)))
        .collect()
}

/// Tick the registry at 60 fps for `seconds` of simulated time.
pub fn run_for(registry: &mut BuildingRegistry, seconds: u32) {
    let dt = frame();
    for _ in 0..seconds * 60 {
        registry.update(dt);
    }
}

/// Items on every conveyor plus buffered miner items plus the core tally.
pub fn items_in_play(registry: &BuildingRegistry) -> u32 {
    registry
        .buildings()
        .map(|b| {
            let s = b.structure;
            if let Some(belt) = s.as_conveyor() {
                belt.len() as u32
            } else if let Some(miner) = s.as_miner() {
                u32::from(miner.buffered().is_some())
            } else if let Some(core) = s.as_core() {
                core.inventory().total()
            } else {
                0
            }
        })
        .sum()
}
