//! Ore and stone veins grown by random walk.

use crate::config::VeinSpec;
use ironfall_core::rng::SimRng;
use ironfall_core::tile::{TileType, TileWorld};

/// Paint `tile` at `(x, y)` if the tile there is still dirt or sand.
///
/// Returns whether the tile changed.
pub fn paint_if_base(world: &mut TileWorld, x: i32, y: i32, tile: TileType) -> bool {
    if world.tile(x, y).is_base_terrain() {
        world.set_tile(x, y, tile);
        true
    } else {
        false
    }
}

/// One random walk of `length` steps from `(x, y)`.
///
/// Each step paints the current tile (base terrain only), then moves one
/// tile in a uniformly chosen direction, clamped to the world. Returns the
/// number of tiles painted.
pub fn walk_vein(
    world: &mut TileWorld,
    rng: &mut SimRng,
    tile: TileType,
    start: (i32, i32),
    length: u32,
) -> u32 {
    let max_x = world.width() as i32 - 1;
    let max_y = world.height() as i32 - 1;
    let (mut x, mut y) = start;
    let mut painted = 0;

    for _ in 0..length {
        if paint_if_base(world, x, y, tile) {
            painted += 1;
        }
        match rng.next_below(4) {
            0 => x += 1,
            1 => x -= 1,
            2 => y += 1,
            _ => y -= 1,
        }
        x = x.clamp(0, max_x.max(0));
        y = y.clamp(0, max_y.max(0));
    }
    painted
}

/// Run every walk of one vein spec. Returns the number of tiles painted.
pub fn grow_vein(world: &mut TileWorld, rng: &mut SimRng, spec: &VeinSpec) -> u32 {
    let mut painted = 0;
    for _ in 0..spec.seeds {
        let x = rng.next_below(world.width()) as i32;
        let y = rng.next_below(world.height()) as i32;
        painted += walk_vein(world, rng, spec.tile, (x, y), spec.length);
    }
    log::trace!(
        "{} vein: {} walks painted {painted} tiles",
        spec.tile.name(),
        spec.seeds
    );
    painted
}
