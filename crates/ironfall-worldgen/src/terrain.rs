//! Base terrain pass.

use ironfall_core::fixed::Fixed64;
use ironfall_core::rng::SimRng;
use ironfall_core::tile::{TileType, TileWorld};

/// Overwrite every tile with dirt (probability `dirt_chance`) or sand.
///
/// Tiles are drawn row by row, bottom row first, so a seed always yields
/// the same pattern.
pub fn paint_terrain(world: &mut TileWorld, rng: &mut SimRng, dirt_chance: Fixed64) {
    for y in 0..world.height() as i32 {
        for x in 0..world.width() as i32 {
            let tile = if rng.chance(dirt_chance) {
                TileType::Dirt
            } else {
                TileType::Sand
            };
            world.set_tile(x, y, tile);
        }
    }
}
