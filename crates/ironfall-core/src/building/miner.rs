use super::Neighborhood;
use crate::fixed::Fixed64;
use crate::item::{Item, ItemKind};
use crate::spatial::{Direction, Footprint, GridPosition};
use crate::tile::TileWorld;
use serde::{Deserialize, Serialize};

/// Items per second contributed by each matching ore tile under a miner.
pub const RATE_PER_TILE: Fixed64 = Fixed64::from_bits(0x4000_0000); // 0.25

/// Extracts ore from the tiles under it into a single-slot buffer.
///
/// The ore kind is fixed at construction: the first ore tile found (row by
/// row from the origin) decides it, and only tiles of that same kind count
/// toward the rate. Other ore kinds under the same footprint are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Miner {
    ore: Option<ItemKind>,
    ore_tiles: u32,
    buffer: Option<Item>,
    timer: Fixed64,
}

impl Miner {
    /// Scan the footprint in `world` and bind to the first ore found.
    pub fn survey(world: &TileWorld, origin: GridPosition, footprint: Footprint) -> Self {
        let mut ore = None;
        let mut ore_tiles = 0;
        for tile in footprint.tiles(origin) {
            let Some(kind) = ItemKind::from_tile(world.tile(tile.x, tile.y)) else {
                continue;
            };
            match ore {
                None => {
                    ore = Some(kind);
                    ore_tiles = 1;
                }
                Some(first) if first == kind => ore_tiles += 1,
                Some(_) => {}
            }
        }
        Self {
            ore,
            ore_tiles,
            buffer: None,
            timer: Fixed64::ZERO,
        }
    }

    /// The ore this miner produces, if any ore was under it.
    pub fn ore(&self) -> Option<ItemKind> {
        self.ore
    }

    /// Number of footprint tiles matching [`Miner::ore`].
    pub fn ore_tiles(&self) -> u32 {
        self.ore_tiles
    }

    /// Items per second.
    pub fn rate(&self) -> Fixed64 {
        RATE_PER_TILE * Fixed64::from_num(self.ore_tiles)
    }

    /// Seconds between items, or `None` for a miner with nothing to mine.
    pub fn interval(&self) -> Option<Fixed64> {
        if self.ore_tiles == 0 {
            return None;
        }
        Some(Fixed64::ONE / self.rate())
    }

    /// The item waiting for an outlet.
    pub fn buffered(&self) -> Option<Item> {
        self.buffer
    }

    /// Time accrued toward the next item.
    pub fn timer(&self) -> Fixed64 {
        self.timer
    }

    /// Hand off a buffered item, then accrue production if the buffer is empty.
    ///
    /// Outlets are the tiles just outside the midpoint of each footprint
    /// edge, tried up, down, left, right; the first conveyor with room wins.
    /// Production time carries its remainder into the next cycle.
    pub fn tick(
        &mut self,
        origin: GridPosition,
        footprint: Footprint,
        dt: Fixed64,
        hood: &mut dyn Neighborhood,
    ) {
        if let Some(item) = self.buffer {
            let delivered = Direction::ALL.into_iter().any(|side| {
                hood.push_to_conveyor(footprint.edge_midpoint(origin, side), item)
                    .is_ok()
            });
            if delivered {
                self.buffer = None;
            }
        }

        if self.buffer.is_some() {
            return;
        }
        let (Some(kind), Some(interval)) = (self.ore, self.interval()) else {
            return;
        };

        self.timer += dt;
        if self.timer >= interval {
            self.timer -= interval;
            self.buffer = Some(Item::new(kind));
        }
    }
}
