//! Placed structures and their per-tick behavior.
//!
//! Behavior is a closed set dispatched via enum match (no trait objects):
//! [`Structure::Core`], [`Structure::Miner`], [`Structure::Conveyor`].
//! A structure never holds a reference to the registry. While it ticks it
//! is handed a [`Neighborhood`], a narrow capability for pushing items onto
//! whatever occupies a neighboring tile.

mod base;
mod conveyor;
mod miner;

pub use self::base::Core;
pub use self::conveyor::{BLOCKED_PROGRESS, Conveyor, MOVE_TIME, MovingItem, SPACING};
pub use self::miner::{Miner, RATE_PER_TILE};

use crate::fixed::Fixed64;
use crate::item::Item;
use crate::spatial::{Direction, Footprint, GridPosition};
use crate::tile::TileWorld;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Neighborhood
// ---------------------------------------------------------------------------

/// What a ticking structure may do to the buildings around it.
///
/// Both methods hand the item back when the tile holds no suitable
/// receiver or the receiver is momentarily full.
pub trait Neighborhood {
    /// Queue `item` on the conveyor covering `pos`, if it has room.
    fn push_to_conveyor(&mut self, pos: GridPosition, item: Item) -> Result<(), Item>;

    /// Deposit `item` into the core covering `pos`.
    fn push_to_core(&mut self, pos: GridPosition, item: Item) -> Result<(), Item>;
}

// ---------------------------------------------------------------------------
// Kinds and structures
// ---------------------------------------------------------------------------

/// Tag for the three structure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Core,
    Miner,
    Conveyor,
}

impl BuildingKind {
    /// Footprint every building of this kind occupies.
    pub fn footprint(self) -> Footprint {
        match self {
            BuildingKind::Core => Footprint::square(4),
            BuildingKind::Miner => Footprint::square(2),
            BuildingKind::Conveyor => Footprint::single(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuildingKind::Core => "core",
            BuildingKind::Miner => "miner",
            BuildingKind::Conveyor => "conveyor",
        }
    }
}

/// Per-kind behavior state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Structure {
    Core(Core),
    Miner(Miner),
    Conveyor(Conveyor),
}

impl Structure {
    pub fn kind(&self) -> BuildingKind {
        match self {
            Structure::Core(_) => BuildingKind::Core,
            Structure::Miner(_) => BuildingKind::Miner,
            Structure::Conveyor(_) => BuildingKind::Conveyor,
        }
    }

    /// Advance this structure by `dt` seconds.
    pub fn tick(
        &mut self,
        origin: GridPosition,
        footprint: Footprint,
        dt: Fixed64,
        hood: &mut dyn Neighborhood,
    ) {
        match self {
            Structure::Core(_) => {}
            Structure::Miner(miner) => miner.tick(origin, footprint, dt, hood),
            Structure::Conveyor(conveyor) => conveyor.tick(origin, dt, hood),
        }
    }

    pub fn as_core(&self) -> Option<&Core> {
        match self {
            Structure::Core(core) => Some(core),
            _ => None,
        }
    }

    pub fn as_miner(&self) -> Option<&Miner> {
        match self {
            Structure::Miner(miner) => Some(miner),
            _ => None,
        }
    }

    pub fn as_conveyor(&self) -> Option<&Conveyor> {
        match self {
            Structure::Conveyor(conveyor) => Some(conveyor),
            _ => None,
        }
    }

    pub fn as_core_mut(&mut self) -> Option<&mut Core> {
        match self {
            Structure::Core(core) => Some(core),
            _ => None,
        }
    }

    pub fn as_conveyor_mut(&mut self) -> Option<&mut Conveyor> {
        match self {
            Structure::Conveyor(conveyor) => Some(conveyor),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// A structure together with where it stands.
///
/// Origin and footprint never change after construction; a building that
/// should move is removed and placed again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    origin: GridPosition,
    footprint: Footprint,
    structure: Structure,
}

impl Building {
    /// A 4x4 core with an empty inventory.
    pub fn core(x: i32, y: i32) -> Self {
        Self {
            origin: GridPosition::new(x, y),
            footprint: BuildingKind::Core.footprint(),
            structure: Structure::Core(Core::new()),
        }
    }

    /// A 2x2 miner bound to the ore found under it in `world`.
    pub fn miner(x: i32, y: i32, world: &TileWorld) -> Self {
        let origin = GridPosition::new(x, y);
        let footprint = BuildingKind::Miner.footprint();
        Self {
            origin,
            footprint,
            structure: Structure::Miner(Miner::survey(world, origin, footprint)),
        }
    }

    /// A 1x1 conveyor facing `direction`.
    pub fn conveyor(x: i32, y: i32, direction: Direction) -> Self {
        Self {
            origin: GridPosition::new(x, y),
            footprint: BuildingKind::Conveyor.footprint(),
            structure: Structure::Conveyor(Conveyor::new(direction)),
        }
    }

    pub fn origin(&self) -> GridPosition {
        self.origin
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    pub fn kind(&self) -> BuildingKind {
        self.structure.kind()
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub(crate) fn into_parts(self) -> (GridPosition, Footprint, Structure) {
        (self.origin, self.footprint, self.structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;
    use crate::tile::TileType;

    #[test]
    fn constructors_use_kind_footprints() {
        let world = TileWorld::filled(8, 8, TileType::Dirt);
        assert_eq!(Building::core(0, 0).footprint(), Footprint::square(4));
        assert_eq!(Building::miner(0, 0, &world).footprint(), Footprint::square(2));
        assert_eq!(
            Building::conveyor(0, 0, Direction::Up).footprint(),
            Footprint::single()
        );
    }

    #[test]
    fn kind_matches_structure() {
        let world = TileWorld::filled(8, 8, TileType::Dirt);
        assert_eq!(Building::core(1, 2).kind(), BuildingKind::Core);
        assert_eq!(Building::miner(1, 2, &world).kind(), BuildingKind::Miner);
        assert_eq!(
            Building::conveyor(1, 2, Direction::Left).kind(),
            BuildingKind::Conveyor
        );
    }

    #[test]
    fn accessors_are_kind_specific() {
        let belt = Building::conveyor(0, 0, Direction::Right);
        assert!(belt.structure().as_conveyor().is_some());
        assert!(belt.structure().as_core().is_none());
        assert!(belt.structure().as_miner().is_none());
    }

    struct Nowhere;

    impl Neighborhood for Nowhere {
        fn push_to_conveyor(&mut self, _pos: GridPosition, item: Item) -> Result<(), Item> {
            Err(item)
        }
        fn push_to_core(&mut self, _pos: GridPosition, item: Item) -> Result<(), Item> {
            Err(item)
        }
    }

    #[test]
    fn core_tick_is_inert() {
        let mut structure = Structure::Core(Core::new());
        structure
            .as_core_mut()
            .unwrap()
            .accept_item(Item::new(ItemKind::Iron));
        let before = structure.clone();
        structure.tick(
            GridPosition::new(0, 0),
            Footprint::square(4),
            Fixed64::ONE,
            &mut Nowhere,
        );
        assert_eq!(structure, before);
    }
}
