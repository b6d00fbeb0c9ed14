//! Read-only query API for the presentation layer.
//!
//! Snapshots are owned copies: a renderer or HUD can hold them across a
//! tick without borrowing the registry.

use crate::building::{BuildingKind, MovingItem, Structure};
use crate::fixed::Fixed64;
use crate::id::BuildingId;
use crate::item::{Inventory, Item, ItemKind};
use crate::registry::BuildingRegistry;
use crate::spatial::{Direction, Footprint, GridPosition};

// ---------------------------------------------------------------------------
// Building snapshot
// ---------------------------------------------------------------------------

/// Owned view of one placed building.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingSnapshot {
    pub id: BuildingId,
    pub kind: BuildingKind,
    pub origin: GridPosition,
    pub footprint: Footprint,
    /// Per-kind state.
    pub detail: SnapshotDetail,
}

/// The kind-specific part of a [`BuildingSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotDetail {
    Core {
        inventory: Inventory,
    },
    Miner {
        /// Ore kind the miner produces, `None` if it stands on no ore.
        ore: Option<ItemKind>,
        ore_tiles: u32,
        /// Finished item waiting for an outlet.
        buffered: Option<Item>,
        /// Production progress in seconds.
        timer: Fixed64,
    },
    Conveyor {
        direction: Direction,
        /// Head first.
        items: Vec<MovingItem>,
        anim_phase: Fixed64,
    },
}

impl BuildingSnapshot {
    /// Facing, for conveyors.
    pub fn direction(&self) -> Option<Direction> {
        match &self.detail {
            SnapshotDetail::Conveyor { direction, .. } => Some(*direction),
            _ => None,
        }
    }

    /// Items currently held: queued on a belt or buffered in a miner.
    pub fn items_held(&self) -> usize {
        match &self.detail {
            SnapshotDetail::Core { .. } => 0,
            SnapshotDetail::Miner { buffered, .. } => usize::from(buffered.is_some()),
            SnapshotDetail::Conveyor { items, .. } => items.len(),
        }
    }
}

fn detail_of(structure: &Structure) -> SnapshotDetail {
    match structure {
        Structure::Core(core) => SnapshotDetail::Core {
            inventory: core.inventory().clone(),
        },
        Structure::Miner(miner) => SnapshotDetail::Miner {
            ore: miner.ore(),
            ore_tiles: miner.ore_tiles(),
            buffered: miner.buffered(),
            timer: miner.timer(),
        },
        Structure::Conveyor(conveyor) => SnapshotDetail::Conveyor {
            direction: conveyor.direction(),
            items: conveyor.items().to_vec(),
            anim_phase: conveyor.anim_phase(),
        },
    }
}

impl BuildingRegistry {
    /// Snapshot one building, or `None` if `id` is not placed.
    pub fn snapshot(&self, id: BuildingId) -> Option<BuildingSnapshot> {
        let building = self.get(id)?;
        Some(BuildingSnapshot {
            id,
            kind: building.kind(),
            origin: building.origin,
            footprint: building.footprint,
            detail: detail_of(building.structure),
        })
    }

    /// Snapshot every building in placement order.
    pub fn snapshot_all(&self) -> Vec<BuildingSnapshot> {
        self.ids()
            .iter()
            .filter_map(|&id| self.snapshot(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::Building;
    use crate::tile::{TileType, TileWorld};

    #[test]
    fn snapshot_all_follows_placement_order() {
        let mut world = TileWorld::filled(16, 16, TileType::Dirt);
        world.set_tile(2, 2, TileType::Iron);
        let mut reg = BuildingRegistry::for_world(&world);
        let belt = reg.place(Building::conveyor(8, 8, Direction::Down)).unwrap();
        let miner = reg.place(Building::miner(2, 2, &world)).unwrap();
        let core = reg.place(Building::core(10, 10)).unwrap();

        let snaps = reg.snapshot_all();
        let ids: Vec<_> = snaps.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![belt, miner, core]);

        assert_eq!(snaps[0].direction(), Some(Direction::Down));
        assert_eq!(snaps[1].kind, BuildingKind::Miner);
        match &snaps[1].detail {
            SnapshotDetail::Miner { ore, ore_tiles, .. } => {
                assert_eq!(*ore, Some(ItemKind::Iron));
                assert_eq!(*ore_tiles, 1);
            }
            other => panic!("expected miner detail, got {other:?}"),
        }
        assert_eq!(snaps[2].footprint, Footprint::square(4));
        assert_eq!(snaps[2].direction(), None);
    }

    #[test]
    fn snapshot_is_detached_from_later_ticks() {
        let mut reg = BuildingRegistry::new(8, 8);
        let belt = reg.place(Building::conveyor(0, 0, Direction::Right)).unwrap();
        reg.conveyor_mut(belt)
            .unwrap()
            .push(Item::new(ItemKind::Coal))
            .unwrap();

        let before = reg.snapshot(belt).unwrap();
        reg.update(Fixed64::from_num(0.1));
        let after = reg.snapshot(belt).unwrap();

        assert_eq!(before.items_held(), 1);
        assert_ne!(before, after);
    }

    #[test]
    fn snapshot_of_removed_building_is_none() {
        let mut reg = BuildingRegistry::new(8, 8);
        let belt = reg.place(Building::conveyor(0, 0, Direction::Right)).unwrap();
        reg.remove(belt);
        assert!(reg.snapshot(belt).is_none());
    }
}
