//! Ghost validity checks and batch placement.

use crate::path::PathStep;
use ironfall_core::building::{Building, BuildingKind};
use ironfall_core::id::BuildingId;
use ironfall_core::item::ItemKind;
use ironfall_core::registry::BuildingRegistry;
use ironfall_core::spatial::GridPosition;
use ironfall_core::tile::TileWorld;

/// Whether a miner may stand with its origin at `(x, y)`.
///
/// The 2x2 footprint must be free and inside the world, cover at least one
/// ore tile, and not mix two different ores.
pub fn miner_site_ok(world: &TileWorld, registry: &BuildingRegistry, x: i32, y: i32) -> bool {
    let footprint = BuildingKind::Miner.footprint();
    if !registry.can_place(x, y, footprint.width, footprint.height) {
        return false;
    }
    let mut ore: Option<ItemKind> = None;
    for tile in footprint.tiles(GridPosition::new(x, y)) {
        if let Some(kind) = ItemKind::from_tile(world.tile(tile.x, tile.y)) {
            match ore {
                None => ore = Some(kind),
                Some(seen) if seen != kind => return false,
                Some(_) => {}
            }
        }
    }
    ore.is_some()
}

/// Place a miner at `(x, y)` if [`miner_site_ok`] allows it.
pub fn place_miner(world: &TileWorld, registry: &mut BuildingRegistry, x: i32, y: i32) -> Option<BuildingId> {
    if !miner_site_ok(world, registry, x, y) {
        log::debug!("no valid miner site at ({x}, {y})");
        return None;
    }
    registry.place(Building::miner(x, y, world))
}

/// Whether a core ghost centered on the cursor tile `(cx, cy)` fits.
///
/// Unlike [`BuildingRegistry::place_core`] the ghost is not shifted back
/// inside the world; a cursor too close to an edge is simply invalid.
pub fn core_site_ok(registry: &BuildingRegistry, cx: i32, cy: i32) -> bool {
    let footprint = BuildingKind::Core.footprint();
    registry.core_id().is_none()
        && registry.can_place(cx - 2, cy - 2, footprint.width, footprint.height)
}

/// Place one conveyor per step. Occupied tiles are skipped.
///
/// Returns the ids of the conveyors actually placed, in step order.
pub fn place_conveyor_path(registry: &mut BuildingRegistry, steps: &[PathStep]) -> Vec<BuildingId> {
    let placed: Vec<BuildingId> = steps
        .iter()
        .filter_map(|s| registry.place(Building::conveyor(s.pos.x, s.pos.y, s.direction)))
        .collect();
    if placed.len() < steps.len() {
        log::debug!(
            "placed {} of {} planned conveyors",
            placed.len(),
            steps.len()
        );
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{AxisOrder, PathPlanner};
    use ironfall_core::spatial::Direction;
    use ironfall_core::test_utils::*;
    use ironfall_core::tile::TileType;

    #[test]
    fn miner_needs_ore() {
        let world = dirt_world(10, 10);
        let reg = BuildingRegistry::for_world(&world);
        assert!(!miner_site_ok(&world, &reg, 2, 2));
    }

    #[test]
    fn miner_accepts_single_ore_kind() {
        let world = world_with_ore(10, 10, TileType::Iron, &[(2, 2), (3, 3)]);
        let reg = BuildingRegistry::for_world(&world);
        assert!(miner_site_ok(&world, &reg, 2, 2));
        assert!(miner_site_ok(&world, &reg, 3, 3));
    }

    #[test]
    fn miner_rejects_mixed_ore() {
        let mut world = world_with_ore(10, 10, TileType::Iron, &[(2, 2)]);
        world.set_tile(3, 3, TileType::Copper);
        let reg = BuildingRegistry::for_world(&world);
        assert!(!miner_site_ok(&world, &reg, 2, 2));
    }

    #[test]
    fn stone_does_not_count_or_mix() {
        let mut world = world_with_ore(10, 10, TileType::Coal, &[(2, 2)]);
        world.set_tile(3, 2, TileType::Stone);
        let reg = BuildingRegistry::for_world(&world);
        assert!(miner_site_ok(&world, &reg, 2, 2));
    }

    #[test]
    fn miner_rejects_occupied_or_outside() {
        let world = world_with_ore(10, 10, TileType::Coal, &[(0, 0), (9, 9)]);
        let mut reg = BuildingRegistry::for_world(&world);
        reg.place(Building::conveyor(1, 1, Direction::Up)).unwrap();
        assert!(!miner_site_ok(&world, &reg, 0, 0));
        assert!(!miner_site_ok(&world, &reg, 9, 9));
        assert_eq!(place_miner(&world, &mut reg, 0, 0), None);
    }

    #[test]
    fn place_miner_binds_ore() {
        let world = world_with_ore(10, 10, TileType::Copper, &[(5, 5), (6, 5)]);
        let mut reg = BuildingRegistry::for_world(&world);
        let id = place_miner(&world, &mut reg, 5, 5).unwrap();
        let miner = reg.miner(id).unwrap();
        assert_eq!(miner.ore(), Some(ItemKind::Copper));
        assert_eq!(miner.ore_tiles(), 2);
    }

    #[test]
    fn core_ghost_is_centered_and_unclamped() {
        let mut reg = BuildingRegistry::new(20, 20);
        assert!(core_site_ok(&reg, 10, 10));
        assert!(!core_site_ok(&reg, 1, 10));
        assert!(core_site_ok(&reg, 2, 2));
        assert!(!core_site_ok(&reg, 19, 19));

        reg.place(Building::conveyor(9, 9, Direction::Up)).unwrap();
        assert!(!core_site_ok(&reg, 10, 10));
    }

    #[test]
    fn core_ghost_invalid_once_core_exists() {
        let mut reg = BuildingRegistry::new(20, 20);
        reg.place_core(4, 4).unwrap();
        assert!(!core_site_ok(&reg, 14, 14));
    }

    #[test]
    fn path_skips_occupied_tiles() {
        let mut reg = BuildingRegistry::new(16, 16);
        let blocker = reg.place(Building::conveyor(3, 1, Direction::Down)).unwrap();
        let steps = PathPlanner::new(&reg).plan(
            GridPosition::new(1, 1),
            GridPosition::new(5, 1),
            AxisOrder::HorizontalFirst,
        );
        let placed = place_conveyor_path(&mut reg, &steps);
        assert_eq!(placed.len(), 4);
        assert_eq!(reg.get_at(3, 1), Some(blocker));
        assert_eq!(reg.conveyor(blocker).unwrap().direction(), Direction::Down);
    }
}
