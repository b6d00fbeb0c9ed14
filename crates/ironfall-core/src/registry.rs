//! The building registry: placement, lookup, removal, and the tick loop.
//!
//! The registry owns every placed building. Footprints live in a
//! [`SlotMap`] keyed by [`BuildingId`], behavior state in a parallel
//! [`SecondaryMap`], and a [`SpatialIndex`] maps each covered tile back to
//! its building. Placement order is kept separately and drives both update
//! and render order.

use crate::building::{Building, BuildingKind, Conveyor, Core, Miner, Neighborhood, Structure};
use crate::fixed::Fixed64;
use crate::id::BuildingId;
use crate::item::{Inventory, Item};
use crate::spatial::{Footprint, GridPosition, SpatialIndex, TileRect};
use crate::tile::TileWorld;
use slotmap::{SecondaryMap, SlotMap};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("footprint at ({x}, {y}) leaves the world")]
    OutOfBounds { x: i32, y: i32 },
    #[error("tile ({x}, {y}) is already occupied")]
    Occupied { x: i32, y: i32 },
    #[error("the world already has a core")]
    DuplicateCore,
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    origin: GridPosition,
    footprint: Footprint,
}

/// Borrowed view of a placed building.
#[derive(Debug, Clone, Copy)]
pub struct BuildingRef<'a> {
    pub id: BuildingId,
    pub origin: GridPosition,
    pub footprint: Footprint,
    pub structure: &'a Structure,
}

impl BuildingRef<'_> {
    pub fn kind(&self) -> BuildingKind {
        self.structure.kind()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Owns placed buildings and keeps the footprint index consistent with them.
///
/// Invariants:
/// - no two footprints overlap, and every footprint lies inside the world;
/// - every covered tile resolves to the building covering it;
/// - at most one core exists, and once placed it is never removed.
#[derive(Debug, Clone)]
pub struct BuildingRegistry {
    width: u32,
    height: u32,
    placements: SlotMap<BuildingId, Placement>,
    structures: SecondaryMap<BuildingId, Structure>,
    order: Vec<BuildingId>,
    index: SpatialIndex,
    core: Option<BuildingId>,
}

impl BuildingRegistry {
    /// An empty registry for a `width` x `height` world.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            placements: SlotMap::with_key(),
            structures: SecondaryMap::new(),
            order: Vec::new(),
            index: SpatialIndex::new(),
            core: None,
        }
    }

    /// An empty registry sized to `world`.
    pub fn for_world(world: &TileWorld) -> Self {
        Self::new(world.width(), world.height())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn footprint_in_bounds(&self, origin: GridPosition, footprint: Footprint) -> bool {
        origin.x >= 0
            && origin.y >= 0
            && origin.x as i64 + footprint.width as i64 <= self.width as i64
            && origin.y as i64 + footprint.height as i64 <= self.height as i64
    }

    // -- Placement --

    /// Whether a `w` x `h` footprint at `(x, y)` is inside the world and free.
    pub fn can_place(&self, x: i32, y: i32, w: u32, h: u32) -> bool {
        self.check_footprint(GridPosition::new(x, y), Footprint::new(w, h))
            .is_ok()
    }

    fn check_footprint(&self, origin: GridPosition, footprint: Footprint) -> Result<(), PlacementError> {
        if !self.footprint_in_bounds(origin, footprint) {
            return Err(PlacementError::OutOfBounds {
                x: origin.x,
                y: origin.y,
            });
        }
        if let Some(tile) = self.index.first_blocked(origin, footprint) {
            return Err(PlacementError::Occupied {
                x: tile.x,
                y: tile.y,
            });
        }
        Ok(())
    }

    /// Place a building, reporting why it was refused.
    pub fn try_place(&mut self, building: Building) -> Result<BuildingId, PlacementError> {
        let (origin, footprint, structure) = building.into_parts();
        self.check_footprint(origin, footprint)?;
        let is_core = structure.kind() == BuildingKind::Core;
        if is_core && self.core.is_some() {
            return Err(PlacementError::DuplicateCore);
        }

        let id = self.placements.insert(Placement { origin, footprint });
        self.structures.insert(id, structure);
        self.order.push(id);
        self.index.claim(id, origin, footprint);
        if is_core {
            self.core = Some(id);
        }
        Ok(id)
    }

    /// Place a building, or do nothing if the footprint is illegal.
    pub fn place(&mut self, building: Building) -> Option<BuildingId> {
        let kind = building.kind();
        match self.try_place(building) {
            Ok(id) => Some(id),
            Err(err) => {
                log::debug!("refused to place {}: {err}", kind.name());
                None
            }
        }
    }

    /// Place the core centered on `(x, y)`.
    ///
    /// The 4x4 footprint is shifted back inside the world when the center
    /// is too close to an edge. Returns `None` only if a core already
    /// exists, the world is smaller than the core, or the tiles are taken.
    pub fn place_core(&mut self, x: i32, y: i32) -> Option<BuildingId> {
        let size = BuildingKind::Core.footprint();
        let max_x = self.width as i64 - size.width as i64;
        let max_y = self.height as i64 - size.height as i64;
        if max_x < 0 || max_y < 0 {
            log::debug!("world {}x{} cannot fit a core", self.width, self.height);
            return None;
        }
        let ox = (x as i64 - size.width as i64 / 2).clamp(0, max_x) as i32;
        let oy = (y as i64 - size.height as i64 / 2).clamp(0, max_y) as i32;
        self.place(Building::core(ox, oy))
    }

    // -- Removal --

    /// Remove a building. The core is permanent and is never removed.
    ///
    /// Returns `true` if the building was removed.
    pub fn remove(&mut self, id: BuildingId) -> bool {
        if self.core == Some(id) {
            log::debug!("refused to remove the core");
            return false;
        }
        let Some(placement) = self.placements.remove(id) else {
            return false;
        };
        self.structures.remove(id);
        self.order.retain(|&b| b != id);
        self.index.release(id, placement.origin, placement.footprint);
        true
    }

    /// Remove every listed building except the core. Returns how many went.
    pub fn remove_all(&mut self, ids: &[BuildingId]) -> usize {
        ids.iter().filter(|&&id| self.remove(id)).count()
    }

    // -- Lookup --

    /// The building covering tile `(x, y)`.
    pub fn get_at(&self, x: i32, y: i32) -> Option<BuildingId> {
        self.index.occupant(GridPosition::new(x, y))
    }

    pub fn get(&self, id: BuildingId) -> Option<BuildingRef<'_>> {
        let placement = self.placements.get(id)?;
        let structure = self.structures.get(id)?;
        Some(BuildingRef {
            id,
            origin: placement.origin,
            footprint: placement.footprint,
            structure,
        })
    }

    pub fn contains(&self, id: BuildingId) -> bool {
        self.placements.contains_key(id)
    }

    /// Ids in placement order.
    pub fn ids(&self) -> &[BuildingId] {
        &self.order
    }

    /// Buildings in placement order.
    pub fn buildings(&self) -> impl Iterator<Item = BuildingRef<'_>> + '_ {
        self.order.iter().filter_map(|&id| self.get(id))
    }

    /// Buildings whose origin tile lies inside `rect`, in placement order.
    ///
    /// Only the origin counts: a building reaching into the rectangle from
    /// an origin outside it is not included.
    pub fn all_in_rect(&self, rect: TileRect) -> Vec<BuildingId> {
        self.buildings()
            .filter(|b| rect.contains(b.origin))
            .map(|b| b.id)
            .collect()
    }

    /// The first building, in placement order, whose footprint edge `pos`
    /// touches from outside.
    pub fn adjacent_to(&self, pos: GridPosition) -> Option<BuildingRef<'_>> {
        self.buildings()
            .find(|b| b.footprint.entry_direction(b.origin, pos).is_some())
    }

    pub fn core_id(&self) -> Option<BuildingId> {
        self.core
    }

    pub fn core(&self) -> Option<&Core> {
        self.structures.get(self.core?)?.as_core()
    }

    /// The core's tally, if the world has a core.
    pub fn core_inventory(&self) -> Option<&Inventory> {
        self.core().map(Core::inventory)
    }

    pub fn conveyor(&self, id: BuildingId) -> Option<&Conveyor> {
        self.structures.get(id)?.as_conveyor()
    }

    pub fn conveyor_mut(&mut self, id: BuildingId) -> Option<&mut Conveyor> {
        self.structures.get_mut(id)?.as_conveyor_mut()
    }

    pub fn miner(&self, id: BuildingId) -> Option<&Miner> {
        self.structures.get(id)?.as_miner()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of tiles covered by buildings.
    pub fn occupied_tiles(&self) -> usize {
        self.index.tile_count()
    }

    // -- Simulation --

    /// Tick every building once, in placement order.
    ///
    /// Each structure is detached from storage while it runs and sees the
    /// rest of the registry only through a [`Neighborhood`]. Items pushed
    /// into a building that ticks later in the same pass move again this
    /// tick.
    pub fn update(&mut self, dt: Fixed64) {
        for i in 0..self.order.len() {
            let id = self.order[i];
            let Some(&placement) = self.placements.get(id) else {
                continue;
            };
            let Some(mut structure) = self.structures.remove(id) else {
                continue;
            };
            let mut hood = RegistryNeighborhood {
                index: &self.index,
                structures: &mut self.structures,
            };
            structure.tick(placement.origin, placement.footprint, dt, &mut hood);
            self.structures.insert(id, structure);
        }
    }
}

// ---------------------------------------------------------------------------
// Neighborhood implementation
// ---------------------------------------------------------------------------

struct RegistryNeighborhood<'a> {
    index: &'a SpatialIndex,
    structures: &'a mut SecondaryMap<BuildingId, Structure>,
}

impl RegistryNeighborhood<'_> {
    fn structure_at(&mut self, pos: GridPosition) -> Option<&mut Structure> {
        let id = self.index.occupant(pos)?;
        self.structures.get_mut(id)
    }
}

impl Neighborhood for RegistryNeighborhood<'_> {
    fn push_to_conveyor(&mut self, pos: GridPosition, item: Item) -> Result<(), Item> {
        match self.structure_at(pos) {
            Some(Structure::Conveyor(conveyor)) => conveyor.push(item),
            _ => Err(item),
        }
    }

    fn push_to_core(&mut self, pos: GridPosition, item: Item) -> Result<(), Item> {
        match self.structure_at(pos) {
            Some(Structure::Core(core)) => {
                core.accept_item(item);
                Ok(())
            }
            _ => Err(item),
        }
    }
}
