//! Conveyor drag-to-path planning.
//!
//! A drag from a start tile to an end tile becomes an L-shaped Manhattan
//! walk: one axis is walked fully to alignment, then the other. Each tile
//! then gets a facing so the chain carries items from start to end, and the
//! last tile turns to feed any building it touches.

use ironfall_core::registry::BuildingRegistry;
use ironfall_core::spatial::{Direction, Footprint, GridPosition};
use serde::{Deserialize, Serialize};

// ===========================================================================
// Axis order
// ===========================================================================

/// Which axis the walk covers first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrder {
    HorizontalFirst,
    VerticalFirst,
}

impl AxisOrder {
    /// Horizontal-first unless the displacement is strictly more vertical.
    pub fn from_displacement(dx: i32, dy: i32) -> Self {
        if dx.unsigned_abs() >= dy.unsigned_abs() {
            AxisOrder::HorizontalFirst
        } else {
            AxisOrder::VerticalFirst
        }
    }
}

/// Locks the axis order of a drag on its first move away from the start.
///
/// Later movement never changes the order, so a belt dragged right and
/// then far up stays horizontal-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragAxisLock {
    start: GridPosition,
    order: Option<AxisOrder>,
}

impl DragAxisLock {
    pub fn new(start: GridPosition) -> Self {
        Self { start, order: None }
    }

    pub fn start(&self) -> GridPosition {
        self.start
    }

    /// Feed the tile under the cursor. Returns the order once locked.
    pub fn observe(&mut self, pos: GridPosition) -> Option<AxisOrder> {
        if self.order.is_none() && pos != self.start {
            self.order = Some(AxisOrder::from_displacement(
                pos.x - self.start.x,
                pos.y - self.start.y,
            ));
        }
        self.order
    }

    pub fn is_locked(&self) -> bool {
        self.order.is_some()
    }

    /// The locked order, or horizontal-first if the cursor never moved.
    pub fn order(&self) -> AxisOrder {
        self.order.unwrap_or(AxisOrder::HorizontalFirst)
    }
}

// ===========================================================================
// Walk
// ===========================================================================

/// Tiles from `start` to `end` inclusive, first axis fully, then the other.
pub fn walk(start: GridPosition, end: GridPosition, order: AxisOrder) -> Vec<GridPosition> {
    let mut path = Vec::with_capacity(start.manhattan_distance(&end) as usize + 1);
    let mut cur = start;

    let along_x = |cur: &mut GridPosition, path: &mut Vec<GridPosition>| {
        while cur.x != end.x {
            path.push(*cur);
            cur.x += (end.x - cur.x).signum();
        }
    };
    let along_y = |cur: &mut GridPosition, path: &mut Vec<GridPosition>| {
        while cur.y != end.y {
            path.push(*cur);
            cur.y += (end.y - cur.y).signum();
        }
    };

    match order {
        AxisOrder::HorizontalFirst => {
            along_x(&mut cur, &mut path);
            along_y(&mut cur, &mut path);
        }
        AxisOrder::VerticalFirst => {
            along_y(&mut cur, &mut path);
            along_x(&mut cur, &mut path);
        }
    }
    path.push(end);
    path
}

/// The tile just outside the side of a footprint that faces `from`, at the
/// side's midpoint.
///
/// The side is picked by comparing the offset of `from` to the footprint's
/// center on each axis; equal offsets pick the top or bottom side.
pub fn best_entry(origin: GridPosition, footprint: Footprint, from: GridPosition) -> GridPosition {
    let w = footprint.width as i32;
    let h = footprint.height as i32;
    // Doubled so the center stays integral for even sizes.
    let dx2 = 2 * from.x - (2 * origin.x + w);
    let dy2 = 2 * from.y - (2 * origin.y + h);

    if dx2.abs() > dy2.abs() {
        let y = origin.y + h / 2;
        if dx2 < 0 {
            GridPosition::new(origin.x - 1, y)
        } else {
            GridPosition::new(origin.x + w, y)
        }
    } else {
        let x = origin.x + w / 2;
        if dy2 < 0 {
            GridPosition::new(x, origin.y - 1)
        } else {
            GridPosition::new(x, origin.y + h)
        }
    }
}

// ===========================================================================
// Planner
// ===========================================================================

/// One planned conveyor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    pub pos: GridPosition,
    pub direction: Direction,
}

/// Plans conveyor chains against the buildings already placed.
#[derive(Debug, Clone, Copy)]
pub struct PathPlanner<'a> {
    registry: &'a BuildingRegistry,
}

impl<'a> PathPlanner<'a> {
    pub fn new(registry: &'a BuildingRegistry) -> Self {
        Self { registry }
    }

    /// Where a drag ending on `end` actually ends: a drag released over a
    /// building is retargeted to that building's best entry tile.
    pub fn snap_end(&self, start: GridPosition, end: GridPosition) -> GridPosition {
        match self.registry.get_at(end.x, end.y).and_then(|id| self.registry.get(id)) {
            Some(target) => best_entry(target.origin, target.footprint, start),
            None => end,
        }
    }

    /// The tile path of a drag, with the end snapped.
    pub fn tiles(&self, start: GridPosition, end: GridPosition, order: AxisOrder) -> Vec<GridPosition> {
        walk(start, self.snap_end(start, end), order)
    }

    /// Facing of the conveyor at `path[i]`.
    ///
    /// The last tile points into a building whose edge it touches, if any.
    /// Otherwise a lone tile faces right, the last tile continues the
    /// previous step, and every other tile points at its successor.
    pub fn direction_at(&self, path: &[GridPosition], i: usize) -> Direction {
        let current = path[i];
        let last = i + 1 == path.len();

        if last {
            let feeding = self
                .registry
                .adjacent_to(current)
                .and_then(|b| b.footprint.entry_direction(b.origin, current));
            if let Some(dir) = feeding {
                return dir;
            }
        }

        if path.len() == 1 {
            Direction::Right
        } else if last {
            Direction::toward(path[i - 1], current)
        } else {
            Direction::toward(current, path[i + 1])
        }
    }

    /// Plan a full chain: tiles plus facings.
    pub fn plan(&self, start: GridPosition, end: GridPosition, order: AxisOrder) -> Vec<PathStep> {
        let tiles = self.tiles(start, end, order);
        (0..tiles.len())
            .map(|i| PathStep {
                pos: tiles[i],
                direction: self.direction_at(&tiles, i),
            })
            .collect()
    }

    /// Plan using a drag's locked axis order.
    pub fn plan_drag(&self, lock: &DragAxisLock, end: GridPosition) -> Vec<PathStep> {
        self.plan(lock.start(), end, lock.order())
    }
}
