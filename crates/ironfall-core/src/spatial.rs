//! Grid positions, footprints, directions, and the footprint index.
//!
//! The y axis points up: [`Direction::Up`] increases `y`. A footprint's
//! origin is its lowest-x, lowest-y tile.

use crate::id::BuildingId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring tile one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another position.
    pub fn manhattan_distance(&self, other: &GridPosition) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }
}

/// Cardinal directions. Conveyors face one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Offset for this direction (y up).
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction from `from` toward `to`. The x axis is checked first, and
    /// `Down` is the fallback (including when the positions are equal).
    pub fn toward(from: GridPosition, to: GridPosition) -> Direction {
        if to.x > from.x {
            Direction::Right
        } else if to.x < from.x {
            Direction::Left
        } else if to.y > from.y {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// The size of a building in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A 1x1 footprint.
    pub fn single() -> Self {
        Self::new(1, 1)
    }

    /// An `n`x`n` footprint.
    pub fn square(n: u32) -> Self {
        Self::new(n, n)
    }

    /// Iterate over all tiles covered at the given origin, row by row.
    pub fn tiles(&self, origin: GridPosition) -> impl Iterator<Item = GridPosition> {
        let w = self.width as i32;
        let h = self.height as i32;
        let ox = origin.x;
        let oy = origin.y;
        (0..h).flat_map(move |dy| (0..w).map(move |dx| GridPosition::new(ox + dx, oy + dy)))
    }

    /// Whether `pos` is one of the covered tiles.
    pub fn contains(&self, origin: GridPosition, pos: GridPosition) -> bool {
        pos.x >= origin.x
            && pos.y >= origin.y
            && pos.x < origin.x + self.width as i32
            && pos.y < origin.y + self.height as i32
    }

    /// The tile just outside the midpoint of the edge facing `side`.
    ///
    /// For a 2x2 footprint at `(x, y)`: `Up` is `(x+1, y+2)`, `Down` is
    /// `(x+1, y-1)`, `Left` is `(x-1, y+1)`, `Right` is `(x+2, y+1)`.
    pub fn edge_midpoint(&self, origin: GridPosition, side: Direction) -> GridPosition {
        let w = self.width as i32;
        let h = self.height as i32;
        match side {
            Direction::Up => GridPosition::new(origin.x + w / 2, origin.y + h),
            Direction::Down => GridPosition::new(origin.x + w / 2, origin.y - 1),
            Direction::Left => GridPosition::new(origin.x - 1, origin.y + h / 2),
            Direction::Right => GridPosition::new(origin.x + w, origin.y + h / 2),
        }
    }

    /// If `pos` touches one of the footprint's edges from outside, the
    /// direction a belt on `pos` must face to point into the footprint.
    ///
    /// Sides are checked left, right, below, above; corners diagonal to the
    /// footprint do not count.
    pub fn entry_direction(&self, origin: GridPosition, pos: GridPosition) -> Option<Direction> {
        let w = self.width as i32;
        let h = self.height as i32;
        let within_x = pos.x >= origin.x && pos.x < origin.x + w;
        let within_y = pos.y >= origin.y && pos.y < origin.y + h;

        if pos.x == origin.x - 1 && within_y {
            Some(Direction::Right)
        } else if pos.x == origin.x + w && within_y {
            Some(Direction::Left)
        } else if pos.y == origin.y - 1 && within_x {
            Some(Direction::Up)
        } else if pos.y == origin.y + h && within_x {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Axis-aligned tile rectangle, half-open: covers `x..x+width`, `y..y+height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle spanned by two corner tiles, both included.
    pub fn from_corners(a: GridPosition, b: GridPosition) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(
            x,
            y,
            a.x.abs_diff(b.x).saturating_add(1),
            a.y.abs_diff(b.y).saturating_add(1),
        )
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= self.x
            && pos.y >= self.y
            && (pos.x as i64) < self.x as i64 + self.width as i64
            && (pos.y as i64) < self.y as i64 + self.height as i64
    }
}

// ---------------------------------------------------------------------------
// SpatialIndex
// ---------------------------------------------------------------------------

/// Maps every covered tile to the building that covers it.
///
/// The index knows nothing about world bounds or building order; the
/// registry keeps it consistent with its building list.
#[derive(Debug, Default, Clone)]
pub struct SpatialIndex {
    tiles: BTreeMap<GridPosition, BuildingId>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every tile of the footprint is unclaimed.
    pub fn is_free(&self, origin: GridPosition, footprint: Footprint) -> bool {
        self.first_blocked(origin, footprint).is_none()
    }

    /// The first claimed tile under the footprint, in row order.
    pub fn first_blocked(&self, origin: GridPosition, footprint: Footprint) -> Option<GridPosition> {
        footprint
            .tiles(origin)
            .find(|tile| self.tiles.contains_key(tile))
    }

    /// Claim every tile of the footprint for `building`.
    ///
    /// Callers check [`SpatialIndex::is_free`] first; claimed tiles are
    /// overwritten.
    pub fn claim(&mut self, building: BuildingId, origin: GridPosition, footprint: Footprint) {
        for tile in footprint.tiles(origin) {
            self.tiles.insert(tile, building);
        }
    }

    /// Release the footprint's tiles that belong to `building`.
    pub fn release(&mut self, building: BuildingId, origin: GridPosition, footprint: Footprint) {
        for tile in footprint.tiles(origin) {
            if self.tiles.get(&tile) == Some(&building) {
                self.tiles.remove(&tile);
            }
        }
    }

    /// The building covering a tile.
    pub fn occupant(&self, pos: GridPosition) -> Option<BuildingId> {
        self.tiles.get(&pos).copied()
    }

    pub fn is_occupied(&self, pos: GridPosition) -> bool {
        self.tiles.contains_key(&pos)
    }

    /// Total number of claimed tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Every claimed tile with its building, in position order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, BuildingId)> + '_ {
        self.tiles.iter().map(|(&p, &b)| (p, b))
    }
}
