//! Tile types and the fixed-size tile grid.
//!
//! The grid never faults on bad coordinates: reads outside the world return
//! [`TileType::Empty`] and writes outside the world are dropped. World
//! generation relies on this when vein walks touch the map edge.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tile types
// ---------------------------------------------------------------------------

/// Terrain or ore occupying a single tile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    #[default]
    Empty,
    Dirt,
    Sand,
    Stone,
    Coal,
    Iron,
    Copper,
}

/// A cell in the sprite atlas. Presentation metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AtlasCell {
    pub row: u8,
    pub col: u8,
}

impl TileType {
    /// All tile types, in declaration order.
    pub const ALL: [TileType; 7] = [
        TileType::Empty,
        TileType::Dirt,
        TileType::Sand,
        TileType::Stone,
        TileType::Coal,
        TileType::Iron,
        TileType::Copper,
    ];

    /// Stable numeric identifier used for comparison and persistence.
    pub fn id(self) -> i32 {
        match self {
            TileType::Empty => -1,
            TileType::Dirt => 0,
            TileType::Sand => 1,
            TileType::Stone => 10,
            TileType::Coal => 11,
            TileType::Iron => 12,
            TileType::Copper => 13,
        }
    }

    /// Inverse of [`TileType::id`]. Unknown ids map to `Empty`.
    pub fn from_id(id: i32) -> TileType {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == id)
            .unwrap_or(TileType::Empty)
    }

    pub fn name(self) -> &'static str {
        match self {
            TileType::Empty => "empty",
            TileType::Dirt => "dirt",
            TileType::Sand => "sand",
            TileType::Stone => "stone",
            TileType::Coal => "coal",
            TileType::Iron => "iron",
            TileType::Copper => "copper",
        }
    }

    pub fn atlas(self) -> AtlasCell {
        let (row, col) = match self {
            TileType::Empty => (0, 7),
            TileType::Dirt => (12, 16),
            TileType::Sand => (14, 16),
            TileType::Stone => (2, 9),
            TileType::Coal => (10, 10),
            TileType::Iron => (10, 11),
            TileType::Copper => (11, 11),
        };
        AtlasCell { row, col }
    }

    /// Coal, Iron, or Copper.
    pub fn is_ore(self) -> bool {
        matches!(self, TileType::Coal | TileType::Iron | TileType::Copper)
    }

    /// Dirt or Sand: the only tiles a vein may overwrite.
    pub fn is_base_terrain(self) -> bool {
        matches!(self, TileType::Dirt | TileType::Sand)
    }
}

// ---------------------------------------------------------------------------
// TileWorld
// ---------------------------------------------------------------------------

/// Fixed-size 2D grid of tiles, stored row-major.
///
/// Width and height are immutable after construction. Structures never
/// write tiles; only world generation does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileWorld {
    width: u32,
    height: u32,
    tiles: Vec<TileType>,
}

impl TileWorld {
    /// Create a world with every tile set to `Empty`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, TileType::Empty)
    }

    /// Create a world with every tile set to `tile`.
    pub fn filled(width: u32, height: u32, tile: TileType) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Tile at `(x, y)`, or `Empty` outside the world.
    pub fn tile(&self, x: i32, y: i32) -> TileType {
        self.index(x, y)
            .map(|i| self.tiles[i])
            .unwrap_or(TileType::Empty)
    }

    /// Overwrite the tile at `(x, y)`. Outside the world this does nothing.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: TileType) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Overwrite every tile.
    pub fn fill(&mut self, tile: TileType) {
        self.tiles.fill(tile);
    }

    /// Rows from `y = 0` upward, each `width` tiles long.
    pub fn rows(&self) -> impl Iterator<Item = &[TileType]> {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    /// Number of tiles of the given type.
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }
}
