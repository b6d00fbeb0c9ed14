use crate::tile::{AtlasCell, TileType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The kind of ore a unit of resource carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Coal,
    Iron,
    Copper,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Coal, ItemKind::Iron, ItemKind::Copper];

    /// The item a miner extracts from `tile`, if it is an ore tile.
    pub fn from_tile(tile: TileType) -> Option<ItemKind> {
        match tile {
            TileType::Coal => Some(ItemKind::Coal),
            TileType::Iron => Some(ItemKind::Iron),
            TileType::Copper => Some(ItemKind::Copper),
            _ => None,
        }
    }

    /// The ore tile this item is mined from.
    pub fn tile(self) -> TileType {
        match self {
            ItemKind::Coal => TileType::Coal,
            ItemKind::Iron => TileType::Iron,
            ItemKind::Copper => TileType::Copper,
        }
    }

    pub fn name(self) -> &'static str {
        self.tile().name()
    }

    /// Sprite for the item while it rides a belt.
    pub fn atlas(self) -> AtlasCell {
        let (row, col) = match self {
            ItemKind::Coal => (10, 14),
            ItemKind::Iron => (10, 15),
            ItemKind::Copper => (11, 15),
        };
        AtlasCell { row, col }
    }
}

/// A single unit of resource. Has no identity beyond its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self { kind }
    }
}

/// Tally of items accepted by a core, keyed by kind.
///
/// Counts only grow; nothing in the engine consumes from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: ItemKind) {
        let count = self.counts.entry(kind).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Count for a kind; 0 if never delivered.
    pub fn count(&self, kind: ItemKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total items across all kinds. Saturates like the per-kind counts.
    pub fn total(&self) -> u32 {
        self.counts
            .values()
            .fold(0u32, |acc, &c| acc.saturating_add(c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Kinds with a non-zero count, in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        self.counts.iter().map(|(&k, &c)| (k, c))
    }

    /// One `name: count` line per kind, for the HUD.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, count) in self.iter() {
            writeln!(f, "{}: {}", kind.name(), count)?;
        }
        Ok(())
    }
}
