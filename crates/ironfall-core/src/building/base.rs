use crate::item::{Inventory, Item};
use serde::{Deserialize, Serialize};

/// The player's base: a permanent 4x4 sink that tallies delivered items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Core {
    inventory: Inventory,
}

impl Core {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume an item into the tally. Always succeeds.
    pub fn accept_item(&mut self, item: Item) {
        self.inventory.add(item.kind);
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }
}
