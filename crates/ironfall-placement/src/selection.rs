//! What the player has selected, and deleting it.

use ironfall_core::id::BuildingId;
use ironfall_core::registry::BuildingRegistry;
use ironfall_core::spatial::{GridPosition, TileRect};

/// Single and rectangle selection over the registry.
///
/// The selection only stores ids. An id whose building has since been
/// removed is ignored by the delete commands.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: Option<BuildingId>,
    multi: Vec<BuildingId>,
    drag_start: Option<GridPosition>,
    rect: Option<TileRect>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything, then select the building covering `(x, y)`.
    pub fn select_at(&mut self, registry: &BuildingRegistry, x: i32, y: i32) -> Option<BuildingId> {
        self.clear();
        self.selected = registry.get_at(x, y);
        self.selected
    }

    pub fn selected(&self) -> Option<BuildingId> {
        self.selected
    }

    /// Remove the selected building. The core survives but is deselected.
    pub fn delete_selected(&mut self, registry: &mut BuildingRegistry) -> bool {
        match self.selected.take() {
            Some(id) => registry.remove(id),
            None => false,
        }
    }

    // -- Rectangle selection --

    pub fn start_drag(&mut self, pos: GridPosition) {
        self.drag_start = Some(pos);
        self.rect = Some(TileRect::from_corners(pos, pos));
    }

    /// Stretch the drag rectangle to `pos` and reselect what it holds.
    ///
    /// Buildings are picked by origin tile, so a building reaching into
    /// the rectangle from outside is not picked.
    pub fn update_drag(&mut self, registry: &BuildingRegistry, pos: GridPosition) {
        let Some(start) = self.drag_start else {
            return;
        };
        let rect = TileRect::from_corners(start, pos);
        self.rect = Some(rect);
        self.multi = registry.all_in_rect(rect);
    }

    /// Stop dragging. The rectangle's picks stay selected.
    pub fn end_drag(&mut self) {
        self.drag_start = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_start.is_some()
    }

    /// The last drag rectangle, for highlighting.
    pub fn rect(&self) -> Option<TileRect> {
        self.rect
    }

    pub fn multi(&self) -> &[BuildingId] {
        &self.multi
    }

    /// Remove every building picked by the rectangle except the core.
    pub fn delete_multi(&mut self, registry: &mut BuildingRegistry) -> usize {
        let ids = std::mem::take(&mut self.multi);
        registry.remove_all(&ids)
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.multi.clear();
        self.drag_start = None;
        self.rect = None;
    }
}
