//! Player-facing placement helpers for Ironfall.
//!
//! Everything here sits between input handling and the
//! [`BuildingRegistry`](ironfall_core::registry::BuildingRegistry): turning a
//! conveyor drag into a planned belt chain, checking ghost placements for
//! miners and the core, and tracking what the player has selected.
//!
//! None of it ticks the simulation. Commands take effect immediately.

pub mod path;
pub mod selection;
pub mod site;

pub use path::{AxisOrder, DragAxisLock, PathPlanner, PathStep};
pub use selection::Selection;
pub use site::{core_site_ok, miner_site_ok, place_conveyor_path};
