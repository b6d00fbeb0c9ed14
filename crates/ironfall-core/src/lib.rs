//! Ironfall Core -- the factory engine behind the Ironfall tile game.
//!
//! This crate owns the simulation state that a presentation layer polls once
//! per frame: the tile grid, the placed structures, and the item flow between
//! them. Everything here is single-threaded and tick-driven.
//!
//! # Tick Pipeline
//!
//! Each call to [`registry::BuildingRegistry::update`] walks the placed
//! buildings in placement order and ticks each one:
//!
//! 1. **Miners** hand a buffered ore item to an adjacent conveyor, then
//!    accrue production time toward the next item.
//! 2. **Conveyors** advance their queued items, keep them spaced apart, and
//!    forward items that reach the end of the tile.
//! 3. **Cores** do nothing on their own; they tally whatever is delivered.
//!
//! A miner placed before a conveyor can hand over an item that the same
//! conveyor advances within the same tick. Placement order is the only
//! ordering guarantee.
//!
//! # Placement
//!
//! Placement and removal are immediate:
//!
//! ```rust,ignore
//! let mut registry = BuildingRegistry::for_world(&world);
//! let belt = registry.place(Building::conveyor(4, 4, Direction::Right));
//! registry.update(fixed64(1.0 / 60.0));
//! ```
//!
//! # Key Types
//!
//! - [`tile::TileWorld`] -- Fixed-size grid of [`tile::TileType`] values.
//! - [`registry::BuildingRegistry`] -- Owns placed buildings, the footprint
//!   index, and the per-tick update.
//! - [`building::Structure`] -- Closed set of behaviors: Core, Miner, Conveyor.
//! - [`spatial`] -- Grid positions, footprints, directions, rectangles.
//! - [`item::Inventory`] -- The core's ore tally.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic math.
//! - [`rng::SimRng`] -- Seeded PRNG used by world generation.

pub mod building;
pub mod fixed;
pub mod id;
pub mod item;
pub mod query;
pub mod registry;
pub mod rng;
pub mod spatial;
pub mod tile;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
