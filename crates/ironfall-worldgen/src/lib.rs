//! Ironfall world generation.
//!
//! A one-shot pass over a fresh [`TileWorld`]:
//!
//! 1. **Terrain** -- every tile becomes dirt or sand.
//! 2. **Veins** -- each [`VeinSpec`] in order grows random walks that paint
//!    ore or stone over base terrain only, so earlier veins win overlaps.
//! 3. **Site** -- the middle half of the map is scored by weighted ore
//!    density and the core is placed on the best center.
//!
//! Generation is driven by an explicit seed. The same seed, size, and
//! [`WorldGenConfig`] always produce the same world.

pub mod config;
pub mod site;
pub mod terrain;
pub mod vein;

pub use config::{ConfigError, Format, SiteWeight, VeinSpec, WorldConfig, WorldGenConfig};
pub use site::{OreDensity, SiteChoice};

use ironfall_core::fixed::Fixed64;
use ironfall_core::id::BuildingId;
use ironfall_core::registry::BuildingRegistry;
use ironfall_core::rng::SimRng;
use ironfall_core::spatial::GridPosition;
use ironfall_core::tile::TileWorld;

/// What a generation run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Center the core was requested at.
    pub site: GridPosition,
    /// The site's score, `None` if the map center was used as a fallback.
    pub score: Option<u64>,
    /// The placed core. `None` if the registry refused it.
    pub core: Option<BuildingId>,
}

/// Seeded world generator. Consumed by [`WorldGenerator::generate`].
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    config: WorldGenConfig,
    rng: SimRng,
}

impl WorldGenerator {
    pub fn new(config: WorldGenConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SimRng::new(seed),
        }
    }

    /// A generator with the default configuration.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(WorldGenConfig::default(), seed)
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// Fill `world` and place the core in `registry`.
    pub fn generate(mut self, world: &mut TileWorld, registry: &mut BuildingRegistry) -> GenerationReport {
        let dirt_chance = Fixed64::checked_from_num(self.config.dirt_chance.clamp(0.0, 1.0))
            .unwrap_or(Fixed64::ZERO);
        terrain::paint_terrain(world, &mut self.rng, dirt_chance);
        for spec in &self.config.veins {
            vein::grow_vein(world, &mut self.rng, spec);
        }

        let choice = site::choose_site(world, &self.config.site_weights);
        let core = registry.place_core(choice.center.x, choice.center.y);
        match core {
            Some(_) => log::info!(
                "generated {}x{} world, core at ({}, {}) scoring {:?}",
                world.width(),
                world.height(),
                choice.center.x,
                choice.center.y,
                choice.score
            ),
            None => log::warn!(
                "generated {}x{} world but the core could not be placed",
                world.width(),
                world.height()
            ),
        }

        GenerationReport {
            site: choice.center,
            score: choice.score,
            core,
        }
    }
}

/// A freshly generated world with its registry.
#[derive(Debug, Clone)]
pub struct GeneratedWorld {
    pub world: TileWorld,
    pub registry: BuildingRegistry,
    pub report: GenerationReport,
}

/// Build and populate a world from a full configuration.
pub fn generate_world(config: &WorldConfig) -> GeneratedWorld {
    let mut world = TileWorld::new(config.width, config.height);
    let mut registry = BuildingRegistry::for_world(&world);
    let report = WorldGenerator::new(config.generation.clone(), config.seed)
        .generate(&mut world, &mut registry);
    GeneratedWorld {
        world,
        registry,
        report,
    }
}
