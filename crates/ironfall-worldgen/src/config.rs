//! Generation and world configuration, loadable from RON, TOML, or JSON.
//!
//! The format is picked from the file extension. Every loader validates the
//! parsed value before returning it.

use ironfall_core::tile::TileType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file has an extension we don't support.
    #[error("unsupported config format: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {format:?} config: {detail}")]
    Parse { format: Format, detail: String },

    #[error("dirt chance {0} is outside [0, 1]")]
    ChanceOutOfRange(f64),

    #[error("world {width}x{height} is smaller than the 4x4 core")]
    WorldTooSmall { width: u32, height: u32 },

    #[error("{0:?} cannot form a vein; only ores and stone can")]
    NotVeinTile(TileType),

    #[error("{0:?} is not an ore and cannot weight the core site")]
    NotOre(TileType),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    /// Detect the format of a file from its extension.
    pub fn detect(path: &Path) -> Result<Format, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => Ok(Format::Ron),
            Some("toml") => Ok(Format::Toml),
            Some("json") => Ok(Format::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                file: path.to_path_buf(),
            }),
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        let parsed = match self {
            Format::Ron => ron::from_str(content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|detail| ConfigError::Parse {
            format: self,
            detail,
        })
    }
}

// ===========================================================================
// Generation config
// ===========================================================================

/// One vein pass: `seeds` random walks of `length` steps painting `tile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeinSpec {
    pub tile: TileType,
    pub seeds: u32,
    pub length: u32,
}

impl VeinSpec {
    pub fn new(tile: TileType, seeds: u32, length: u32) -> Self {
        Self {
            tile,
            seeds,
            length,
        }
    }
}

/// One term of the core site score: `weight` per `tile` within a square
/// window of half-width `radius` around the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteWeight {
    pub tile: TileType,
    pub radius: u32,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl SiteWeight {
    pub fn new(tile: TileType, radius: u32) -> Self {
        Self {
            tile,
            radius,
            weight: 1,
        }
    }
}

/// Parameters of one generation run.
///
/// Veins are grown in list order and never overwrite anything but dirt or
/// sand, so earlier entries win where walks cross.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Probability that a base tile is dirt rather than sand.
    pub dirt_chance: f64,
    pub veins: Vec<VeinSpec>,
    pub site_weights: Vec<SiteWeight>,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            dirt_chance: 0.85,
            veins: vec![
                VeinSpec::new(TileType::Coal, 50, 60),
                VeinSpec::new(TileType::Iron, 30, 60),
                VeinSpec::new(TileType::Copper, 50, 60),
                VeinSpec::new(TileType::Stone, 100, 100),
            ],
            site_weights: vec![
                SiteWeight::new(TileType::Copper, 20),
                SiteWeight::new(TileType::Iron, 30),
                SiteWeight::new(TileType::Coal, 30),
            ],
        }
    }
}

impl WorldGenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.dirt_chance) {
            return Err(ConfigError::ChanceOutOfRange(self.dirt_chance));
        }
        if let Some(v) = self
            .veins
            .iter()
            .find(|v| !(v.tile.is_ore() || v.tile == TileType::Stone))
        {
            return Err(ConfigError::NotVeinTile(v.tile));
        }
        if let Some(w) = self.site_weights.iter().find(|w| !w.tile.is_ore()) {
            return Err(ConfigError::NotOre(w.tile));
        }
        Ok(())
    }
}

// ===========================================================================
// World config
// ===========================================================================

/// Everything needed to build a fresh world: size, seed, generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub generation: WorldGenConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 270,
            seed: 0,
            generation: WorldGenConfig::default(),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 4 || self.height < 4 {
            return Err(ConfigError::WorldTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        self.generation.validate()
    }

    /// Parse and validate a config in the given format.
    pub fn from_str_as(content: &str, format: Format) -> Result<Self, ConfigError> {
        let config: WorldConfig = format.parse(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_str_as(content, Format::Ron)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_str_as(content, Format::Toml)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_str_as(content, Format::Json)
    }

    /// Read a config file, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = Format::detect(path)?;
        let content = std::fs::read_to_string(path)?;
        Self::from_str_as(&content, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_map() {
        let config = WorldConfig::default();
        assert_eq!((config.width, config.height), (480, 270));
        assert_eq!(config.generation.dirt_chance, 0.85);
        let order: Vec<_> = config.generation.veins.iter().map(|v| v.tile).collect();
        assert_eq!(
            order,
            vec![TileType::Coal, TileType::Iron, TileType::Copper, TileType::Stone]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn ron_fills_missing_fields_with_defaults() {
        let config = WorldConfig::from_ron_str("(width: 64, height: 48, seed: 7)").unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.seed, 7);
        assert_eq!(config.generation, WorldGenConfig::default());
    }

    #[test]
    fn toml_with_custom_veins() {
        let src = r#"
            width = 100
            height = 80
            seed = 3

            [generation]
            dirt_chance = 0.5

            [[generation.veins]]
            tile = "iron"
            seeds = 4
            length = 10

            [[generation.site_weights]]
            tile = "iron"
            radius = 5
            weight = 2
        "#;
        let config = WorldConfig::from_toml_str(src).unwrap();
        assert_eq!(config.generation.veins, vec![VeinSpec::new(TileType::Iron, 4, 10)]);
        assert_eq!(config.generation.site_weights[0].weight, 2);
        assert_eq!(config.generation.dirt_chance, 0.5);
    }

    #[test]
    fn json_site_weight_defaults_to_one() {
        let src = r#"{"generation": {"site_weights": [{"tile": "coal", "radius": 3}]}}"#;
        let config = WorldConfig::from_json_str(src).unwrap();
        assert_eq!(config.generation.site_weights, vec![SiteWeight::new(TileType::Coal, 3)]);
    }

    #[test]
    fn rejects_bad_chance() {
        let err = WorldConfig::from_json_str(r#"{"generation": {"dirt_chance": 1.5}}"#);
        assert!(matches!(err, Err(ConfigError::ChanceOutOfRange(_))));
    }

    #[test]
    fn rejects_tiny_world() {
        let err = WorldConfig::from_ron_str("(width: 3, height: 10)");
        assert!(matches!(
            err,
            Err(ConfigError::WorldTooSmall { width: 3, height: 10 })
        ));
    }

    #[test]
    fn rejects_non_ore_tiles() {
        let mut generation = WorldGenConfig::default();
        generation.veins.push(VeinSpec::new(TileType::Sand, 1, 1));
        assert!(matches!(
            generation.validate(),
            Err(ConfigError::NotVeinTile(TileType::Sand))
        ));

        let mut generation = WorldGenConfig::default();
        generation.site_weights.push(SiteWeight::new(TileType::Stone, 4));
        assert!(matches!(
            generation.validate(),
            Err(ConfigError::NotOre(TileType::Stone))
        ));
    }

    #[test]
    fn parse_errors_name_the_format() {
        let err = WorldConfig::from_toml_str("width = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: Format::Toml, .. }));
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = std::env::temp_dir().join(format!("ironfall_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let ron_path = dir.join("world.ron");
        std::fs::write(&ron_path, "(width: 32, height: 32, seed: 9)").unwrap();
        assert_eq!(WorldConfig::load(&ron_path).unwrap().seed, 9);

        let txt_path = dir.join("world.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(matches!(
            WorldConfig::load(&txt_path),
            Err(ConfigError::UnsupportedFormat { .. })
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
