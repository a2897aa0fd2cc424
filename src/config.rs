//! Editor defaults and where the game keeps its map sources.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MapError;
use crate::model::{
    DEFAULT_MAP_H, DEFAULT_MAP_W, DEFAULT_TEXTURE_COUNT, ENEMY_PICK_RADIUS, MAX_ENEMIES, GridDocument,
    TileCode,
};

/// Knobs shared by the editor front ends and the exporters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Size of a freshly created map.
    pub map_width: usize,
    pub map_height: usize,
    /// Highest tile code; also the wrap point of texture cycling.
    pub texture_count: TileCode,
    /// Capacity of the game's enemy table.
    pub max_enemies: usize,
    /// Removal clicks farther than this from every enemy do nothing.
    pub pick_radius: f64,
}

impl Settings {
    /// Read settings from a JSON file; missing keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Parsing {}", path.display()))
    }

    /// Blank walled map of the configured size.
    pub fn new_map(&self) -> Result<GridDocument, MapError> {
        GridDocument::new(self.map_width, self.map_height)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map_width: DEFAULT_MAP_W,
            map_height: DEFAULT_MAP_H,
            texture_count: DEFAULT_TEXTURE_COUNT,
            max_enemies: MAX_ENEMIES,
            pick_radius: ENEMY_PICK_RADIUS,
        }
    }
}

/// The three game files the importer rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTargets {
    /// Holds the `MAP_WIDTH` / `MAP_HEIGHT` defines.
    pub map_header: PathBuf,
    /// Holds the map initializer.
    pub map_source: PathBuf,
    /// May hold the enemy initializer.
    pub enemy_source: PathBuf,
}

impl ImportTargets {
    /// Standard layout below a game project root.
    pub fn under(root: &Path) -> Self {
        Self {
            map_header: root.join("include").join("map.h"),
            map_source: root.join("src").join("map.c"),
            enemy_source: root.join("src").join("enemy.c"),
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [
            self.map_header.as_path(),
            self.map_source.as_path(),
            self.enemy_source.as_path(),
        ]
    }
}
