//! Error taxonomy shared by the document model, the JSON loader and the
//! C import pipeline.
//!
//! Every failure a caller is expected to branch on is a value here; only the
//! CLI boundary flattens them into `anyhow` reports.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::model::TileCode;

/// Rejected edit or construction of a [`GridDocument`](crate::model::GridDocument).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    #[error("map must be at least 3x3, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the map")]
    OutOfBounds { x: usize, y: usize },

    #[error("cell ({x}, {y}) is on the border and cannot be edited")]
    BorderProtected { x: usize, y: usize },

    #[error("tile code {0} cannot be used as a wall")]
    InvalidCode(TileCode),

    #[error("enemy position ({x}, {y}) is not a finite point")]
    NonFinitePosition { x: f64, y: f64 },
}

/// Malformed JSON text.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to parse JSON: {0}")]
    Syntax(#[from] serde_json::Error),
}

/// Why an untrusted document was refused by the validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("Map data must be a dictionary.")]
    NotAnObject,

    #[error("Map data must contain a 'grid' key.")]
    MissingGrid,

    #[error("'grid' must be a list.")]
    NotAList,

    #[error("Each row in 'grid' must be a list (row {row} is not).")]
    RowNotAList { row: usize },

    #[error("'grid' must contain at least one non-empty row.")]
    EmptyGrid,

    #[error("All rows in 'grid' must have the same length (row {row} has {found}, expected {expected}).")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Top and bottom borders must be solid walls.")]
    TopBottomBorder,

    #[error("Left and right borders must be solid walls.")]
    LeftRightBorder,

    #[error("Cell ({x}, {y}) does not hold a tile code between 0 and {max_code}.")]
    InvalidTile { x: usize, y: usize, max_code: TileCode },

    #[error("'enemies' must be a list.")]
    EnemiesNotAList,

    #[error("Enemy {index} must be a pair of numbers.")]
    InvalidEnemy { index: usize },
}

/// Decode followed by validation.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("invalid map: {0}")]
    Invalid(#[from] ValidationFailure),
}

/// Document cannot be rendered into game source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("{count} enemies placed, the game holds at most {max}")]
    TooManyEnemies { count: usize, max: usize },
}

/// Fragment of generated text the import pipeline looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Dimensions,
    MapArray,
    EnemyArray,
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fragment::Dimensions => "MAP_WIDTH/MAP_HEIGHT defines",
            Fragment::MapArray => "map[MAP_HEIGHT][MAP_WIDTH] initializer",
            Fragment::EnemyArray => "enemies[MAX_ENEMIES] initializer",
        };
        f.write_str(name)
    }
}

/// Fatal step of the import pipeline. Reports which file or fragment failed.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("generated text has no {0}")]
    ExtractionAbsent(Fragment),

    #[error("Required file {} not found!", .0.display())]
    TargetFileMissing(PathBuf),

    #[error("{} has no replaceable {fragment}", path.display())]
    TargetRegionMissing { path: PathBuf, fragment: Fragment },

    #[error("Failed to update {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
