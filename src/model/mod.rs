// numeric constants that describe a raycaster map
pub const DEFAULT_MAP_W: usize = 20;
pub const DEFAULT_MAP_H: usize = 20;

/// Smallest side that still leaves an interior inside the border ring.
pub const MIN_MAP_SIDE: usize = 3;

pub const EMPTY: TileCode = 0;
pub const WALL: TileCode = 1;

/// Number of wall textures the game ships with (codes `1..=4`).
pub const DEFAULT_TEXTURE_COUNT: TileCode = 4;

/// Size of the game's `enemies[MAX_ENEMIES]` table.
pub const MAX_ENEMIES: usize = 10;

/// How far (in cells) a removal click may be from an enemy and still hit it.
pub const ENEMY_PICK_RADIUS: f64 = 1.0;

/// Integer stored per cell: `0` is empty, `1..=N` picks a wall texture.
pub type TileCode = u16;

mod grid;
mod raw;

pub use grid::{GridDocument, Spawn};
pub use raw::RawDocument;
