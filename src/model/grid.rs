//! The editable map: a rectangular tile grid whose outer ring always holds
//! walls, plus the list of enemy spawn points.
//!
//! Cells are only reachable through the checked mutators below, so no call
//! site can write into the border or outside the grid.

use serde::{Deserialize, Serialize};

use super::{EMPTY, MIN_MAP_SIDE, TileCode, WALL};
use crate::error::MapError;

/// Enemy spawn point in grid coordinates (not necessarily cell aligned).
///
/// Serialises as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Spawn {
    pub x: f64,
    pub y: f64,
}

impl Spawn {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

impl From<[f64; 2]> for Spawn {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Spawn> for [f64; 2] {
    fn from(s: Spawn) -> Self {
        [s.x, s.y]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridDocument {
    width: usize,
    height: usize,
    /// `height` rows of `width` codes each.
    cells: Vec<Vec<TileCode>>,
    enemies: Vec<Spawn>,
}

impl GridDocument {
    /// Empty map walled with code `1`.
    pub fn new(width: usize, height: usize) -> Result<Self, MapError> {
        Self::with_wall(width, height, WALL)
    }

    /// Allocates a `height × width` grid of empty cells and paints the four
    /// border lines with `wall`.
    ///
    /// Saved maps are only accepted back by [`parser::load`](crate::parser::load)
    /// with a border of `1`; any other wall code is for in-memory use.
    pub fn with_wall(width: usize, height: usize, wall: TileCode) -> Result<Self, MapError> {
        if width < MIN_MAP_SIDE || height < MIN_MAP_SIDE {
            return Err(MapError::InvalidDimension { width, height });
        }
        if wall == EMPTY {
            return Err(MapError::InvalidCode(wall));
        }

        let mut cells = vec![vec![EMPTY; width]; height];
        for x in 0..width {
            cells[0][x] = wall;
            cells[height - 1][x] = wall;
        }
        for row in cells.iter_mut() {
            row[0] = wall;
            row[width - 1] = wall;
        }

        Ok(Self {
            width,
            height,
            cells,
            enemies: Vec::new(),
        })
    }

    /// Assemble a document from rows the validator has already checked
    /// (non-empty, rectangular).
    pub(crate) fn from_parts(cells: Vec<Vec<TileCode>>, enemies: Vec<Spawn>) -> Self {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        debug_assert!(cells.iter().all(|row| row.len() == width));
        Self {
            width,
            height,
            cells,
            enemies,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Code at `(x, y)`, `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<TileCode> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileCode]> {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn enemies(&self) -> &[Spawn] {
        &self.enemies
    }

    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    fn check_editable(&self, x: usize, y: usize) -> Result<(), MapError> {
        if x >= self.width || y >= self.height {
            return Err(MapError::OutOfBounds { x, y });
        }
        if self.is_border(x, y) {
            return Err(MapError::BorderProtected { x, y });
        }
        Ok(())
    }

    /// Write any code into an interior cell.
    ///
    /// The texture range is not known here: a map reloads through
    /// [`parser::load`](crate::parser::load) only if its highest code is at
    /// most the `max_code` passed there.
    pub fn set_cell(&mut self, x: usize, y: usize, code: TileCode) -> Result<(), MapError> {
        self.check_editable(x, y)?;
        self.cells[y][x] = code;
        Ok(())
    }

    /// Step the cell to the next wall texture: `1, 2, …, max_code, 1, …`.
    ///
    /// Never lands on `0`; clearing is [`clear_cell`](Self::clear_cell).
    /// Returns the new code.
    pub fn cycle_cell(&mut self, x: usize, y: usize, max_code: TileCode) -> Result<TileCode, MapError> {
        self.check_editable(x, y)?;
        if max_code == EMPTY {
            return Err(MapError::InvalidCode(max_code));
        }

        let current = u32::from(self.cells[y][x]);
        let next = match (current + 1) % (u32::from(max_code) + 1) {
            0 => WALL,
            // strictly below max_code + 1, fits
            n => n as TileCode,
        };
        self.cells[y][x] = next;
        Ok(next)
    }

    pub fn clear_cell(&mut self, x: usize, y: usize) -> Result<(), MapError> {
        self.set_cell(x, y, EMPTY)
    }

    /// Empty every non-border cell.
    pub fn clear_interior(&mut self) {
        for y in 1..self.height.saturating_sub(1) {
            for x in 1..self.width.saturating_sub(1) {
                self.cells[y][x] = EMPTY;
            }
        }
    }

    /// Append a spawn point. Duplicates are fine; NaN or infinite
    /// coordinates are refused since JSON has no way to store them.
    pub fn add_enemy(&mut self, x: f64, y: f64) -> Result<(), MapError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(MapError::NonFinitePosition { x, y });
        }
        self.enemies.push(Spawn::new(x, y));
        Ok(())
    }

    /// Remove the enemy closest to `(x, y)` if it lies within `max_radius`.
    ///
    /// Ties go to the lowest index. Nothing in range is not an error; the
    /// removed spawn (if any) is returned.
    pub fn remove_nearest_enemy(&mut self, x: f64, y: f64, max_radius: f64) -> Option<Spawn> {
        let mut nearest: Option<(usize, f64)> = None;
        for (idx, enemy) in self.enemies.iter().enumerate() {
            let dist = enemy.distance_to(x, y);
            match nearest {
                Some((_, best)) if dist >= best => {}
                _ => nearest = Some((idx, dist)),
            }
        }

        match nearest {
            Some((idx, dist)) if dist <= max_radius => Some(self.enemies.remove(idx)),
            _ => None,
        }
    }
}
