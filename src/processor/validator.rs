//! Structural checks that turn an untrusted [`RawDocument`] into a
//! [`GridDocument`].
//!
//! The checks run in a fixed order (shape, border, tiles, enemies) and stop
//! at the first failure. Each one can also be called alone; the later ones
//! re-run the shape check first so they never index into a ragged grid.

use serde_json::Value;

use crate::error::ValidationFailure;
use crate::model::{GridDocument, RawDocument, Spawn, TileCode, WALL};

/// Grid extent reported by a passing shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
}

/// Object with a `grid` that is a non-empty list of equally long lists.
pub fn check_shape(raw: &RawDocument) -> Result<Shape, ValidationFailure> {
    rows(raw).map(|(shape, _)| shape)
}

fn rows(raw: &RawDocument) -> Result<(Shape, Vec<&Vec<Value>>), ValidationFailure> {
    if !raw.raw.is_object() {
        return Err(ValidationFailure::NotAnObject);
    }
    let grid = raw.grid().ok_or(ValidationFailure::MissingGrid)?;
    let grid = grid.as_array().ok_or(ValidationFailure::NotAList)?;

    let rows = grid
        .iter()
        .enumerate()
        .map(|(row, v)| v.as_array().ok_or(ValidationFailure::RowNotAList { row }))
        .collect::<Result<Vec<_>, _>>()?;

    let width = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(ValidationFailure::EmptyGrid),
    };
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(ValidationFailure::RowLengthMismatch {
            row,
            expected: width,
            found: r.len(),
        });
    }

    let shape = Shape {
        width,
        height: rows.len(),
    };
    Ok((shape, rows))
}

/// Top and bottom rows all walls, then the first and last cell of every row.
pub fn check_borders(raw: &RawDocument) -> Result<(), ValidationFailure> {
    let (_, rows) = rows(raw)?;
    let is_wall = |cell: &Value| cell.as_u64() == Some(u64::from(WALL));

    let top = rows[0];
    let bottom = rows[rows.len() - 1];
    if !top.iter().all(is_wall) || !bottom.iter().all(is_wall) {
        return Err(ValidationFailure::TopBottomBorder);
    }

    for row in &rows {
        if !is_wall(&row[0]) || !is_wall(&row[row.len() - 1]) {
            return Err(ValidationFailure::LeftRightBorder);
        }
    }
    Ok(())
}

/// Every cell is an integer code in `[0, max_code]`.
pub fn check_tiles(
    raw: &RawDocument,
    max_code: TileCode,
) -> Result<Vec<Vec<TileCode>>, ValidationFailure> {
    let (_, rows) = rows(raw)?;

    let mut cells = Vec::with_capacity(rows.len());
    for (y, row) in rows.iter().enumerate() {
        let mut out = Vec::with_capacity(row.len());
        for (x, cell) in row.iter().enumerate() {
            let code = cell
                .as_u64()
                .and_then(|c| TileCode::try_from(c).ok())
                .filter(|&c| c <= max_code)
                .ok_or(ValidationFailure::InvalidTile { x, y, max_code })?;
            out.push(code);
        }
        cells.push(out);
    }
    Ok(cells)
}

/// `enemies` is absent, `null`, or a list of `[x, y]` number pairs.
pub fn check_enemies(raw: &RawDocument) -> Result<Vec<Spawn>, ValidationFailure> {
    let Some(list) = raw.enemies() else {
        return Ok(Vec::new());
    };
    let list = list.as_array().ok_or(ValidationFailure::EnemiesNotAList)?;

    list.iter()
        .enumerate()
        .map(|(index, entry)| {
            let pair = entry.as_array().filter(|p| p.len() == 2);
            match pair.map(|p| (p[0].as_f64(), p[1].as_f64())) {
                Some((Some(x), Some(y))) => Ok(Spawn::new(x, y)),
                _ => Err(ValidationFailure::InvalidEnemy { index }),
            }
        })
        .collect()
}

/// Run every check and build the validated document.
pub fn validate(raw: &RawDocument, max_code: TileCode) -> Result<GridDocument, ValidationFailure> {
    let shape = check_shape(raw)?;
    check_borders(raw)?;
    let cells = check_tiles(raw, max_code)?;
    let enemies = check_enemies(raw)?;

    tracing::debug!(
        "map validated: {}x{}, {} enemies",
        shape.width,
        shape.height,
        enemies.len()
    );
    Ok(GridDocument::from_parts(cells, enemies))
}

/// Human-readable outcome of [`validate`].
pub fn verdict(raw: &RawDocument, max_code: TileCode) -> String {
    match validate(raw, max_code) {
        Ok(_) => "Map is valid.".to_string(),
        Err(reason) => reason.to_string(),
    }
}
