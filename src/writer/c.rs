//! Emit a map as generated C text for the raycaster.
//!
//! The output is the importer's input format: dimension defines plus a
//! map initializer and, when enemies exist, an enemy initializer. Both
//! initializers are flat (no inner braces) so the text extracts cleanly;
//! the enemy table uses C99 designators instead of nested records.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ExportError;
use crate::model::GridDocument;

pub fn render(doc: &GridDocument, max_enemies: usize) -> Result<String, ExportError> {
    let count = doc.enemies().len();
    if count > max_enemies {
        return Err(ExportError::TooManyEnemies {
            count,
            max: max_enemies,
        });
    }

    let mut out = String::from("// Auto-generated by raymap - DO NOT EDIT\n");
    out.push_str(&format!("#define MAP_WIDTH {}\n", doc.width()));
    out.push_str(&format!("#define MAP_HEIGHT {}\n\n", doc.height()));

    // ---------------------------------------------------------------
    // 1. Tile grid, one row per line
    // ---------------------------------------------------------------
    let rows: Vec<String> = doc
        .rows()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            format!("    {}", cells.join(","))
        })
        .collect();
    out.push_str("int map[MAP_HEIGHT][MAP_WIDTH] = {\n");
    out.push_str(&rows.join(",\n"));
    out.push_str("\n};\n");

    // ---------------------------------------------------------------
    // 2. Enemy table (omitted when empty)
    // ---------------------------------------------------------------
    if count > 0 {
        out.push_str("\nEnemy enemies[MAX_ENEMIES] = {\n");
        for (i, e) in doc.enemies().iter().enumerate() {
            out.push_str(&format!(
                "    [{i}].x = {:.2}f, [{i}].y = {:.2}f, [{i}].active = 1,\n",
                e.x, e.y
            ));
        }
        out.push_str("};\n");
    }

    Ok(out)
}

/// Render into a file.
pub fn emit(doc: &GridDocument, path: &Path, max_enemies: usize) -> Result<()> {
    let text = render(doc, max_enemies).with_context(|| "Rendering C source")?;
    std::fs::write(path, text).with_context(|| format!("Writing {}", path.display()))?;
    Ok(())
}
