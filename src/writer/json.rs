//! Save a map as the canonical JSON document.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::model::{GridDocument, Spawn, TileCode};

#[derive(Serialize)]
struct SavedMap<'a> {
    grid: Vec<&'a [TileCode]>,
    enemies: &'a [Spawn],
}

/// `{ "grid": [[…]], "enemies": [[x, y], …] }`, indented by four spaces.
pub fn encode(doc: &GridDocument) -> String {
    let saved = SavedMap {
        grid: doc.rows().collect(),
        enemies: doc.enemies(),
    };

    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    // integers, finite-or-null floats and string keys only
    saved
        .serialize(&mut ser)
        .expect("map document always serialises");
    String::from_utf8(out).expect("serde_json emits UTF-8")
}

pub fn save_file(doc: &GridDocument, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Creating {}", dir.display()))?;
    }
    std::fs::write(path, encode(doc)).with_context(|| format!("Writing {}", path.display()))?;
    tracing::info!("Saved {}x{} map to {}", doc.width(), doc.height(), path.display());
    Ok(())
}
