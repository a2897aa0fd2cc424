//! In-place rewrites of the game's map sources.
//!
//! Each rewrite swaps exactly the region matched by the patterns in
//! [`parser::c_source`](crate::parser::c_source) and leaves every other
//! byte of the file alone. No C syntax is checked: whatever text the
//! caller hands in is what lands in the file.

use std::borrow::Cow;
use std::path::Path;

use regex::{Captures, NoExpand};

use crate::error::ImportError;
use crate::parser::c_source::{
    Dimensions, ENEMY_ARRAY, ENEMY_DECLARATION, HEIGHT_DEFINE, MAP_ARRAY, WIDTH_DEFINE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// New content written.
    Updated,
    /// Rewrite produced the same text, file not touched.
    Unchanged,
    /// Step deliberately not attempted.
    Skipped,
}

/// Replace the values of the `MAP_WIDTH` / `MAP_HEIGHT` defines.
///
/// Without dimensions there is nothing to do and the text comes back as is.
pub fn patch_dimensions(text: &str, dims: Option<Dimensions>) -> String {
    let Some(Dimensions { width, height }) = dims else {
        return text.to_string();
    };

    let text = WIDTH_DEFINE.replace_all(text, |caps: &Captures| format!("{}{}", &caps[1], width));
    let text = HEIGHT_DEFINE.replace_all(&text, |caps: &Captures| format!("{}{}", &caps[1], height));
    text.into_owned()
}

/// Replace the whole `int map[MAP_HEIGHT][MAP_WIDTH] = { … };` statement.
pub fn patch_map_array(text: &str, body: &str) -> String {
    let replacement = initializer("int map[MAP_HEIGHT][MAP_WIDTH]", body);
    replace(&MAP_ARRAY, text, &replacement, "map")
}

/// Replace the `Enemy enemies[MAX_ENEMIES] = { … };` statement.
///
/// Files without an enemies initializer, or a missing body, leave the
/// text untouched.
pub fn patch_enemy_array(text: &str, body: Option<&str>) -> String {
    match body {
        Some(body) if ENEMY_DECLARATION.is_match(text) => {
            let replacement = initializer("Enemy enemies[MAX_ENEMIES]", body);
            replace(&ENEMY_ARRAY, text, &replacement, "enemies")
        }
        _ => text.to_string(),
    }
}

fn initializer(declaration: &str, body: &str) -> String {
    let lines: Vec<String> = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| format!("    {l}"))
        .collect();
    format!("{declaration} = {{\n{}\n}};", lines.join("\n"))
}

fn replace(re: &regex::Regex, text: &str, replacement: &str, what: &str) -> String {
    match re.replace_all(text, NoExpand(replacement)) {
        Cow::Borrowed(_) => {
            tracing::warn!("no `{what}` initializer to replace, text left as is");
            text.to_string()
        }
        Cow::Owned(new) => new,
    }
}

/// Read `path` whole, rewrite it in memory, write it back whole.
///
/// The file is only written when the content actually changed.
pub fn patch_file<F>(path: &Path, rewrite: F) -> Result<PatchOutcome, ImportError>
where
    F: FnOnce(&str) -> String,
{
    let io_err = |source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let before = std::fs::read_to_string(path).map_err(io_err)?;
    let after = rewrite(&before);
    if after == before {
        tracing::debug!("{} unchanged", path.display());
        return Ok(PatchOutcome::Unchanged);
    }

    std::fs::write(path, after).map_err(io_err)?;
    tracing::info!("Patched {}", path.display());
    Ok(PatchOutcome::Updated)
}
