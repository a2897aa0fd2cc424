//! Readers: saved JSON maps and generated C text.
pub mod c_source;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::{DecodeError, LoadError};
use crate::model::{GridDocument, RawDocument, TileCode};
use crate::processor::validator;

/// Parse JSON text into an unvalidated [`RawDocument`].
///
/// Only syntax is checked here. The result may have no `grid`, ragged rows
/// or an open border; run the validator before trusting it.
pub fn decode(json: &str) -> Result<RawDocument, DecodeError> {
    let root: Value = serde_json::from_str(json)?;
    tracing::debug!("JSON parsed, {} bytes", json.len());
    Ok(RawDocument::new(root))
}

/// Decode and validate in one step. A missing `grid` key fails here.
///
/// This is the only way back from JSON to a [`GridDocument`]. A saved map
/// survives it when its border cells are all `1` and every code is at most
/// `max_code`; maps built with another wall code or edited with codes above
/// the texture count are refused with the matching [`ValidationFailure`].
///
/// [`ValidationFailure`]: crate::error::ValidationFailure
pub fn load(json: &str, max_code: TileCode) -> Result<GridDocument, LoadError> {
    let raw = decode(json)?;
    let doc = validator::validate(&raw, max_code)?;
    Ok(doc)
}

/// Read a saved map from disk and validate it.
pub fn load_file(path: &Path, max_code: TileCode) -> Result<GridDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Reading {}", path.display()))?;
    let doc = load(&json, max_code).with_context(|| format!("Loading {}", path.display()))?;

    tracing::info!(
        "Loaded {}x{} map with {} enemies from {}",
        doc.width(),
        doc.height(),
        doc.enemies().len(),
        path.display()
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFailure;
    use crate::model::Spawn;

    #[test]
    fn test_decode_keeps_invalid_shapes() {
        // ragged and unwalled, still decodes
        let raw = decode(r#"{"grid": [[0, 1], [1]]}"#).expect("valid json");
        assert_eq!(raw.grid().and_then(Value::as_array).map(Vec::len), Some(2));
        assert!(raw.enemies().is_none());

        let raw = decode("[1, 2, 3]").expect("valid json");
        assert!(raw.grid().is_none());
    }

    #[test]
    fn test_decode_rejects_bad_syntax() {
        for text in ["", "{", r#"{"grid": [[1,1,1],}"#, "grid: []"] {
            assert!(
                matches!(decode(text), Err(DecodeError::Syntax(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn test_load_defaults_enemies() {
        let doc = load(r#"{"grid": [[1,1,1],[1,0,1],[1,1,1]]}"#, 4).expect("loads");
        assert_eq!(doc.width(), 3);
        assert!(doc.enemies().is_empty());

        let doc = load(
            r#"{"grid": [[1,1,1],[1,2,1],[1,1,1]], "enemies": [[1.5, 1.25]]}"#,
            4,
        )
        .expect("loads");
        assert_eq!(doc.get(1, 1), Some(2));
        assert_eq!(doc.enemies(), &[Spawn::new(1.5, 1.25)]);
    }

    #[test]
    fn test_load_requires_grid() {
        let err = load(r#"{"enemies": []}"#, 4).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(ValidationFailure::MissingGrid)
        ));
    }
}
