//! Import pipeline: generated C text in, patched game sources out.
//!
//! Every precondition is checked before the first write: target files
//! present, dimensions and map body found in the generated text, and each
//! target still holding a region the patcher can replace. A failed import
//! leaves all three files as they were. After that the files are patched
//! one by one, each read whole and written whole.

use std::path::Path;

use regex::Regex;

use crate::config::ImportTargets;
use crate::error::{Fragment, ImportError};
use crate::parser::c_source::{
    self, Dimensions, ENEMY_ARRAY, ENEMY_DECLARATION, HEIGHT_DEFINE, MAP_ARRAY, WIDTH_DEFINE,
};
use crate::writer::patch::{self, PatchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub dimensions: Dimensions,
    /// Enemy table written into (or already matching) the enemy source.
    pub enemies_imported: bool,
    pub map_header: PatchOutcome,
    pub map_source: PatchOutcome,
    pub enemy_source: PatchOutcome,
}

pub fn import(generated: &str, targets: &ImportTargets) -> Result<ImportReport, ImportError> {
    let found = c_source::extract(generated);

    // 1. ── Preconditions ─────────────────────────────────────────────
    for path in targets.all() {
        if !path.exists() {
            return Err(ImportError::TargetFileMissing(path.to_path_buf()));
        }
    }
    let dims = found
        .dimensions
        .ok_or(ImportError::ExtractionAbsent(Fragment::Dimensions))?;
    let map_body = found
        .map_body
        .ok_or(ImportError::ExtractionAbsent(Fragment::MapArray))?;

    require_region(
        &targets.map_header,
        &[&WIDTH_DEFINE, &HEIGHT_DEFINE],
        Fragment::Dimensions,
    )?;
    require_region(&targets.map_source, &[&MAP_ARRAY], Fragment::MapArray)?;
    let enemy_body = match found.enemy_body {
        Some(body) => {
            let text = read(&targets.enemy_source)?;
            match (ENEMY_DECLARATION.is_match(&text), ENEMY_ARRAY.is_match(&text)) {
                (false, _) => {
                    tracing::debug!("{} has no enemy table", targets.enemy_source.display());
                    None
                }
                (true, true) => Some(body),
                // declared, but with a body the patcher cannot delimit
                (true, false) => {
                    return Err(ImportError::TargetRegionMissing {
                        path: targets.enemy_source.clone(),
                        fragment: Fragment::EnemyArray,
                    });
                }
            }
        }
        None => None,
    };

    // 2. ── Patch ─────────────────────────────────────────────────────
    let map_header = patch::patch_file(&targets.map_header, |text| {
        patch::patch_dimensions(text, Some(dims))
    })?;
    let map_source = patch::patch_file(&targets.map_source, |text| {
        patch::patch_map_array(text, map_body)
    })?;
    let enemy_source = match enemy_body {
        Some(body) => patch::patch_file(&targets.enemy_source, |text| {
            patch::patch_enemy_array(text, Some(body))
        })?,
        None => PatchOutcome::Skipped,
    };

    tracing::info!("Imported {dims} map");
    Ok(ImportReport {
        dimensions: dims,
        enemies_imported: enemy_source != PatchOutcome::Skipped,
        map_header,
        map_source,
        enemy_source,
    })
}

fn read(path: &Path) -> Result<String, ImportError> {
    std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Every pattern must match somewhere in the file at `path`.
fn require_region(path: &Path, patterns: &[&Regex], fragment: Fragment) -> Result<(), ImportError> {
    let text = read(path)?;
    if patterns.iter().all(|re| re.is_match(&text)) {
        Ok(())
    } else {
        Err(ImportError::TargetRegionMissing {
            path: path.to_path_buf(),
            fragment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const HEADER: &str = "#define MAP_WIDTH 3\n#define MAP_HEIGHT 3\n";
    const MAP_C: &str = "int map[MAP_HEIGHT][MAP_WIDTH] = {\n    1,1,1,\n    1,0,1,\n    1,1,1\n};\n";
    const ENEMY_C: &str = "#include \"enemy.h\"\n";

    fn project(root: &Path) -> ImportTargets {
        fs::create_dir_all(root.join("include")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        let targets = ImportTargets::under(root);
        fs::write(&targets.map_header, HEADER).unwrap();
        fs::write(&targets.map_source, MAP_C).unwrap();
        fs::write(&targets.enemy_source, ENEMY_C).unwrap();
        targets
    }

    fn untouched(targets: &ImportTargets) -> bool {
        fs::read_to_string(&targets.map_header).unwrap() == HEADER
            && fs::read_to_string(&targets.map_source).unwrap() == MAP_C
            && fs::read_to_string(&targets.enemy_source).unwrap() == ENEMY_C
    }

    #[test]
    fn test_import_without_enemy_support() {
        let dir = tempfile::tempdir().unwrap();
        let targets = project(dir.path());

        let generated = "#define MAP_WIDTH 4\n#define MAP_HEIGHT 3\n\
            int map[MAP_HEIGHT][MAP_WIDTH] = {1,1,1,1,\n1,0,0,1,\n1,1,1,1};\n\
            Enemy enemies[MAX_ENEMIES] = { [0].x = 1.50f, [0].y = 1.50f, };\n";
        let report = import(generated, &targets).expect("import ok");

        assert_eq!(
            report.dimensions,
            Dimensions {
                width: 4,
                height: 3
            }
        );
        assert_eq!(report.map_header, PatchOutcome::Updated);
        assert_eq!(report.map_source, PatchOutcome::Updated);
        // enemy.c has no table: left byte-identical, still a success
        assert_eq!(report.enemy_source, PatchOutcome::Skipped);
        assert!(!report.enemies_imported);
        assert_eq!(fs::read_to_string(&targets.enemy_source).unwrap(), ENEMY_C);

        assert_eq!(
            fs::read_to_string(&targets.map_source).unwrap(),
            "int map[MAP_HEIGHT][MAP_WIDTH] = {\n    1,1,1,1,\n    1,0,0,1,\n    1,1,1,1\n};\n"
        );
    }

    #[test]
    fn test_missing_map_body_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let targets = project(dir.path());

        let err = import("#define MAP_WIDTH 4\n#define MAP_HEIGHT 3\n", &targets).unwrap_err();
        assert!(matches!(
            err,
            ImportError::ExtractionAbsent(Fragment::MapArray)
        ));
        assert!(untouched(&targets));
    }

    #[test]
    fn test_partial_dimensions_abort() {
        let dir = tempfile::tempdir().unwrap();
        let targets = project(dir.path());

        let generated = "#define MAP_WIDTH 4\nint map[MAP_HEIGHT][MAP_WIDTH] = {1,1};\n";
        let err = import(generated, &targets).unwrap_err();
        assert!(matches!(
            err,
            ImportError::ExtractionAbsent(Fragment::Dimensions)
        ));
        assert!(untouched(&targets));
    }

    #[test]
    fn test_nested_map_initializer_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let targets = project(dir.path());
        let nested = "int map[MAP_HEIGHT][MAP_WIDTH] = {\n    {1,1,1},\n    {1,0,1},\n    {1,1,1}\n};\n";
        fs::write(&targets.map_source, nested).unwrap();

        let generated = "#define MAP_WIDTH 4\n#define MAP_HEIGHT 3\n\
            int map[MAP_HEIGHT][MAP_WIDTH] = {1,1,1,1,\n1,0,0,1,\n1,1,1,1};\n";
        let err = import(generated, &targets).unwrap_err();

        match &err {
            ImportError::TargetRegionMissing { path, fragment } => {
                assert_eq!(path, &targets.map_source);
                assert_eq!(*fragment, Fragment::MapArray);
            }
            other => panic!("unexpected error {other}"),
        }
        assert!(err.to_string().contains("map.c"));
        assert_eq!(fs::read_to_string(&targets.map_header).unwrap(), HEADER);
        assert_eq!(fs::read_to_string(&targets.map_source).unwrap(), nested);
    }

    #[test]
    fn test_header_without_defines_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let targets = project(dir.path());
        fs::write(&targets.map_header, "#pragma once\n").unwrap();

        let generated = "#define MAP_WIDTH 4\n#define MAP_HEIGHT 3\n\
            int map[MAP_HEIGHT][MAP_WIDTH] = {1,1,1,1,\n1,0,0,1,\n1,1,1,1};\n";
        let err = import(generated, &targets).unwrap_err();
        assert!(matches!(
            err,
            ImportError::TargetRegionMissing { fragment: Fragment::Dimensions, .. }
        ));
        assert_eq!(fs::read_to_string(&targets.map_source).unwrap(), MAP_C);
    }

    #[test]
    fn test_missing_target_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let targets = project(dir.path());
        fs::remove_file(&targets.map_source).unwrap();

        let err = import("anything", &targets).unwrap_err();
        match err {
            ImportError::TargetFileMissing(path) => assert_eq!(path, targets.map_source),
            other => panic!("unexpected error {other}"),
        }
        assert_eq!(fs::read_to_string(&targets.map_header).unwrap(), HEADER);
    }
}
