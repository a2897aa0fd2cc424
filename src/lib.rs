pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use std::ffi::OsString;

use anyhow::{Context, bail};
use clap::Parser;

use crate::config::{ImportTargets, Settings};
use crate::import::ImportReport;

pub fn run() -> anyhow::Result<()> {
    let Some(args) = parse_args(std::env::args_os())? else {
        return Ok(());
    };
    let report = execute(&args)?;
    print!("{}", summary(&report));
    Ok(())
}

/// Parse a full argv (program name first).
///
/// `Ok(None)` means help or version text was printed and there is nothing
/// to run. Usage errors come back without clap's own `error:` prefix, the
/// binary adds `Error:` when it reports them.
pub fn parse_args<I, T>(argv: I) -> anyhow::Result<Option<cli::Cli>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match cli::Cli::try_parse_from(argv) {
        Ok(args) => Ok(Some(args)),
        // --help / --version
        Err(e) if !e.use_stderr() => {
            e.print()?;
            Ok(None)
        }
        Err(e) => {
            let text = e.to_string();
            bail!("{}", text.trim_start_matches("error: ").trim_end())
        }
    }
}

pub fn execute(args: &cli::Cli) -> anyhow::Result<ImportReport> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(textures) = args.textures {
        settings.texture_count = textures;
    }

    // 1. ── Read input ─────────────────────────────────────────────────
    if !args.input.exists() {
        bail!("File {} not found!", args.input.display());
    }
    let generated = if args.json {
        let doc = parser::load_file(&args.input, settings.texture_count)?;
        writer::c::render(&doc, settings.max_enemies)
            .with_context(|| format!("Rendering {}", args.input.display()))?
    } else {
        std::fs::read_to_string(&args.input)
            .with_context(|| format!("Reading {}", args.input.display()))?
    };

    // 2. ── Patch the game sources ─────────────────────────────────────
    let targets = ImportTargets::under(&args.root);
    let report = import::import(&generated, &targets).with_context(|| "Importing map data")?;
    Ok(report)
}

/// Confirmation printed after a successful import, one line per fact.
pub fn summary(report: &ImportReport) -> String {
    let mut out = String::from("Map data successfully imported!\n");
    out.push_str(&format!("Updated map dimensions: {}\n", report.dimensions));
    if report.enemies_imported {
        out.push_str("Enemy data imported\n");
    }
    out
}
