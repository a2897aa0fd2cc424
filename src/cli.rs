use clap::Parser;
use std::path::PathBuf;

use crate::model::TileCode;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Generated C text to import (a saved .json map with --json)
    pub input: PathBuf,
    /// Game project root holding include/map.h, src/map.c and src/enemy.c
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
    /// Input is a saved JSON map: validate it, render it to C and import that
    #[arg(long)]
    pub json: bool,
    /// JSON settings file (texture_count, max_enemies, pick_radius)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Number of wall textures, overrides the settings file
    #[arg(long)]
    pub textures: Option<TileCode>,
}
