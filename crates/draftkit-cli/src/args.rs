//! Command-line argument definitions for the Draftkit CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output path, configuration file
//! selection, which shapes end up in the gallery, how many render passes run
//! and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Draftkit gallery renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the output SVG file
    #[arg(short, long, default_value = "gallery.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Render only the named shapes; may be repeated. Defaults to the gallery
    #[arg(short, long = "shape")]
    pub shapes: Vec<String>,

    /// Number of render passes; every pass after the first must not mutate the scene
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub passes: u32,
}
