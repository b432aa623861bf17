//! CLI argument definitions for the `crewmate` command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types live here,
//! keeping `main.rs` focused on logging setup and dispatch.

use clap::{Parser, Subcommand};

use crewmate_cli::input::DEFAULT_PRESET;

/// Crewmate - procedural character frames and walk-cycle spritesheets
#[derive(Parser)]
#[command(name = "crewmate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a single frame to PNG
    Render {
        /// Preset to start from (classic, slim, chunky, heroic)
        #[arg(short, long, default_value = DEFAULT_PRESET)]
        preset: String,

        /// Appearance overrides JSON merged onto the preset
        #[arg(short, long)]
        appearance: Option<String>,

        /// Animation name; only walk moves
        #[arg(long, default_value = "idle", value_parser = ["idle", "walk", "inspect", "point", "wave", "vent", "ghost", "dead"])]
        animation: String,

        /// Animation frame index
        #[arg(long, default_value_t = 0)]
        frame: u32,

        /// Facing direction
        #[arg(short, long, default_value = "right", value_parser = ["down", "left", "up", "right"])]
        direction: String,

        /// Output PNG path
        #[arg(short, long)]
        output: String,
    },

    /// Bake a walk-cycle spritesheet to PNG
    Sheet {
        /// Preset to start from (classic, slim, chunky, heroic)
        #[arg(short, long, default_value = DEFAULT_PRESET)]
        preset: String,

        /// Appearance overrides JSON merged onto the preset
        #[arg(short, long)]
        appearance: Option<String>,

        /// Walk frames per row
        #[arg(short, long)]
        frames: u32,

        /// Facing directions: 4 for one row per direction, anything else for one row
        #[arg(long, default_value_t = 4)]
        dirs: u32,

        /// Supersampling factor
        #[arg(long, default_value_t = 1)]
        ssaa: u32,

        /// Output PNG path
        #[arg(short, long)]
        output: String,

        /// Write slicing metadata JSON to this path
        #[arg(short, long)]
        metadata: Option<String>,
    },

    /// List the built-in presets
    Presets {
        /// Dump full preset appearances as JSON
        #[arg(long)]
        json: bool,
    },

    /// Strictly validate an appearance overrides file
    Validate {
        /// Appearance overrides JSON
        #[arg(short, long)]
        appearance: String,

        /// Preset the overrides are merged onto
        #[arg(short, long, default_value = DEFAULT_PRESET)]
        preset: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}
