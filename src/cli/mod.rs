//! CLI module for the walkthrough
//!
//! Provides the command-line interface using clap.

pub mod commands;
mod console;
mod input;
mod render;

pub use console::Console;
pub use input::{parse_command, WalkCommand};
pub use render::{describe_transition, render_notes, render_page, render_providers};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Guided provider enrollment walkthrough
#[derive(Parser, Debug)]
#[command(name = "walkthrough")]
#[command(version)]
#[command(about = "Guided walkthrough for enrolling providers into a group practice")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Page graph JSON file (defaults to the built-in walkthrough)
    #[arg(long, global = true)]
    pub graph: Option<PathBuf>,

    /// Configuration JSON file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the walkthrough interactively (default)
    Walk {
        /// Directory reports are written to (overrides the config)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the pages of the walkthrough
    Pages {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Default log filter for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}
