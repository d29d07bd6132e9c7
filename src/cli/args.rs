// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (default: <config dir>/sticky-md/config.toml)
    #[arg(long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Path to the note file, overrides the config
    #[arg(short, long, value_name = "NOTE_FILE", global = true)]
    pub note_file: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render markdown to sanitized HTML on stdout
    Render {
        /// Markdown file (reads stdin when omitted)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Print the note's markdown
    Show {
        /// Print the whole note record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the rendered note in the browser
    View,

    /// Update note fields and save
    Set {
        /// Replace the content with this markdown file ("-" for stdin)
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,

        /// Theme color label
        #[arg(long)]
        color: Option<String>,

        /// Keep the note above other windows
        #[arg(long, value_name = "BOOL")]
        pinned: Option<bool>,

        /// Window opacity, 0.0 to 1.0
        #[arg(long)]
        opacity: Option<f64>,

        /// Corner radius in pixels
        #[arg(long, value_name = "PX")]
        border_radius: Option<u32>,
    },

    /// Toggle the checkbox with this data-checkbox-index
    Toggle {
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// List task items with their checkbox index
    Tasks,
}
