use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "x3d-bind", version)]
#[command(about = "Bind X3D node attributes and write their minimal form", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the OS config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write attributes even when they equal their default
    #[arg(long, global = true)]
    pub include_defaults: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known node types
    #[command(alias = "ls")]
    Catalog,

    /// Show the attribute table of a node type
    Describe {
        /// Element name, e.g. BooleanToggle
        element: String,
    },

    /// Print every known element of a document in minimal form
    Normalize {
        /// X3D file to read
        file: PathBuf,
    },

    /// Build an element from attribute=value edits
    Set {
        /// Element name, e.g. BooleanToggle
        element: String,

        /// Edits such as toggle=true
        #[arg(num_args = 0..)]
        edits: Vec<String>,
    },

    /// Show the active configuration
    Config {
        /// Write the active configuration to its file
        #[arg(long)]
        write: bool,
    },
}
