//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Colour CLI.
#[derive(Parser, Debug)]
#[command(name = "colour")]
#[command(version)]
#[command(about = "Client for the Colour collaborative canvas ledger")]
#[command(
    long_about = "Colour stores collaborative canvases on a public ledger.\n\nRun 'colour init' to register an alias, then 'colour list' to browse canvases."
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory for keys, peers, and the block cache.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Alias to act as.
    #[arg(long, global = true, env = "COLOUR_ALIAS")]
    pub alias: Option<String>,

    /// Extra peer hosts, comma-delimited.
    #[arg(long, global = true, value_delimiter = ',')]
    pub peers: Vec<String>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize this node: create keys and register the alias.
    Init,

    /// List every canvas on the canvas channel, newest first.
    List,

    /// Show one canvas in full, by record hash.
    Show {
        /// Base64url record hash of the canvas.
        hash: String,
    },

    /// Show every canvas with the given colour mode.
    Showall {
        /// Colour mode tag, e.g. RGB or Grayscale.
        mode: String,
    },

    /// Purchase a colour vote bundle (not yet available).
    Purchase,

    /// Vote a colour onto a canvas location (not yet available).
    Vote,

    /// Show registered customer information (not yet available).
    Customer,

    /// Manage the node subscription (not yet available).
    Subscription,
}
