use crate::input::Format;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "prereq")]
#[command(about = "Order items so prerequisites come first, reporting dependency cycles")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a dependency order for a graph
    Sort {
        /// Graph description file (`-` for stdin)
        file: PathBuf,
        /// Fail on the first cycle instead of reporting and continuing
        #[arg(long)]
        strict: bool,
        /// Print the order and cycles as JSON
        #[arg(long)]
        json: bool,
        /// Input format (defaults to the file extension)
        #[arg(long, value_enum)]
        format: Option<Format>,
    },

    /// List every dependency cycle in a graph
    Cycles {
        /// Graph description file (`-` for stdin)
        file: PathBuf,
        /// Input format (defaults to the file extension)
        #[arg(long, value_enum)]
        format: Option<Format>,
    },

    /// Check that an order respects a graph
    Check {
        /// Graph description file
        file: PathBuf,
        /// Order to check, one item per line
        order: PathBuf,
        /// Print the violations as JSON
        #[arg(long)]
        json: bool,
        /// Input format (defaults to the file extension)
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
}
