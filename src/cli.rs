// CLI module for handling command-line interface

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qarel")]
#[command(about = "Derives QA report versions and download records from the QA release table")]
pub struct Cli {
    /// Release table path (defaults to $QA_DIR/qa-releases.toml)
    #[arg(long, global = true)]
    pub table: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter release table
    Init {
        /// Version key for the placeholder entry
        #[arg(default_value = "8.4.0")]
        version: String,
        /// Overwrite an existing table
        #[arg(long)]
        force: bool,
    },
    /// List version identifiers accepted in QA reports
    Reported {
        #[arg(long)]
        json: bool,
    },
    /// Exit 0 if a QA report for VERSION would be accepted, 1 if rejected, 2 if the table is unusable
    Accepts { version: String },
    /// List downloadable QA releases
    Releases {
        /// Include disabled records
        #[arg(long)]
        all: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print the public API document as JSON
    Export,
    /// Audit the release table
    Check {
        #[arg(long)]
        json: bool,
    },
}
