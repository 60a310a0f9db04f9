//! Maskpack CLI - pack and unpack mask texture maps
//!
//! This binary combines single-channel mask maps into the channels of one
//! multi-channel image and splits such images back apart.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use maskpack_cli::commands;

/// Maskpack - channel packing for mask and material maps
#[derive(Parser)]
#[command(name = "maskpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack single-channel sources into one multi-channel file
    Pack {
        /// One to four source files followed by the destination file
        #[arg(required = true, num_args = 2..=5, value_name = "SRC... DEST")]
        paths: Vec<PathBuf>,
    },

    /// Unpack a multi-channel file into one file per channel
    Unpack {
        /// Source file to unpack
        source: PathBuf,

        /// Destination directory (created if missing)
        dest_dir: PathBuf,
    },

    /// Report which channels of a file carry data
    Check {
        /// File to inspect
        source: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pack { paths } => commands::pack::run(&paths),
        Commands::Unpack { source, dest_dir } => commands::unpack::run(&source, &dest_dir),
        Commands::Check { source } => commands::check::run(&source),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
