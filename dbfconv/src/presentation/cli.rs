use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "dbfconv: dBASE table to delimited text", long_about = None)]
pub struct Cli {
    /// Log decode progress to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one table to `;`-separated text
    Convert {
        input: PathBuf,
        /// write <input stem>.csv next to the input instead of stdout
        #[arg(short = 'o', long)]
        to_file: bool,
    },

    /// Convert every table in a directory, each to its own .csv file
    ConvertDir {
        dir: PathBuf,
        /// only pick files with this extension (e.g. "dbf")
        #[arg(long)]
        ext: Option<String>,
    },

    /// Concatenate all tables in a directory under one header
    Merge {
        dir: PathBuf,
        /// do not lead each row with a FROM_FILE column
        #[arg(long)]
        no_source_name: bool,
        /// write to this path instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        ext: Option<String>,
    },

    /// Show header and field metadata of one table
    Info {
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
}
