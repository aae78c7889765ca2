pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use dbf_core::error::Result;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert { input, to_file } => handlers::handle_convert(input, to_file),
        Commands::ConvertDir { dir, ext } => handlers::handle_convert_dir(dir, ext),
        Commands::Merge {
            dir,
            no_source_name,
            out,
            ext,
        } => handlers::handle_merge(dir, no_source_name, out, ext),
        Commands::Info { input, json } => handlers::handle_info(input, json),
    }
}
