mod cli;
mod config;
mod deps;
mod dups;
mod filetype;
mod report_helpers;
mod util;
mod walk;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use cli::{Cli, Commands};
use config::DupConfig;

fn dispatch(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Deps {
            manifest,
            hub_threshold,
            output,
        } => deps::run(
            &manifest,
            hub_threshold,
            output.report,
            output.top,
            output.json,
        ),
        Commands::Dups {
            path,
            config,
            block_lines,
            exclude,
            include_tests,
            output,
        } => {
            let target = path.unwrap_or_else(|| PathBuf::from("."));
            let mut dup_config = match config {
                Some(path) => DupConfig::load(&path)?,
                None => DupConfig::default(),
            };
            if let Some(block_lines) = block_lines {
                dup_config.block_lines = block_lines;
            }
            dups::run(
                &target,
                &dup_config,
                &exclude,
                include_tests,
                output.report,
                output.top,
                output.json,
            )
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = dispatch(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
