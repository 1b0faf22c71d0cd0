mod cli;
mod commands;
mod page_range;
mod pdf;
mod sheet;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            path,
            pages,
            output,
            trim,
        } => {
            let trim = trim
                .map(|values| pdf::trim::TrimRect::from_slice(&values))
                .transpose()?;
            commands::extract::run(&path, &pages, trim.as_ref(), &output)?;
        }
        Commands::Merge { inputs, output } => {
            let input_refs: Vec<_> = inputs.iter().collect();
            commands::merge::run(&input_refs, &output)?;
        }
        Commands::Sheet {
            path,
            x,
            y,
            size,
            output,
        } => {
            commands::sheet::run(&path, sheet::Selection { x, y, size }, &output)?;
        }
    }

    Ok(())
}
