//! Command-line interface wiring for the `card-placeholders` binary.
//!
//! This module owns the clap definitions and delegates execution to the
//! submodule for each command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod inspect;
pub mod render;
pub mod utils;

/// Parsed CLI entrypoint for the `card-placeholders` binary.
#[derive(Parser, Debug)]
#[command(
    name = "card-placeholders",
    version,
    about = "Print placeholder cards summarising colour, printings, rarity and price"
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a deck list into a printable PDF grid of placeholders.
    Render(render::RenderArgs),
    /// Print each card's summary without rendering.
    Inspect(inspect::InspectArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Render(args) => render::handle(args),
        Command::Inspect(args) => inspect::handle(args),
    }
}
