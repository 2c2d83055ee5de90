use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    // RUST_LOG overrides the default level, e.g. RUST_LOG=card_placeholders=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = cli::Cli::parse();
    cli::run(cli)
}
