//! Summary inspection command (`card-placeholders inspect ...`).

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use card_placeholders::pipeline::{load_deck, summarize_deck};
use clap::{Args, ValueEnum};

use crate::cli::common::{CatalogArgs, ManySetsArg};
use crate::cli::utils::{build_client, format_summary};

/// Args for `card-placeholders inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Deck list to summarise.
    pub deck: PathBuf,
    /// Output format.
    #[arg(long, default_value_t = InspectFormat::Text, value_enum)]
    pub format: InspectFormat,
    /// Behaviour for cards with more than ten collectable sets.
    #[arg(long = "many-sets", default_value_t = ManySetsArg::Sentinel, value_enum)]
    pub many_sets: ManySetsArg,
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum InspectFormat {
    Text,
    Json,
}

impl fmt::Display for InspectFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectFormat::Text => write!(f, "text"),
            InspectFormat::Json => write!(f, "json"),
        }
    }
}

/// Execute the inspect command.
pub fn handle(args: InspectArgs) -> Result<()> {
    let deck = load_deck(&args.deck)?;
    let client = build_client(&args.catalog)?;
    let summaries = summarize_deck(&deck.entries, &client, args.many_sets.into(), false)?;
    match args.format {
        InspectFormat::Text => {
            for summary in &summaries {
                print!("{}", format_summary(summary));
            }
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summaries)
                .context("failed to serialize card summaries")?;
            println!("{}", json);
        }
    }
    Ok(())
}
