//! Rendering command (`card-placeholders render ...`).

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Result;
use card_placeholders::PlaceholderStyle;
use card_placeholders::pipeline::{self, DEFAULT_OUTPUT, RunConfig};
use chrono::Local;
use clap::Args;

use crate::cli::common::{CatalogArgs, ManySetsArg};
use crate::cli::utils::{build_client, print_report};

/// Args for `card-placeholders render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Deck list to render (.txt, .dec, .deck, .mwdeck).
    pub deck: PathBuf,
    /// Free text appended to every placeholder.
    #[arg(long)]
    pub notes: Option<String>,
    /// Output PDF, overwritten if it exists.
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
    /// Placeholders per grid row.
    #[arg(long, default_value = "5")]
    pub columns: NonZeroUsize,
    /// Behaviour for cards with more than ten collectable sets.
    #[arg(long = "many-sets", default_value_t = ManySetsArg::Sentinel, value_enum)]
    pub many_sets: ManySetsArg,
    /// Abort the run on the first failed catalog lookup.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,
    #[command(flatten)]
    pub catalog: CatalogArgs,
}

impl RenderArgs {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            deck_path: self.deck.clone(),
            output: self.output.clone(),
            note: self.notes.clone(),
            columns: self.columns,
            many_sets: self.many_sets.into(),
            fail_fast: self.fail_fast,
            style: PlaceholderStyle::default(),
        }
    }
}

/// Execute the render command.
pub fn handle(args: RenderArgs) -> Result<()> {
    let config = args.run_config();
    let client = build_client(&args.catalog)?;
    let report = pipeline::run(&config, &client, Local::now().date_naive())?;
    print_report(&report);
    Ok(())
}
