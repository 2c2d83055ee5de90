//! One batch run: deck list in, placeholder PDF out.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};

use crate::catalog::CatalogSource;
use crate::domain::{
    CardSummary, CatalogStatus, Composer, DeckEntry, DeckList, Grid, ManySetsPolicy, Placeholder,
    PlaceholderStyle,
};
use crate::pdf::{DocumentOptions, PageGeometry, render_document};

/// Fixed name of the rendered document.
pub const DEFAULT_OUTPUT: &str = "card-placeholders.pdf";
pub const DEFAULT_COLUMNS: usize = 5;
const DOCUMENT_TITLE: &str = "card-placeholders";

/// Immutable settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub deck_path: PathBuf,
    pub output: PathBuf,
    pub note: Option<String>,
    pub columns: NonZeroUsize,
    pub many_sets: ManySetsPolicy,
    /// Abort on the first catalog failure instead of degrading that card.
    pub fail_fast: bool,
    pub style: PlaceholderStyle,
}

impl RunConfig {
    pub fn new<P: Into<PathBuf>>(deck_path: P) -> Self {
        Self {
            deck_path: deck_path.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            note: None,
            columns: NonZeroUsize::new(DEFAULT_COLUMNS).unwrap_or(NonZeroUsize::MIN),
            many_sets: ManySetsPolicy::default(),
            fail_fast: false,
            style: PlaceholderStyle::default(),
        }
    }
}

/// Card whose catalog lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedLookup {
    pub name: String,
    pub reason: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output: PathBuf,
    pub cards: usize,
    pub pages: usize,
    /// Cards rendered without any catalog data.
    pub unknown: Vec<String>,
    pub failed: Vec<FailedLookup>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.unknown.is_empty() && self.failed.is_empty()
    }
}

/// Query the catalog once per entry, in name order, and summarise each card.
///
/// A failed query degrades that card to an empty summary unless `fail_fast`
/// is set, in which case the first failure is returned.
pub fn summarize_deck<C: CatalogSource + ?Sized>(
    entries: &[DeckEntry],
    catalog: &C,
    policy: ManySetsPolicy,
    fail_fast: bool,
) -> Result<Vec<CardSummary>> {
    let mut sorted: Vec<&DeckEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut summaries = Vec::with_capacity(sorted.len());
    for entry in sorted {
        info!("{}", entry.name);
        let summary = match catalog.printings(&entry.name) {
            Ok(raw) => CardSummary::from_printings(&entry.name, &raw, policy),
            Err(err) if fail_fast => {
                return Err(anyhow::Error::new(err)
                    .context(format!("catalog lookup failed for '{}'", entry.name)));
            }
            Err(err) => {
                warn!("catalog lookup failed for '{}': {}", entry.name, err);
                CardSummary::lookup_failed(&entry.name, err.to_string())
            }
        };
        if summary.status == CatalogStatus::Unknown {
            warn!("no usable printings for '{}'", entry.name);
        }
        summaries.push(summary);
    }
    Ok(summaries)
}

/// Load the deck list, failing before any catalog query is issued.
pub fn load_deck(path: &Path) -> Result<DeckList> {
    let deck = DeckList::load(path)
        .with_context(|| format!("failed to load deck list {}", path.display()))?;
    info!(
        "Loaded {} unique card(s), {} in total, from {}",
        deck.len(),
        deck.total_cards(),
        path.display()
    );
    Ok(deck)
}

/// Run the whole pipeline. Nothing is written unless every fatal step succeeds.
pub fn run<C: CatalogSource + ?Sized>(
    config: &RunConfig,
    catalog: &C,
    generated_on: NaiveDate,
) -> Result<RunReport> {
    let deck = load_deck(&config.deck_path)?;
    let summaries = summarize_deck(&deck.entries, catalog, config.many_sets, config.fail_fast)?;

    let mut unknown = Vec::new();
    let mut failed = Vec::new();
    for summary in &summaries {
        match &summary.status {
            CatalogStatus::Found => {}
            CatalogStatus::Unknown => unknown.push(summary.name.clone()),
            CatalogStatus::LookupFailed { reason } => failed.push(FailedLookup {
                name: summary.name.clone(),
                reason: reason.clone(),
            }),
        }
    }

    let composer = Composer::new(config.style, config.note.clone());
    let placeholders: Vec<Placeholder> = summaries.iter().map(|s| composer.compose(s)).collect();
    let grid = Grid::assemble(placeholders, config.columns);

    let options = DocumentOptions {
        title: DOCUMENT_TITLE,
        geometry: PageGeometry::landscape_letter(config.columns),
        generated_on,
    };
    let pages = render_document(&grid, &options, &config.output)
        .with_context(|| format!("failed to render {}", config.output.display()))?;
    info!(
        "Wrote {} placeholder(s) on {} page(s) to {}",
        grid.len(),
        pages,
        config.output.display()
    );

    Ok(RunReport {
        output: config.output.clone(),
        cards: grid.len(),
        pages,
        unknown,
        failed,
    })
}
