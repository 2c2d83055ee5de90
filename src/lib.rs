//! Core library for turning deck lists into printable placeholder cards.

pub mod catalog;
pub mod domain;
pub mod pdf;
pub mod pipeline;

pub use crate::domain::{
    BlockKind, CardSummary, CatalogStatus, Composer, DeckEntry, DeckError, DeckList, Grid,
    GridItem, MANY_SETS, MAX_LISTED_SETS, ManySetsPolicy, Placeholder, PlaceholderStyle,
    RawPrinting, SelectionBranch, SetAnnotation,
};
pub use catalog::{CatalogError, CatalogSource};

use anyhow::Result;

/// Summarise the printings of one card under the given policy.
pub fn summarize_card(
    catalog: &dyn CatalogSource,
    name: &str,
    policy: ManySetsPolicy,
) -> Result<CardSummary> {
    let raw = catalog.printings(name)?;
    Ok(CardSummary::from_printings(name, &raw, policy))
}
