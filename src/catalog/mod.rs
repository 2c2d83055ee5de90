//! Print-catalog lookups.

mod scryfall;

pub use scryfall::{CardFace, SCRYFALL_API, ScryfallClient, ScryfallPrices, ScryfallPrinting};

use thiserror::Error;

use crate::domain::RawPrinting;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("failed to parse catalog response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{code}: {details}")]
    Api { code: String, details: String },
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
}

/// A source of every physical and digital printing of a card.
pub trait CatalogSource {
    /// All printings of the card named exactly `name`. A card the catalog
    /// does not know yields an empty list, not an error.
    fn printings(&self, name: &str) -> Result<Vec<RawPrinting>, CatalogError>;
}

impl<C: CatalogSource + ?Sized> CatalogSource for &C {
    fn printings(&self, name: &str) -> Result<Vec<RawPrinting>, CatalogError> {
        (**self).printings(name)
    }
}
