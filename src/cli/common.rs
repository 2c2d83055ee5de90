//! Shared clap helper types for CLI commands.

use std::time::Duration;

use card_placeholders::ManySetsPolicy;
use card_placeholders::catalog::SCRYFALL_API;
use clap::{Args, ValueEnum};

/// What to print when a card has too many collectable sets.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ManySetsArg {
    /// Always print the `[ManySets]` marker.
    Sentinel,
    /// List the commander printings instead when there are few enough.
    PreferCommander,
}

impl From<ManySetsArg> for ManySetsPolicy {
    fn from(value: ManySetsArg) -> ManySetsPolicy {
        match value {
            ManySetsArg::Sentinel => ManySetsPolicy::Sentinel,
            ManySetsArg::PreferCommander => ManySetsPolicy::PreferCommander,
        }
    }
}

/// Catalog connection flags shared by every command that queries cards.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Base URL of the Scryfall-compatible catalog API.
    #[arg(long = "catalog-url", default_value = SCRYFALL_API)]
    pub catalog_url: String,
    /// Minimum delay between catalog requests, in milliseconds.
    #[arg(long = "request-delay-ms", default_value_t = 100)]
    pub request_delay_ms: u64,
}

impl CatalogArgs {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}
