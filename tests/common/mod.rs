//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use card_placeholders::{CatalogError, CatalogSource, RawPrinting};
use tempfile::TempDir;

/// In-memory catalog that records every query it receives.
#[derive(Default)]
pub struct FakeCatalog {
    cards: HashMap<String, Vec<RawPrinting>>,
    failing: HashMap<String, String>,
    pub queries: RefCell<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card(mut self, name: &str, printings: Vec<RawPrinting>) -> Self {
        self.cards.insert(name.to_string(), printings);
        self
    }

    pub fn with_failure(mut self, name: &str, details: &str) -> Self {
        self.failing.insert(name.to_string(), details.to_string());
        self
    }

    pub fn queried(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl CatalogSource for FakeCatalog {
    fn printings(&self, name: &str) -> Result<Vec<RawPrinting>, CatalogError> {
        self.queries.borrow_mut().push(name.to_string());
        if let Some(details) = self.failing.get(name) {
            return Err(CatalogError::Api {
                code: "unavailable".to_string(),
                details: details.clone(),
            });
        }
        Ok(self.cards.get(name).cloned().unwrap_or_default())
    }
}

/// Write `contents` to `file_name` inside a fresh temporary directory.
pub fn write_deck(file_name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(file_name);
    fs::write(&path, contents).unwrap();
    (dir, path)
}

pub fn shock() -> Vec<RawPrinting> {
    vec![
        RawPrinting::paper("lea", "core").with_rarity("rare").with_colors(&["R"]),
        RawPrinting::paper("m19", "core")
            .with_rarity("rare")
            .with_price("12.34")
            .with_colors(&["R"]),
        RawPrinting::paper("c18", "commander").with_rarity("rare"),
    ]
}
