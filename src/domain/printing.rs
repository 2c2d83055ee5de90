use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

/// Historical set codes that never count as collectable printings.
pub const LEGACY_SET_CODES: [&str; 5] = ["LEA", "LEB", "SUM", "4BB", "FBB"];

/// Colour label used when no printing carries colour information.
pub const COLORLESS: &str = "C";

const SET_CODE_LEN: usize = 3;

/// Classification of the set a card was printed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SetType {
    Core,
    Expansion,
    Commander,
    Other(String),
}

impl SetType {
    pub fn as_str(&self) -> &str {
        match self {
            SetType::Core => "core",
            SetType::Expansion => "expansion",
            SetType::Commander => "commander",
            SetType::Other(raw) => raw,
        }
    }
}

impl From<String> for SetType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "core" => SetType::Core,
            "expansion" => SetType::Expansion,
            "commander" => SetType::Commander,
            _ => SetType::Other(value),
        }
    }
}

impl From<&str> for SetType {
    fn from(value: &str) -> Self {
        SetType::from(value.to_string())
    }
}

impl From<SetType> for String {
    fn from(value: SetType) -> String {
        value.as_str().to_string()
    }
}

/// Printing rarity as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Special,
    Bonus,
    Other(String),
}

impl Rarity {
    pub fn as_str(&self) -> &str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
            Rarity::Special => "special",
            Rarity::Bonus => "bonus",
            Rarity::Other(raw) => raw,
        }
    }

    /// First letter of the rarity name, uppercased (`rare` -> `R`).
    pub fn letter(&self) -> Option<char> {
        self.as_str()
            .chars()
            .next()
            .and_then(|ch| ch.to_uppercase().next())
    }
}

impl From<String> for Rarity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "common" => Rarity::Common,
            "uncommon" => Rarity::Uncommon,
            "rare" => Rarity::Rare,
            "mythic" => Rarity::Mythic,
            "special" => Rarity::Special,
            "bonus" => Rarity::Bonus,
            _ => Rarity::Other(value),
        }
    }
}

impl From<&str> for Rarity {
    fn from(value: &str) -> Self {
        Rarity::from(value.to_string())
    }
}

impl From<Rarity> for String {
    fn from(value: Rarity) -> String {
        value.as_str().to_string()
    }
}

/// One historical printing of a card, as received from the catalog.
///
/// Set codes arrive in whatever case the catalog uses and prices as raw
/// text; [`filter_printings`] canonicalises both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrinting {
    pub set_code: String,
    pub set_type: SetType,
    pub rarity: Rarity,
    pub price_usd: Option<String>,
    /// Card-level colours. `None` when the catalog omits the field.
    pub colors: Option<Vec<String>>,
    /// Colours of the first card face, used when `colors` is absent.
    pub face_colors: Option<Vec<String>>,
    pub available_in_paper: bool,
}

impl RawPrinting {
    /// A paper printing with no rarity, price or colour data.
    pub fn paper<S: Into<String>, T: Into<SetType>>(set_code: S, set_type: T) -> Self {
        Self {
            set_code: set_code.into(),
            set_type: set_type.into(),
            rarity: Rarity::Other(String::new()),
            price_usd: None,
            colors: None,
            face_colors: None,
            available_in_paper: true,
        }
    }

    pub fn with_rarity<R: Into<Rarity>>(mut self, rarity: R) -> Self {
        self.rarity = rarity.into();
        self
    }

    pub fn with_price<S: Into<String>>(mut self, price: S) -> Self {
        self.price_usd = Some(price.into());
        self
    }

    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = Some(colors.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_face_colors(mut self, colors: &[&str]) -> Self {
        self.face_colors = Some(colors.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn digital_only(mut self) -> Self {
        self.available_in_paper = false;
        self
    }

    /// Colour symbols for this printing, falling back to the first face.
    pub fn color_symbols(&self) -> Option<&[String]> {
        self.colors
            .as_deref()
            .or_else(|| self.face_colors.as_deref())
    }
}

/// Canonical three-character set code, never one of [`LEGACY_SET_CODES`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SetCode(String);

impl SetCode {
    /// Uppercase `raw` and accept it only if it is an eligible set code.
    pub fn canonicalize(raw: &str) -> Option<Self> {
        let code = raw.to_uppercase();
        if code.chars().count() != SET_CODE_LEN || LEGACY_SET_CODES.contains(&code.as_str()) {
            return None;
        }
        Some(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A printing that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Printing {
    pub set_code: SetCode,
    pub set_type: SetType,
    pub rarity_letter: Option<char>,
    pub price_text: Option<String>,
}

/// Result of filtering every printing of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredPrintings {
    pub color_label: String,
    pub printings: Vec<Printing>,
}

impl FilteredPrintings {
    pub fn is_empty(&self) -> bool {
        self.printings.is_empty()
    }
}

/// Parse a USD price, returning `None` for absent, malformed or non-finite input.
pub fn try_parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Two fraction digits, zero padded to five characters (`2.5` -> `02.50`).
pub fn format_price(value: f64) -> String {
    format!("{:05.2}", value)
}

/// Drop digital-only and ineligible printings and derive the colour label.
///
/// The colour label comes from the first paper printing that carries a
/// non-empty colour list, checked before set-code eligibility. It is
/// [`COLORLESS`] when no printing supplies one.
pub fn filter_printings(raw: &[RawPrinting]) -> FilteredPrintings {
    let mut color_label: Option<String> = None;
    let mut printings = Vec::with_capacity(raw.len());

    for record in raw {
        if !record.available_in_paper {
            debug!("skipping digital-only printing {}", record.set_code);
            continue;
        }
        if color_label.is_none() {
            if let Some(symbols) = record.color_symbols().filter(|s| !s.is_empty()) {
                color_label = Some(symbols.join("/"));
            }
        }
        let Some(set_code) = SetCode::canonicalize(&record.set_code) else {
            debug!("skipping ineligible set code {}", record.set_code);
            continue;
        };
        let price_text = record
            .price_usd
            .as_deref()
            .and_then(try_parse_price)
            .map(format_price);
        printings.push(Printing {
            set_code,
            set_type: record.set_type.clone(),
            rarity_letter: record.rarity.letter(),
            price_text,
        });
    }

    FilteredPrintings {
        color_label: color_label.unwrap_or_else(|| COLORLESS.to_string()),
        printings,
    }
}
