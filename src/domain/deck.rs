use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// One unique card requested by the deck list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckEntry {
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("unsupported deck list format '{0}'")]
    UnsupportedFormat(String),
    #[error("failed to read deck list {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
    #[error("deck list contains no cards")]
    Empty,
}

/// Deck list layouts that can be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckFormat {
    /// `4 Lightning Bolt`, Arena exports and MWS-style lines.
    PlainText,
}

impl DeckFormat {
    /// Pick the format from the file extension.
    pub fn detect(path: &Path) -> Result<Self, DeckError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            None | Some("txt") | Some("dec") | Some("deck") | Some("mwdeck") => {
                Ok(DeckFormat::PlainText)
            }
            Some(other) => Err(DeckError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parsed deck list, one entry per unique card name in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckList {
    pub entries: Vec<DeckEntry>,
}

const SECTION_HEADERS: [&str; 6] = [
    "deck",
    "main",
    "commander",
    "companion",
    "sideboard",
    "maybeboard",
];

impl DeckList {
    /// Read and parse a deck list. Unsupported formats fail before the file is opened.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let format = DeckFormat::detect(path)?;
        let contents = fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match format {
            DeckFormat::PlainText => Self::parse_text(&contents),
        }
    }

    pub fn parse_text(contents: &str) -> Result<Self, DeckError> {
        let mut merged: BTreeMap<String, u32> = BTreeMap::new();
        for (idx, raw) in contents.lines().enumerate() {
            let line = idx + 1;
            if let Some((quantity, name)) = parse_line(raw, line)? {
                let total = merged.entry(name).or_insert(0);
                *total = total
                    .checked_add(quantity)
                    .ok_or_else(|| DeckError::InvalidLine {
                        line,
                        reason: "quantity too large".to_string(),
                    })?;
            }
        }
        if merged.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self {
            entries: merged
                .into_iter()
                .map(|(name, quantity)| DeckEntry { name, quantity })
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_cards(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }
}

fn parse_line(raw: &str, line: usize) -> Result<Option<(u32, String)>, DeckError> {
    let mut text = raw.trim();
    if text.is_empty() || text.starts_with('#') || text.starts_with("//") {
        return Ok(None);
    }
    let header = text.trim_end_matches(':').to_ascii_lowercase();
    if SECTION_HEADERS.contains(&header.as_str()) {
        return Ok(None);
    }
    if let Some(rest) = strip_prefix_ignore_case(text, "SB:") {
        text = rest.trim_start();
    }

    let (quantity, rest) = split_quantity(text, line)?;
    let name = strip_set_markers(rest);
    if name.is_empty() {
        return Err(DeckError::InvalidLine {
            line,
            reason: "missing card name".to_string(),
        });
    }
    Ok(Some((quantity, name.to_string())))
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

/// Leading `N` or `Nx` quantity; a line without one counts as a single copy.
/// A bare quantity leaves an empty name.
fn split_quantity(text: &str, line: usize) -> Result<(u32, &str), DeckError> {
    let (first, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let digits = first
        .strip_suffix(|c: char| c == 'x' || c == 'X')
        .unwrap_or(first);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Ok((1, text));
    }
    let quantity: u32 = digits.parse().map_err(|_| DeckError::InvalidLine {
        line,
        reason: format!("quantity '{}' is too large", first),
    })?;
    if quantity == 0 {
        return Err(DeckError::InvalidLine {
            line,
            reason: "quantity must be at least 1".to_string(),
        });
    }
    Ok((quantity, rest.trim_start()))
}

/// Drop an MWS `[SET]` prefix and an Arena `(SET) 123` suffix.
fn strip_set_markers(text: &str) -> &str {
    let mut name = text.trim();
    if name.starts_with('[') {
        if let Some(end) = name.find(']') {
            name = name[end + 1..].trim_start();
        }
    }
    if let Some(start) = name.rfind(" (") {
        let tail = &name[start + 2..];
        if let Some(close) = tail.find(')') {
            let code = &tail[..close];
            let after = tail[close + 1..].trim();
            let looks_like_set = !code.is_empty()
                && code.len() <= 6
                && code.chars().all(|c| c.is_ascii_alphanumeric());
            if looks_like_set && after.chars().all(|c| !c.is_whitespace()) {
                name = name[..start].trim_end();
            }
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn names(deck: &DeckList) -> Vec<&str> {
        deck.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn plain_lines_with_and_without_x() {
        let deck = DeckList::parse_text("4 Lightning Bolt\n2x Counterspell\nIsland\n").unwrap();
        assert_eq!(
            deck.entries,
            vec![
                DeckEntry {
                    name: "Counterspell".into(),
                    quantity: 2,
                },
                DeckEntry {
                    name: "Island".into(),
                    quantity: 1,
                },
                DeckEntry {
                    name: "Lightning Bolt".into(),
                    quantity: 4,
                },
            ]
        );
        assert_eq!(deck.total_cards(), 7);
    }

    #[test]
    fn headers_comments_and_sideboard_markers() {
        let text = "// Burn\n# comment\nDeck\n4 Shock\n\nSideboard:\nSB: 2 Duress\n";
        let deck = DeckList::parse_text(text).unwrap();
        assert_eq!(names(&deck), vec!["Duress", "Shock"]);
    }

    #[test]
    fn arena_and_mws_set_markers_are_stripped() {
        let text = "1 Fire // Ice (MH2) 290\n3 [M19] Shock\n1 Borrowing 100,000 Arrows\n";
        let deck = DeckList::parse_text(text).unwrap();
        assert_eq!(names(&deck), vec!["Borrowing 100,000 Arrows", "Fire // Ice", "Shock"]);
    }

    #[test]
    fn repeated_names_are_merged() {
        let deck = DeckList::parse_text("2 Opt\nSB: 1 Opt\n").unwrap();
        assert_eq!(
            deck.entries,
            vec![DeckEntry {
                name: "Opt".into(),
                quantity: 3,
            }]
        );
    }

    #[test]
    fn zero_quantity_is_rejected_with_line_number() {
        match DeckList::parse_text("1 Opt\n0 Shock\n") {
            Err(DeckError::InvalidLine { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected invalid line, got {other:?}"),
        }
    }

    #[test]
    fn bare_quantity_is_missing_a_name() {
        for text in ["1 Opt\n4\n", "1 Opt\n2x\n"] {
            match DeckList::parse_text(text) {
                Err(DeckError::InvalidLine { line, reason }) => {
                    assert_eq!(line, 2);
                    assert_eq!(reason, "missing card name");
                }
                other => panic!("expected invalid line, got {other:?}"),
            }
        }
    }

    #[test]
    fn merged_quantity_overflow_is_rejected() {
        match DeckList::parse_text("4000000000 Opt\n4000000000 Opt\n") {
            Err(DeckError::InvalidLine { line, reason }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, "quantity too large");
            }
            other => panic!("expected invalid line, got {other:?}"),
        }
    }

    #[test]
    fn total_cards_does_not_overflow() {
        let deck = DeckList::parse_text("4000000000 Opt\n4000000000 Shock\n").unwrap();
        assert_eq!(deck.total_cards(), 8_000_000_000);
    }

    #[test]
    fn deck_without_cards_is_an_error() {
        assert!(matches!(DeckList::parse_text("Deck\n// nothing\n"), Err(DeckError::Empty)));
    }

    #[test]
    fn unknown_extensions_are_unsupported() {
        assert_eq!(DeckFormat::detect(&PathBuf::from("deck.txt")).unwrap(), DeckFormat::PlainText);
        assert_eq!(DeckFormat::detect(&PathBuf::from("deck")).unwrap(), DeckFormat::PlainText);
        assert!(matches!(
            DeckFormat::detect(&PathBuf::from("deck.dek")),
            Err(DeckError::UnsupportedFormat(ext)) if ext == "dek"
        ));
    }
}
