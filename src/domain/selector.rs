//! Decide which printings of a card are worth listing on its placeholder.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::domain::printing::{Printing, SetCode, SetType};

/// Collectable sets beyond this count are not enumerated.
pub const MAX_LISTED_SETS: usize = 10;

/// Display token used instead of a set list when a card has too many printings.
pub const MANY_SETS: &str = "[ManySets]";

/// What to show when a card has more than [`MAX_LISTED_SETS`] collectable sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManySetsPolicy {
    /// Always show [`MANY_SETS`], even if the commander printings would fit.
    #[default]
    Sentinel,
    /// Show the commander printings when there are between 1 and
    /// [`MAX_LISTED_SETS`] of them, otherwise [`MANY_SETS`].
    PreferCommander,
}

/// Which rule produced a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionBranch {
    /// Core and expansion sets listed directly.
    Collectible,
    /// Too many collectable sets; the sentinel is shown.
    ManySets,
    /// Too many collectable sets; the commander sets are shown instead.
    CommanderOverflow,
    /// No core or expansion printing; every remaining set is listed.
    AllPrintings,
    /// Nothing survived filtering.
    NoPrintings,
}

/// Printings of one card grouped by set type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetBuckets {
    pub core: BTreeSet<SetCode>,
    pub expansion: BTreeSet<SetCode>,
    pub commander: BTreeSet<SetCode>,
    pub other: BTreeSet<SetCode>,
}

impl SetBuckets {
    pub fn from_printings(printings: &[Printing]) -> Self {
        let mut buckets = Self::default();
        for printing in printings {
            let bucket = match printing.set_type {
                SetType::Core => &mut buckets.core,
                SetType::Expansion => &mut buckets.expansion,
                SetType::Commander => &mut buckets.commander,
                SetType::Other(_) => &mut buckets.other,
            };
            bucket.insert(printing.set_code.clone());
        }
        buckets
    }

    /// Core and expansion sets, merged.
    pub fn collectible(&self) -> BTreeSet<&SetCode> {
        self.core.iter().chain(&self.expansion).collect()
    }

    /// Every set across all four buckets.
    pub fn all(&self) -> BTreeSet<&SetCode> {
        self.core
            .iter()
            .chain(&self.expansion)
            .chain(&self.commander)
            .chain(&self.other)
            .collect()
    }
}

/// Ordered display codes plus the rule that chose them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub branch: SelectionBranch,
    pub codes: Vec<String>,
}

impl Selection {
    fn listed<'a, I: IntoIterator<Item = &'a SetCode>>(branch: SelectionBranch, codes: I) -> Self {
        Self {
            branch,
            codes: codes.into_iter().map(|c| c.as_str().to_string()).collect(),
        }
    }

    fn sentinel() -> Self {
        Self {
            branch: SelectionBranch::ManySets,
            codes: vec![MANY_SETS.to_string()],
        }
    }
}

/// Pick the set codes to display. Codes come out in ascending order, except
/// for the single-token sentinel.
pub fn select_sets(buckets: &SetBuckets, policy: ManySetsPolicy) -> Selection {
    let collectible = buckets.collectible();

    if collectible.len() > MAX_LISTED_SETS {
        let commander_fits =
            !buckets.commander.is_empty() && buckets.commander.len() <= MAX_LISTED_SETS;
        return match policy {
            ManySetsPolicy::PreferCommander if commander_fits => {
                Selection::listed(SelectionBranch::CommanderOverflow, &buckets.commander)
            }
            _ => Selection::sentinel(),
        };
    }

    if collectible.is_empty() {
        let all = buckets.all();
        let branch = if all.is_empty() {
            SelectionBranch::NoPrintings
        } else {
            SelectionBranch::AllPrintings
        };
        return Selection::listed(branch, all);
    }

    Selection::listed(SelectionBranch::Collectible, collectible)
}

/// A displayed set code with its optional rarity and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetAnnotation {
    pub set_code: String,
    pub rarity_letter: Option<char>,
    pub price_text: Option<String>,
}

impl fmt::Display for SetAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rarity_letter {
            Some(rarity) => write!(
                f,
                "{}[{}]({})",
                self.set_code,
                rarity,
                self.price_text.as_deref().unwrap_or("")
            ),
            None => f.write_str(&self.set_code),
        }
    }
}

/// Attach rarity and price to each selected code. Later printings of the
/// same set override earlier rarities; a price is only replaced by another
/// parsed price.
pub fn annotate(selection: &Selection, printings: &[Printing]) -> Vec<SetAnnotation> {
    let mut rarities: BTreeMap<&str, char> = BTreeMap::new();
    let mut prices: BTreeMap<&str, &str> = BTreeMap::new();
    for printing in printings {
        let code = printing.set_code.as_str();
        if let Some(letter) = printing.rarity_letter {
            rarities.insert(code, letter);
        }
        if let Some(price) = printing.price_text.as_deref() {
            prices.insert(code, price);
        }
    }

    selection
        .codes
        .iter()
        .map(|code| SetAnnotation {
            set_code: code.clone(),
            rarity_letter: rarities.get(code.as_str()).copied(),
            price_text: prices.get(code.as_str()).map(|p| p.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::printing::{RawPrinting, filter_printings};
    use pretty_assertions::assert_eq;

    fn buckets(raw: &[RawPrinting]) -> SetBuckets {
        SetBuckets::from_printings(&filter_printings(raw).printings)
    }

    fn numbered(prefix: &str, count: usize, set_type: &str) -> Vec<RawPrinting> {
        (0..count)
            .map(|i| RawPrinting::paper(format!("{prefix}{i:02}"), set_type))
            .collect()
    }

    #[test]
    fn small_collectible_list_is_sorted_and_excludes_commander() {
        let raw = vec![
            RawPrinting::paper("m19", "core"),
            RawPrinting::paper("dom", "expansion"),
            RawPrinting::paper("c18", "commander"),
            RawPrinting::paper("plst", "other"),
            RawPrinting::paper("sld", "box"),
        ];
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::Sentinel);
        assert_eq!(selection.branch, SelectionBranch::Collectible);
        assert_eq!(selection.codes, vec!["DOM", "M19"]);
    }

    #[test]
    fn duplicate_codes_are_merged() {
        let raw = vec![
            RawPrinting::paper("m19", "core"),
            RawPrinting::paper("M19", "core"),
        ];
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::Sentinel);
        assert_eq!(selection.codes, vec!["M19"]);
    }

    #[test]
    fn exactly_ten_collectible_sets_are_listed() {
        let raw = numbered("X", 10, "expansion");
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::Sentinel);
        assert_eq!(selection.branch, SelectionBranch::Collectible);
        assert_eq!(selection.codes.len(), 10);
    }

    #[test]
    fn sentinel_wins_regardless_of_commander_count() {
        let mut raw = numbered("X", 6, "core");
        raw.extend(numbered("Y", 5, "expansion"));
        raw.extend(numbered("C", 2, "commander"));
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::Sentinel);
        assert_eq!(selection.branch, SelectionBranch::ManySets);
        assert_eq!(selection.codes, vec![MANY_SETS]);

        let mut raw = numbered("X", 11, "core");
        raw.extend(numbered("C", 12, "commander"));
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::Sentinel);
        assert_eq!(selection.codes, vec![MANY_SETS]);
    }

    #[test]
    fn prefer_commander_lists_commander_sets_when_they_fit() {
        let mut raw = numbered("X", 11, "expansion");
        raw.push(RawPrinting::paper("c18", "commander"));
        raw.push(RawPrinting::paper("c16", "commander"));
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::PreferCommander);
        assert_eq!(selection.branch, SelectionBranch::CommanderOverflow);
        assert_eq!(selection.codes, vec!["C16", "C18"]);
    }

    #[test]
    fn prefer_commander_falls_back_to_sentinel() {
        let raw = numbered("X", 11, "expansion");
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::PreferCommander);
        assert_eq!(selection.branch, SelectionBranch::ManySets);

        let mut raw = numbered("X", 11, "expansion");
        raw.extend(numbered("C", 11, "commander"));
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::PreferCommander);
        assert_eq!(selection.codes, vec![MANY_SETS]);
    }

    #[test]
    fn no_collectible_sets_lists_every_bucket() {
        let raw = vec![
            RawPrinting::paper("plst", "other"),
            RawPrinting::paper("c18", "commander"),
            RawPrinting::paper("pls", "promo"),
            RawPrinting::paper("cmr", "draft_innovation"),
        ];
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::Sentinel);
        assert_eq!(selection.branch, SelectionBranch::AllPrintings);
        assert_eq!(selection.codes, vec!["C18", "CMR", "PLS"]);
    }

    #[test]
    fn nothing_left_yields_empty_selection() {
        let raw = vec![RawPrinting::paper("lea", "core"), RawPrinting::paper("pmei", "promo")];
        let selection = select_sets(&buckets(&raw), ManySetsPolicy::Sentinel);
        assert_eq!(selection.branch, SelectionBranch::NoPrintings);
        assert!(selection.codes.is_empty());
    }

    #[test]
    fn annotation_formats_rarity_and_price() {
        let raw = vec![
            RawPrinting::paper("lea", "core").with_rarity("rare"),
            RawPrinting::paper("m19", "core").with_rarity("rare").with_price("12.34"),
            RawPrinting::paper("c18", "commander"),
        ];
        let filtered = filter_printings(&raw);
        let selection = select_sets(
            &SetBuckets::from_printings(&filtered.printings),
            ManySetsPolicy::Sentinel,
        );
        let annotated = annotate(&selection, &filtered.printings);
        let rendered: Vec<String> = annotated.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["M19[R](12.34)"]);
    }

    #[test]
    fn rarity_without_price_keeps_empty_parens_and_sentinel_is_bare() {
        let with_rarity = SetAnnotation {
            set_code: "DOM".to_string(),
            rarity_letter: Some('U'),
            price_text: None,
        };
        assert_eq!(with_rarity.to_string(), "DOM[U]()");

        let printings = filter_printings(&[RawPrinting::paper("dom", "expansion")]).printings;
        let annotated = annotate(&Selection::sentinel(), &printings);
        assert_eq!(annotated[0].to_string(), MANY_SETS);
    }

    #[test]
    fn later_price_overrides_but_failed_parse_does_not_clear() {
        let raw = vec![
            RawPrinting::paper("m19", "core").with_rarity("common").with_price("1.00"),
            RawPrinting::paper("m19", "core").with_rarity("rare").with_price("oops"),
        ];
        let filtered = filter_printings(&raw);
        let selection = select_sets(
            &SetBuckets::from_printings(&filtered.printings),
            ManySetsPolicy::Sentinel,
        );
        let annotated = annotate(&selection, &filtered.printings);
        assert_eq!(annotated[0].to_string(), "M19[R](01.00)");
    }
}
