use serde::Serialize;

use crate::domain::printing::{COLORLESS, RawPrinting, filter_printings};
use crate::domain::selector::{
    ManySetsPolicy, SelectionBranch, SetAnnotation, SetBuckets, annotate, select_sets,
};

/// How much catalog data backed a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CatalogStatus {
    Found,
    /// Every printing was filtered out, or the catalog had none.
    Unknown,
    /// The catalog query itself failed.
    LookupFailed { reason: String },
}

/// Everything the placeholder needs to know about one deck card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub name: String,
    pub color_label: String,
    pub chosen_sets: Vec<SetAnnotation>,
    pub branch: SelectionBranch,
    #[serde(flatten)]
    pub status: CatalogStatus,
}

impl CardSummary {
    /// Summarise the raw catalog printings of `name`.
    pub fn from_printings(name: &str, raw: &[RawPrinting], policy: ManySetsPolicy) -> Self {
        let filtered = filter_printings(raw);
        let buckets = SetBuckets::from_printings(&filtered.printings);
        let selection = select_sets(&buckets, policy);
        let chosen_sets = annotate(&selection, &filtered.printings);
        let status = if filtered.is_empty() {
            CatalogStatus::Unknown
        } else {
            CatalogStatus::Found
        };
        Self {
            name: name.to_string(),
            color_label: filtered.color_label,
            chosen_sets,
            branch: selection.branch,
            status,
        }
    }

    /// Degraded summary for a card whose catalog lookup failed.
    pub fn lookup_failed<S: Into<String>>(name: &str, reason: S) -> Self {
        Self {
            name: name.to_string(),
            color_label: COLORLESS.to_string(),
            chosen_sets: Vec::new(),
            branch: SelectionBranch::NoPrintings,
            status: CatalogStatus::LookupFailed {
                reason: reason.into(),
            },
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self.status, CatalogStatus::Found)
    }
}
