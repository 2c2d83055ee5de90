//! Core domain primitives: deck lists, printings, set selection, placeholders and the grid.

pub mod deck;
pub mod grid;
pub mod placeholder;
pub mod printing;
pub mod selector;
pub mod summary;

pub use deck::{DeckEntry, DeckError, DeckFormat, DeckList};
pub use grid::{Grid, GridItem};
pub use placeholder::{BlockKind, Composer, Placeholder, PlaceholderStyle, TextBlock, TextStyle};
pub use printing::{
    COLORLESS, FilteredPrintings, LEGACY_SET_CODES, Printing, Rarity, RawPrinting, SetCode,
    SetType, filter_printings, try_parse_price,
};
pub use selector::{
    MANY_SETS, MAX_LISTED_SETS, ManySetsPolicy, Selection, SelectionBranch, SetAnnotation,
    SetBuckets, annotate, select_sets,
};
pub use summary::{CardSummary, CatalogStatus};
