//! Compose the fixed-shape text block printed for each card.

use crate::domain::grid::GridItem;
use crate::domain::selector::SetAnnotation;
use crate::domain::summary::CardSummary;

/// Set annotations are padded to this many visual lines.
pub const SET_LINES: usize = 5;
/// Set annotations packed on each line.
pub const SETS_PER_LINE: usize = 2;
/// Separator between the faces of split and double-faced card names.
pub const MULTI_FACE_SEPARATOR: &str = "//";
/// Suffix marking a card with more than one face.
pub const MULTI_FACE_SUFFIX: &str = " [2]";
/// Joins the set lines inside a single text block.
pub const LINE_BREAK: &str = "\n";
/// Keeps a set line from being wrapped by the renderer.
pub const NBSP: char = '\u{a0}';

/// Font size and line spacing, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub leading: f32,
}

impl TextStyle {
    pub const fn new(font_size: f32, leading: f32) -> Self {
        Self { font_size, leading }
    }
}

/// Typography for every part of a placeholder. Built once per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderStyle {
    pub title: TextStyle,
    pub color: TextStyle,
    pub sets: TextStyle,
    pub notes: TextStyle,
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self {
            title: TextStyle::new(20.0, 24.0),
            color: TextStyle::new(14.0, 16.0),
            sets: TextStyle::new(8.0, 10.0),
            notes: TextStyle::new(14.0, 12.0),
        }
    }
}

/// Role of a block within a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    Color,
    Sets,
    Notes,
}

/// A paragraph of placeholder text. May contain [`LINE_BREAK`] markers.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub text: String,
    pub style: TextStyle,
}

impl TextBlock {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split(LINE_BREAK)
    }
}

/// The composed text for one card.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub name: String,
    pub blocks: Vec<TextBlock>,
}

impl Placeholder {
    pub fn block(&self, kind: BlockKind) -> Option<&TextBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }
}

impl GridItem for Placeholder {
    fn sort_name(&self) -> &str {
        &self.name
    }
}

/// Turns card summaries into placeholders using a fixed style and note.
#[derive(Debug, Clone)]
pub struct Composer {
    style: PlaceholderStyle,
    note: Option<String>,
}

impl Composer {
    /// An empty note is treated as no note.
    pub fn new(style: PlaceholderStyle, note: Option<String>) -> Self {
        Self {
            style,
            note: note.filter(|n| !n.is_empty()),
        }
    }

    pub fn compose(&self, summary: &CardSummary) -> Placeholder {
        let mut blocks = vec![
            TextBlock {
                kind: BlockKind::Title,
                text: title_for(&summary.name),
                style: self.style.title,
            },
            TextBlock {
                kind: BlockKind::Color,
                text: format!("Color: {}", summary.color_label),
                style: self.style.color,
            },
            TextBlock {
                kind: BlockKind::Sets,
                text: pack_set_lines(&summary.chosen_sets).join(LINE_BREAK),
                style: self.style.sets,
            },
        ];
        if let Some(note) = &self.note {
            blocks.push(TextBlock {
                kind: BlockKind::Notes,
                text: note.clone(),
                style: self.style.notes,
            });
        }
        Placeholder {
            name: summary.name.clone(),
            blocks,
        }
    }
}

/// Front-face name, suffixed with [`MULTI_FACE_SUFFIX`] for multi-face cards.
pub fn title_for(name: &str) -> String {
    match name.split_once(MULTI_FACE_SEPARATOR) {
        Some((front, _)) => format!("{}{}", front.trim_end(), MULTI_FACE_SUFFIX),
        None => name.to_string(),
    }
}

/// Pack annotations two per line with non-breaking spaces, then pad with
/// blank lines up to [`SET_LINES`]. Longer lists are never truncated.
pub fn pack_set_lines(sets: &[SetAnnotation]) -> Vec<String> {
    let mut lines: Vec<String> = sets
        .chunks(SETS_PER_LINE)
        .map(|chunk| {
            chunk
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
                .replace(' ', &NBSP.to_string())
        })
        .collect();
    for _ in 0..SET_LINES.saturating_sub(lines.len()) {
        lines.push(NBSP.to_string());
    }
    lines
}
