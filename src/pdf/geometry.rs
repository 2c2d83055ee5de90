use std::num::NonZeroUsize;

pub const MM_PER_INCH: f32 = 25.4;
pub const PT_PER_INCH: f32 = 72.0;

const CARD_WIDTH_IN: f32 = 2.5;
const CARD_HEIGHT_IN: f32 = 3.5;
/// Trimmed from each side of a card so cut placeholders fit in a sleeve.
const SPACER_IN: f32 = 0.20;
const LETTER_LONG_IN: f32 = 11.0;
const LETTER_SHORT_IN: f32 = 8.5;
const PAGE_MARGIN_IN: f32 = 0.25;
const FOOTER_HEIGHT_IN: f32 = 0.2;
/// Courier glyph advance as a fraction of the font size.
const COURIER_ADVANCE: f32 = 0.6;
/// Inner cell padding, in points.
pub const CELL_PADDING_X_PT: f32 = 6.0;
pub const CELL_PADDING_Y_PT: f32 = 3.0;

/// Page size and cell layout. Coordinates are inches from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_in: f32,
    pub page_height_in: f32,
    pub margin_in: f32,
    pub cell_width_in: f32,
    pub cell_height_in: f32,
    pub columns: NonZeroUsize,
}

impl PageGeometry {
    /// Landscape US Letter with card-sized cells.
    pub fn landscape_letter(columns: NonZeroUsize) -> Self {
        Self {
            page_width_in: LETTER_LONG_IN,
            page_height_in: LETTER_SHORT_IN,
            margin_in: PAGE_MARGIN_IN,
            cell_width_in: CARD_WIDTH_IN - 2.0 * SPACER_IN,
            cell_height_in: CARD_HEIGHT_IN - 2.0 * SPACER_IN,
            columns,
        }
    }

    pub fn grid_width_in(&self) -> f32 {
        self.columns.get() as f32 * self.cell_width_in
    }

    /// Whether a full row fits between the side margins.
    pub fn row_fits(&self) -> bool {
        self.grid_width_in() <= self.page_width_in - 2.0 * self.margin_in + f32::EPSILON
    }

    /// Grid rows per page; always at least one.
    pub fn rows_per_page(&self) -> NonZeroUsize {
        let usable = self.page_height_in - 2.0 * self.margin_in - FOOTER_HEIGHT_IN;
        let rows = (usable / self.cell_height_in).floor().max(1.0) as usize;
        NonZeroUsize::new(rows).unwrap_or(NonZeroUsize::MIN)
    }

    /// Top-left corner of a cell. The grid is centred horizontally.
    pub fn cell_origin(&self, row: usize, column: usize) -> (f32, f32) {
        let left = ((self.page_width_in - self.grid_width_in()) / 2.0).max(0.0);
        let x = left + column as f32 * self.cell_width_in;
        let y = self.page_height_in - self.margin_in - row as f32 * self.cell_height_in;
        (x, y)
    }

    pub fn footer_baseline_in(&self) -> f32 {
        self.margin_in
    }

    /// Monospaced characters that fit across a cell at `font_size` points.
    pub fn chars_per_line(&self, font_size: f32) -> usize {
        let usable_pt = self.cell_width_in * PT_PER_INCH - 2.0 * CELL_PADDING_X_PT;
        ((usable_pt / (COURIER_ADVANCE * font_size)).floor() as usize).max(1)
    }
}

pub fn in_to_mm(inches: f32) -> f32 {
    inches * MM_PER_INCH
}

pub fn pt_to_in(points: f32) -> f32 {
    points / PT_PER_INCH
}

/// Greedy word wrap on ASCII spaces. Non-breaking spaces never split and a
/// word wider than `width` is left whole on its own line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
