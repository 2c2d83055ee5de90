use std::num::NonZeroUsize;

/// Anything that can be placed in a [`Grid`].
pub trait GridItem {
    /// Key used for the alphabetical pre-sort.
    fn sort_name(&self) -> &str;
}

/// Cards laid out in fixed-width rows. Only the last row may be short.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: Vec<Vec<T>>,
}

impl<T: GridItem> Grid<T> {
    /// Sort `items` by name and chunk them into rows of `columns`.
    pub fn assemble(mut items: Vec<T>, columns: NonZeroUsize) -> Self {
        items.sort_by(|a, b| a.sort_name().cmp(b.sort_name()));
        let mut rows = Vec::with_capacity(items.len().div_ceil(columns.get()));
        let mut items = items.into_iter().peekable();
        while items.peek().is_some() {
            rows.push(items.by_ref().take(columns.get()).collect());
        }
        Self { rows }
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cards in layout order, left to right and top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().flatten()
    }

    /// Split rows into pages of at most `rows_per_page`.
    pub fn pages(&self, rows_per_page: NonZeroUsize) -> std::slice::Chunks<'_, Vec<T>> {
        self.rows.chunks(rows_per_page.get())
    }
}
