use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, warn};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use thiserror::Error;

use super::geometry::{
    CELL_PADDING_X_PT, CELL_PADDING_Y_PT, PageGeometry, in_to_mm, pt_to_in, wrap_text,
};
use crate::domain::placeholder::NBSP;
use crate::domain::{Grid, Placeholder};

const LAYER_NAME: &str = "Placeholders";
const BORDER_THICKNESS_PT: f32 = 0.25;
const FOOTER_FONT_SIZE: f32 = 8.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Options for one rendered document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentOptions<'a> {
    pub title: &'a str,
    pub geometry: PageGeometry,
    /// Printed in the footer of every page.
    pub generated_on: NaiveDate,
}

/// Draw the grid onto as many pages as needed and write the PDF to `path`,
/// replacing any existing file. Returns the number of pages written.
pub fn render_document(
    grid: &Grid<Placeholder>,
    options: &DocumentOptions<'_>,
    path: &Path,
) -> Result<usize, RenderError> {
    let geometry = &options.geometry;
    if !geometry.row_fits() {
        warn!(
            "{} columns ({:.2}in) are wider than the page; cells will overflow",
            geometry.columns,
            geometry.grid_width_in()
        );
    }

    let page_w = Mm(in_to_mm(geometry.page_width_in));
    let page_h = Mm(in_to_mm(geometry.page_height_in));
    let (doc, first_page, first_layer) = PdfDocument::new(options.title, page_w, page_h, LAYER_NAME);
    let font = doc.add_builtin_font(BuiltinFont::Courier)?;

    let pages: Vec<&[Vec<Placeholder>]> = grid.pages(geometry.rows_per_page()).collect();
    let page_count = pages.len().max(1);

    for page_idx in 0..page_count {
        let layer = if page_idx == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(page_w, page_h, LAYER_NAME);
            doc.get_page(page).get_layer(layer)
        };
        layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        layer.set_outline_thickness(BORDER_THICKNESS_PT);

        let rows = pages.get(page_idx).copied().unwrap_or_default();
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, placeholder) in row.iter().enumerate() {
                let (x, y) = geometry.cell_origin(row_idx, col_idx);
                draw_cell(&layer, &font, geometry, x, y, placeholder);
            }
        }
        draw_footer(&layer, &font, options, page_idx + 1, page_count);
        debug!("drew page {}/{}", page_idx + 1, page_count);
    }

    let staging = staging_path(path);
    if let Err(err) = save_to(doc, &staging).and_then(|()| {
        fs::rename(&staging, path).map_err(|source| io_error(path, source))
    }) {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }
    Ok(page_count)
}

/// Sibling file the document is written to before it replaces `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| OsStr::new("output")));
    name.push(".part");
    path.with_file_name(name)
}

fn save_to(doc: PdfDocumentReference, path: &Path) -> Result<(), RenderError> {
    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)?;
    writer.flush().map_err(|source| io_error(path, source))?;
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn draw_cell(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    geometry: &PageGeometry,
    left: f32,
    top: f32,
    placeholder: &Placeholder,
) {
    let right = left + geometry.cell_width_in;
    let bottom = top - geometry.cell_height_in;
    layer.add_line(Line {
        points: vec![
            (point(left, top), false),
            (point(right, top), false),
            (point(right, bottom), false),
            (point(left, bottom), false),
        ],
        is_closed: true,
    });

    let text_x = left + pt_to_in(CELL_PADDING_X_PT);
    let mut cursor = top - pt_to_in(CELL_PADDING_Y_PT);
    for block in &placeholder.blocks {
        let width = geometry.chars_per_line(block.style.font_size);
        for line in block.lines() {
            for wrapped in wrap_text(line, width) {
                cursor -= pt_to_in(block.style.leading);
                let text: String = wrapped
                    .chars()
                    .map(|c| if c == NBSP { ' ' } else { c })
                    .collect();
                layer.use_text(
                    text,
                    block.style.font_size,
                    Mm(in_to_mm(text_x)),
                    Mm(in_to_mm(cursor)),
                    font,
                );
            }
        }
    }
}

fn draw_footer(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    options: &DocumentOptions<'_>,
    page: usize,
    page_count: usize,
) {
    let geometry = &options.geometry;
    let text = format!(
        "{}  page {}/{}  {}",
        options.title,
        page,
        page_count,
        options.generated_on.format("%Y-%m-%d")
    );
    layer.use_text(
        text,
        FOOTER_FONT_SIZE,
        Mm(in_to_mm(geometry.margin_in)),
        Mm(in_to_mm(geometry.footer_baseline_in())),
        font,
    );
}

fn point(x_in: f32, y_in: f32) -> Point {
    Point::new(Mm(in_to_mm(x_in)), Mm(in_to_mm(y_in)))
}
