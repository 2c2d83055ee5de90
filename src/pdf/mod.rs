//! Rendering helpers for producing the printable PDF grid.

mod geometry;
mod paint;

pub use geometry::{PageGeometry, wrap_text};
pub use paint::{DocumentOptions, RenderError, render_document};
