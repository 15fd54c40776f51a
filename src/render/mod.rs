//! Page rendering
//!
//! Rendering a PDF page to a bitmap is an external capability. The
//! [`PageRenderer`] trait is the seam the batch driver renders through, so a
//! different backend (or an in-memory one in tests) can be swapped in.

mod pdfium_renderer;

pub use pdfium_renderer::PdfiumRenderer;

use std::path::Path;

use image::DynamicImage;

use crate::errors::ExamResult;

/// Magnification used for every rendered page
pub const DEFAULT_ZOOM: f32 = 3.0;

/// Strategy for turning document pages into bitmaps
pub trait PageRenderer {
    /// Number of pages in `document`
    ///
    /// # Returns
    /// The page count, or `MissingFile` if the document does not exist
    fn page_count(&mut self, document: &Path) -> ExamResult<u16>;

    /// Render one page of `document` (0-based index)
    ///
    /// # Returns
    /// The rendered bitmap, `MissingFile` if the document does not exist, or
    /// `MissingPage` if `page` is beyond the last page
    fn render_page(&mut self, document: &Path, page: u16) -> ExamResult<DynamicImage>;
}
