//! Pdfium-backed page renderer

use std::env;
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use log::{debug, info, warn};
use pdfium_render::prelude::*;

use crate::errors::{ExamError, ExamResult};

use super::{PageRenderer, DEFAULT_ZOOM};

/// Renders PDF pages through a dynamically bound Pdfium library
pub struct PdfiumRenderer {
    pdfium: Pdfium,
    zoom: f32,
}

impl PdfiumRenderer {
    /// Bind Pdfium and create a renderer at the default zoom
    ///
    /// A library next to the executable is preferred, then one in the
    /// working directory, then the system library.
    pub fn new() -> ExamResult<Self> {
        Self::with_zoom(DEFAULT_ZOOM)
    }

    /// Bind Pdfium and create a renderer at `zoom` magnification
    pub fn with_zoom(zoom: f32) -> ExamResult<Self> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(ExamError::Config(format!("Zoom must be a positive number, got {}", zoom)));
        }

        Ok(PdfiumRenderer {
            pdfium: Pdfium::new(bind_library()?),
            zoom,
        })
    }

    fn open<'a>(&'a self, document: &Path) -> ExamResult<PdfDocument<'a>> {
        if !document.is_file() {
            return Err(ExamError::MissingFile(document.to_path_buf()));
        }

        self.pdfium
            .load_pdf_from_file(document, None)
            .map_err(|e| ExamError::Render(format!("Unable to open {}: {:?}", document.display(), e)))
    }
}

/// Directories searched for a bundled Pdfium library, in order
fn library_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(exe_dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }
    dirs.push(PathBuf::from("./"));
    dirs
}

fn bind_library() -> ExamResult<Box<dyn PdfiumLibraryBindings>> {
    for dir in library_dirs() {
        let library = Pdfium::pdfium_platform_library_name_at_path(&dir);
        match Pdfium::bind_to_library(&library) {
            Ok(bindings) => {
                info!("Bound Pdfium library at {}", library.display());
                return Ok(bindings);
            }
            Err(e) => debug!("No Pdfium library at {} ({:?})", library.display(), e),
        }
    }

    debug!("Falling back to the system Pdfium library");
    Pdfium::bind_to_system_library()
        .map_err(|e| ExamError::Render(format!("Unable to bind Pdfium library: {:?}", e)))
}

impl PageRenderer for PdfiumRenderer {
    fn page_count(&mut self, document: &Path) -> ExamResult<u16> {
        let doc = self.open(document)?;
        Ok(doc.pages().len())
    }

    fn render_page(&mut self, document: &Path, page: u16) -> ExamResult<DynamicImage> {
        let doc = self.open(document)?;
        let page_count = doc.pages().len();
        if page >= page_count {
            return Err(ExamError::MissingPage {
                document: document.to_path_buf(),
                page,
                page_count,
            });
        }

        let pdf_page = doc
            .pages()
            .get(page)
            .map_err(|e| ExamError::Render(format!("Unable to load page {}: {:?}", page, e)))?;

        let bitmap = pdf_page
            .render_with_config(&PdfRenderConfig::new().scale_page_by_factor(self.zoom))
            .map_err(|e| ExamError::Render(format!("Unable to render page {}: {:?}", page, e)))?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        debug!("Rendered page {} of {} at {}x{}", page, document.display(), width, height);

        let buffer = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
            warn!("Pdfium returned a short buffer for page {}", page);
            ExamError::Render(format!("Bitmap buffer for page {} does not match {}x{}", page, width, height))
        })?;

        Ok(DynamicImage::ImageRgba8(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_dirs_start_next_to_executable() {
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        let dirs = library_dirs();

        assert_eq!(dirs.first(), Some(&exe_dir));
        assert_eq!(dirs.last(), Some(&PathBuf::from("./")));
    }
}
