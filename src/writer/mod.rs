//! PDF writing module for assembling documents.
//!
//! This module turns pages, standard-font text and imported-page templates
//! into a single self-contained PDF file.
//!
//! ## Architecture
//!
//! ```text
//! PageImporter ──→ ImportedPage ──→ [TemplateStore] (key → Form XObject)
//!                                          ↓
//! set_font / text ──→ [ContentStreamBuilder] (ops → content stream bytes)
//!                                          ↓
//! [PdfDocument] (page tree, fonts, templates, object ids)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes + xref + trailer
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use pdf_assembly::writer::{Orientation, PaperSize, PdfDocument};
//!
//! let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
//! doc.add_blank_page()
//!     .set_font("Helvetica", "", 12.0)?
//!     .text(72.0, 720.0, "Hello")?;
//! let bytes = doc.serialize()?;
//! ```

mod content_stream;
mod font_manager;
mod object_allocator;
mod object_serializer;
mod page_import;
mod page_tree;
mod paper;
mod pdf_writer;
mod sink;
mod template_store;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp, ResourceResolver};
pub use font_manager::{
    encode_win_ansi, FontFamily, FontRegistry, FontStyle, FontWeight, RegisteredFont,
    StandardFont,
};
pub use object_allocator::ObjectAllocator;
pub use object_serializer::{format_number, ObjectSerializer};
pub use page_import::{ImportedPage, MemoryPageImporter, PageImporter};
pub use page_tree::{Page, PageKind, PageTree};
pub use paper::{Orientation, PaperSize};
pub use pdf_writer::{PageBuilder, PdfDocument};
pub use sink::CountingWriter;
pub use template_store::TemplateStore;

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::object::ObjectRef;

/// A document that can be assembled page by page and written out once.
///
/// Paper size and orientation are fixed at construction. Font and text calls
/// apply to the most recently added page.
pub trait DocumentWriter {
    /// Paper size given at construction.
    fn paper_size(&self) -> &PaperSize;

    /// Orientation given at construction.
    fn orientation(&self) -> Orientation;

    /// Templates stored so far.
    fn template_store(&self) -> &TemplateStore;

    /// Import page `page` of `path` and store it under `key`.
    fn import_page_as_template(
        &mut self,
        importer: &dyn PageImporter,
        path: &str,
        page: u32,
        key: &str,
    ) -> Result<ObjectRef>;

    /// Append a blank page.
    fn add_blank_page(&mut self) -> PageBuilder<'_>;

    /// Append a page showing a stored template. `None` if the key is unknown.
    fn add_template_page(&mut self, key: &str) -> Option<PageBuilder<'_>>;

    /// Select a font on the current page. Later pages start with it selected.
    fn set_font(&mut self, family: &str, style: &str, size: f64) -> Result<()>;

    /// Draw text on the current page.
    fn text(&mut self, x: f64, y: f64, text: &str) -> Result<()>;

    /// Serialize the document.
    fn produce_bytes(&mut self) -> Result<Vec<u8>>;

    /// Serialize the document into `sink`, returning the bytes written.
    fn write_to(&mut self, sink: &mut dyn Write) -> Result<u64>;

    /// Serialize the document into a file.
    fn save(&mut self, path: &Path) -> Result<()>;
}

impl DocumentWriter for PdfDocument {
    fn paper_size(&self) -> &PaperSize {
        PdfDocument::paper_size(self)
    }

    fn orientation(&self) -> Orientation {
        PdfDocument::orientation(self)
    }

    fn template_store(&self) -> &TemplateStore {
        PdfDocument::template_store(self)
    }

    fn import_page_as_template(
        &mut self,
        importer: &dyn PageImporter,
        path: &str,
        page: u32,
        key: &str,
    ) -> Result<ObjectRef> {
        PdfDocument::import_page_as_template(self, importer, path, page, key)
    }

    fn add_blank_page(&mut self) -> PageBuilder<'_> {
        PdfDocument::add_blank_page(self)
    }

    fn add_template_page(&mut self, key: &str) -> Option<PageBuilder<'_>> {
        PdfDocument::add_template_page(self, key)
    }

    fn set_font(&mut self, family: &str, style: &str, size: f64) -> Result<()> {
        PdfDocument::set_font(self, family, style, size)
    }

    fn text(&mut self, x: f64, y: f64, text: &str) -> Result<()> {
        PdfDocument::text(self, x, y, text)
    }

    fn produce_bytes(&mut self) -> Result<Vec<u8>> {
        self.serialize()
    }

    fn write_to(&mut self, sink: &mut dyn Write) -> Result<u64> {
        PdfDocument::write_to(self, sink)
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        PdfDocument::save(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn build(writer: &mut dyn DocumentWriter) -> Vec<u8> {
        writer.add_blank_page();
        writer.set_font("Arial", "B", 14.0).unwrap();
        writer.text(50.0, 50.0, "through the trait").unwrap();
        writer.produce_bytes().unwrap()
    }

    #[test]
    fn test_trait_object_usage() {
        let mut doc = PdfDocument::new(PaperSize::a4(), Orientation::Portrait);
        let bytes = build(&mut doc);
        let content = String::from_utf8_lossy(&bytes);
        assert!(content.contains("/BaseFont /Helvetica-Bold"));
        assert!(content.contains("(through the trait) Tj"));
    }

    #[test]
    fn test_trait_templates() {
        let mut importer = MemoryPageImporter::new();
        importer.insert("form.pdf", 1, ImportedPage::new(Rect::from_size(100.0, 100.0), "0 0 m"));

        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        let writer: &mut dyn DocumentWriter = &mut doc;
        writer.import_page_as_template(&importer, "form.pdf", 1, "form").unwrap();
        assert!(writer.template_store().contains("form"));
        assert!(writer.add_template_page("form").is_some());
        assert!(writer.add_template_page("other").is_none());
        assert_eq!(writer.orientation(), Orientation::Portrait);
        assert_eq!(writer.paper_size().name(), "Letter");
    }
}
