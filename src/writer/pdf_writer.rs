//! PDF document assembler.
//!
//! Owns the object allocator, page tree, font registry and template store of
//! one document and serializes them into a complete PDF: header, body, xref
//! table and trailer.
//!
//! Object ids are handed out while the document is built, never during
//! serialization, so the numbering depends only on the order of calls.
//! A document is not internally synchronized; share it across threads only
//! behind a lock around the whole value.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use super::content_stream::{ContentStreamBuilder, ContentStreamOp, ResourceResolver};
use super::font_manager::{FontRegistry, StandardFont};
use super::object_allocator::ObjectAllocator;
use super::object_serializer::ObjectSerializer;
use super::page_import::{ImportedPage, PageImporter};
use super::page_tree::{Page, PageTree};
use super::paper::{Orientation, PaperSize};
use super::sink::CountingWriter;
use super::template_store::TemplateStore;
use crate::config::{pdf_date, WriterConfig};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dict, Object, ObjectRef};

/// Binary marker comment written after the header line.
const BINARY_MARKER: &[u8] = b"%\xE2\xE3\xCF\xD3\n";

/// An imported page registered as a Form XObject.
#[derive(Debug, Clone)]
struct FormXObject {
    resource_name: String,
    page: ImportedPage,
}

/// Resource names of everything a document registered.
struct DocumentResources<'a> {
    fonts: &'a FontRegistry,
    forms: &'a BTreeMap<ObjectRef, FormXObject>,
}

impl ResourceResolver for DocumentResources<'_> {
    fn font_resource(&self, font: StandardFont) -> Option<&str> {
        self.fonts.get(font).map(|f| f.resource_name.as_str())
    }

    fn template_resource(&self, template: ObjectRef) -> Option<&str> {
        self.forms.get(&template).map(|f| f.resource_name.as_str())
    }
}

/// A page being built.
///
/// Returned by the page-adding methods of [`PdfDocument`]; drawing calls go
/// to the page it was created for.
pub struct PageBuilder<'a> {
    doc: &'a mut PdfDocument,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// 0-based index of the page in output order.
    pub fn index(&self) -> usize {
        self.page_index
    }

    /// Object holding this page's dictionary.
    pub fn object_ref(&self) -> ObjectRef {
        self.doc.pages[self.page_index].object_ref()
    }

    /// Recorded content of this page.
    pub fn content(&self) -> &ContentStreamBuilder {
        self.doc.pages[self.page_index].content()
    }

    /// Select a standard font by family and style (`""`, `"B"`, `"I"`, `"BI"`).
    ///
    /// The selection carries over to pages added afterwards.
    pub fn set_font(&mut self, family: &str, style: &str, size: f64) -> Result<&mut Self> {
        self.doc.select_font(self.page_index, family, style, size)?;
        Ok(self)
    }

    /// Draw text with its baseline starting at `(x, y)`, origin bottom-left.
    pub fn text(&mut self, x: f64, y: f64, text: &str) -> Result<&mut Self> {
        self.builder().draw_text(x, y, text)?;
        Ok(self)
    }

    /// Paint the template stored under `key` into the given rectangle.
    ///
    /// Returns `Ok(false)` without drawing anything if the key is unknown.
    pub fn use_template(
        &mut self,
        key: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<bool> {
        let Some((template, bbox)) = self.doc.template_bbox(key) else {
            return Ok(false);
        };
        let target = Rect::new(x, y, x + width, y + height);
        self.builder()
            .draw_template(template, bbox.fit_matrix(&target))?;
        Ok(true)
    }

    /// Set fill color with RGB values in 0.0..=1.0.
    pub fn set_fill_color(&mut self, r: f64, g: f64, b: f64) -> Result<&mut Self> {
        self.builder().set_fill_color(r, g, b)?;
        Ok(self)
    }

    /// Set stroke color with RGB values in 0.0..=1.0.
    pub fn set_stroke_color(&mut self, r: f64, g: f64, b: f64) -> Result<&mut Self> {
        self.builder().set_stroke_color(r, g, b)?;
        Ok(self)
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f64) -> Result<&mut Self> {
        self.builder().set_line_width(width)?;
        Ok(self)
    }

    /// Draw a straight line.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<&mut Self> {
        self.builder().line(x1, y1, x2, y2)?;
        Ok(self)
    }

    /// Stroke a rectangle outline.
    pub fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<&mut Self> {
        self.builder().rect(x, y, width, height)?.stroke();
        Ok(self)
    }

    /// Fill a rectangle with the current fill color.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<&mut Self> {
        self.builder().rect(x, y, width, height)?.fill();
        Ok(self)
    }

    /// Finish building this page and return to the document.
    pub fn finish(self) -> &'a mut PdfDocument {
        self.doc
    }

    fn builder(&mut self) -> &mut ContentStreamBuilder {
        self.doc.pages[self.page_index].content_mut()
    }
}

/// PDF document assembler.
///
/// Builds a complete PDF document with pages, fonts, and imported-page
/// templates. Serialization is single-use: the second call to
/// [`PdfDocument::serialize`] fails with [`Error::AlreadySerialized`].
#[derive(Debug)]
pub struct PdfDocument {
    config: WriterConfig,
    paper_size: PaperSize,
    orientation: Orientation,
    page_box: Rect,
    allocator: ObjectAllocator,
    catalog_ref: ObjectRef,
    pages_ref: ObjectRef,
    info_ref: ObjectRef,
    pages: PageTree,
    fonts: FontRegistry,
    templates: TemplateStore,
    forms: BTreeMap<ObjectRef, FormXObject>,
    current_font: Option<(StandardFont, f64)>,
    serialized: bool,
}

impl PdfDocument {
    /// Create a document with the default configuration.
    pub fn new(paper_size: PaperSize, orientation: Orientation) -> Self {
        Self::with_config(paper_size, orientation, WriterConfig::default())
    }

    /// Create a document with a custom configuration.
    pub fn with_config(
        paper_size: PaperSize,
        orientation: Orientation,
        config: WriterConfig,
    ) -> Self {
        let mut allocator = ObjectAllocator::new();
        let catalog_ref = allocator.allocate_ref();
        let pages_ref = allocator.allocate_ref();
        let info_ref = allocator.allocate_ref();
        let page_box = orientation.page_box(&paper_size);

        Self {
            config,
            paper_size,
            orientation,
            page_box,
            allocator,
            catalog_ref,
            pages_ref,
            info_ref,
            pages: PageTree::new(),
            fonts: FontRegistry::new(),
            templates: TemplateStore::new(),
            forms: BTreeMap::new(),
            current_font: None,
            serialized: false,
        }
    }

    /// Paper size given at construction.
    pub fn paper_size(&self) -> &PaperSize {
        &self.paper_size
    }

    /// Orientation given at construction.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Page box every page is given: the paper size in this orientation.
    pub fn page_box(&self) -> Rect {
        self.page_box
    }

    /// Writer configuration.
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Stored templates.
    pub fn template_store(&self) -> &TemplateStore {
        &self.templates
    }

    /// The document's pages.
    pub fn pages(&self) -> &PageTree {
        &self.pages
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Fonts used so far.
    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Whether [`PdfDocument::serialize`] has already succeeded.
    pub fn is_serialized(&self) -> bool {
        self.serialized
    }

    /// Import a page through `importer` and store it under `key`.
    pub fn import_page_as_template(
        &mut self,
        importer: &dyn PageImporter,
        path: &str,
        page: u32,
        key: &str,
    ) -> Result<ObjectRef> {
        if self.templates.contains(key) {
            return Err(Error::DuplicateKey(key.to_string()));
        }
        let imported = importer.import_page(path, page)?;
        log::debug!("Imported page {} of '{}' as template '{}'", page, path, key);
        self.register_template(key, imported)
    }

    /// Store an already imported page under `key`.
    ///
    /// The key is checked before an object id is allocated, so a rejected
    /// registration leaves the numbering untouched.
    pub fn register_template(&mut self, key: &str, page: ImportedPage) -> Result<ObjectRef> {
        if self.templates.contains(key) {
            return Err(Error::DuplicateKey(key.to_string()));
        }
        page.validate()?;

        let template = self.allocator.allocate_ref();
        self.templates.store(key, template)?;
        let resource_name = format!("TPL{}", self.forms.len() + 1);
        log::debug!("Template '{}' stored as {} ({})", key, resource_name, template);
        self.forms.insert(
            template,
            FormXObject {
                resource_name,
                page,
            },
        );
        Ok(template)
    }

    /// Append a blank page.
    pub fn add_blank_page(&mut self) -> PageBuilder<'_> {
        let page_index = self.pages.add_blank_page(&mut self.allocator);
        self.replay_font(page_index);
        log::debug!("Added blank page {}", page_index + 1);
        PageBuilder {
            doc: self,
            page_index,
        }
    }

    /// Append a page showing the template stored under `key`, scaled to
    /// fill the page box.
    ///
    /// Returns `None` and leaves the document unchanged if the key is unknown.
    /// Each call creates a new page; the template object is shared.
    pub fn add_template_page(&mut self, key: &str) -> Option<PageBuilder<'_>> {
        let (template, bbox) = self.template_bbox(key)?;
        let matrix = bbox.fit_matrix(&self.page_box);
        // bbox and page box are both validated, so the matrix is finite
        let page_index = self
            .pages
            .add_template_page(key, template, matrix, &mut self.allocator)
            .ok()?;
        self.replay_font(page_index);
        log::debug!("Added page {} from template '{}'", page_index + 1, key);
        Some(PageBuilder {
            doc: self,
            page_index,
        })
    }

    /// Reopen an existing page (0-based index) for drawing.
    pub fn page(&mut self, index: usize) -> Option<PageBuilder<'_>> {
        if index >= self.pages.len() {
            return None;
        }
        Some(PageBuilder {
            doc: self,
            page_index: index,
        })
    }

    /// Select a font on the most recently added page.
    ///
    /// The font stays selected on every page added afterwards.
    pub fn set_font(&mut self, family: &str, style: &str, size: f64) -> Result<()> {
        let index = self.current_page_index()?;
        self.select_font(index, family, style, size)
    }

    /// Draw text on the most recently added page.
    pub fn text(&mut self, x: f64, y: f64, text: &str) -> Result<()> {
        let index = self.current_page_index()?;
        self.pages[index].content_mut().draw_text(x, y, text)?;
        Ok(())
    }

    fn current_page_index(&self) -> Result<usize> {
        self.pages.len().checked_sub(1).ok_or(Error::NoCurrentPage)
    }

    fn select_font(&mut self, index: usize, family: &str, style: &str, size: f64) -> Result<()> {
        let font = StandardFont::resolve(family, style)?;
        self.pages[index].content_mut().set_font(font, size)?;
        self.fonts.register(font, &mut self.allocator);
        self.current_font = Some((font, size));
        Ok(())
    }

    /// Start a new page with the document's current font selected.
    fn replay_font(&mut self, index: usize) {
        if let Some((font, size)) = self.current_font {
            self.pages[index]
                .content_mut()
                .op(ContentStreamOp::SetFont(font, size));
        }
    }

    fn template_bbox(&self, key: &str) -> Option<(ObjectRef, Rect)> {
        let template = self.templates.get(key)?;
        let form = self.forms.get(&template)?;
        Some((template, form.page.bbox))
    }

    fn resources(&self) -> DocumentResources<'_> {
        DocumentResources {
            fonts: &self.fonts,
            forms: &self.forms,
        }
    }

    /// Build the resource dictionary for one page from what it uses.
    fn page_resources(&self, page: &Page) -> Result<Object> {
        let mut entries = vec![(
            "ProcSet",
            Object::Array(vec![ObjectSerializer::name("PDF"), ObjectSerializer::name("Text")]),
        )];

        let content = page.content();
        if !content.fonts_used().is_empty() {
            let mut fonts = Dict::new();
            for font in content.fonts_used() {
                let registered = self.fonts.get(*font).ok_or_else(|| {
                    Error::UnresolvedResource(format!("font {}", font.base_font()))
                })?;
                fonts.insert(
                    registered.resource_name.clone(),
                    ObjectSerializer::reference(registered.object_ref),
                );
            }
            entries.push(("Font", Object::Dictionary(fonts)));
        }

        if !content.templates_used().is_empty() {
            let mut xobjects = Dict::new();
            for template in content.templates_used() {
                let form = self
                    .forms
                    .get(template)
                    .ok_or_else(|| Error::UnresolvedResource(format!("template {}", template)))?;
                xobjects.insert(form.resource_name.clone(), ObjectSerializer::reference(*template));
            }
            entries.push(("XObject", Object::Dictionary(xobjects)));
        }

        Ok(ObjectSerializer::dict(entries))
    }

    fn info_object(&self) -> Object {
        let config = &self.config;
        let mut entries = vec![("Producer", ObjectSerializer::text_string(&config.producer))];
        let optional = [
            ("Title", &config.title),
            ("Author", &config.author),
            ("Subject", &config.subject),
            ("Keywords", &config.keywords),
            ("Creator", &config.creator),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                entries.push((key, ObjectSerializer::text_string(value)));
            }
        }
        if let Some(date) = &config.creation_date {
            entries.push(("CreationDate", ObjectSerializer::string(&pdf_date(date))));
        }
        ObjectSerializer::dict(entries)
    }

    /// Collect every indirect object keyed by id.
    fn collect_objects(&self) -> Result<BTreeMap<u32, Object>> {
        let mut objects = BTreeMap::new();

        objects.insert(
            self.catalog_ref.id,
            ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(self.pages_ref)),
            ]),
        );
        objects.insert(self.pages_ref.id, self.pages.to_object());
        objects.insert(self.info_ref.id, self.info_object());

        for (font, registered) in self.fonts.iter() {
            objects.insert(registered.object_ref.id, font.font_object());
        }

        for (template, form) in &self.forms {
            objects.insert(template.id, form.page.to_form_xobject());
        }

        let resources = self.resources();
        for page in self.pages.iter() {
            let content = page.content().finalize(&resources)?;
            let page_resources = self.page_resources(page)?;
            objects.insert(
                page.object_ref().id,
                page.to_object(self.pages_ref, &self.page_box, page_resources),
            );
            objects.insert(
                page.contents_ref().id,
                Object::Stream {
                    dict: Dict::new(),
                    data: bytes::Bytes::from(content),
                },
            );
        }

        // Every allocated id must have exactly one body.
        for id in 1..self.allocator.xref_size() {
            if !objects.contains_key(&id) {
                return Err(Error::MissingObject(id));
            }
        }

        Ok(objects)
    }

    /// Build the complete PDF document.
    ///
    /// Nothing is returned unless every page finalizes; a failure leaves the
    /// document unserialized so the caller may fix it and retry.
    pub fn serialize(&mut self) -> Result<Vec<u8>> {
        if self.serialized {
            return Err(Error::AlreadySerialized);
        }

        let objects = self.collect_objects()?;
        let serializer = ObjectSerializer::new();
        let mut output = Vec::with_capacity(1024 + objects.len() * 128);

        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(BINARY_MARKER);

        for (id, obj) in &objects {
            self.allocator.record_offset(*id, output.len());
            serializer.write_indirect(&mut output, *id, 0, obj)?;
        }

        let xref_start = output.len();
        let size = self.allocator.xref_size();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        writeln!(output, "0000000000 65535 f ")?;
        for id in 1..size {
            let offset = self.allocator.offset(id).ok_or(Error::MissingObject(id))?;
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(size as i64)),
            ("Root", ObjectSerializer::reference(self.catalog_ref)),
            ("Info", ObjectSerializer::reference(self.info_ref)),
        ]);
        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        writeln!(output, "%%EOF")?;

        self.serialized = true;
        log::info!(
            "Assembled PDF: {} page(s), {} object(s), {} bytes",
            self.pages.len(),
            objects.len(),
            output.len()
        );
        Ok(output)
    }

    /// Serialize and write the document to `sink`. Returns bytes written.
    pub fn write_to<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<u64> {
        let bytes = self.serialize()?;
        let mut writer = CountingWriter::new(sink);
        writer
            .write_all(&bytes)
            .and_then(|_| writer.flush())
            .map_err(Error::SinkWriteFailed)?;
        Ok(writer.bytes_written())
    }

    /// Serialize and save the document to a file.
    ///
    /// The file is only created once the whole document has been serialized
    /// in memory.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.serialize()?;
        std::fs::write(path.as_ref(), bytes).map_err(Error::SinkWriteFailed)?;
        log::debug!("Saved PDF to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter() -> PdfDocument {
        PdfDocument::new(PaperSize::letter(), Orientation::Portrait)
    }

    fn text_of(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).to_string()
    }

    #[test]
    fn test_create_empty_pdf() {
        let mut doc = letter();
        doc.add_blank_page();
        let content = text_of(&doc.serialize().unwrap());

        assert!(content.starts_with("%PDF-1.7\n"));
        assert!(content.contains("1 0 obj\n<</Pages 2 0 R /Type /Catalog>>"));
        assert!(content.contains("/Type /Pages"));
        assert!(content.contains("/Type /Page"));
        assert!(content.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_pdf_with_text() {
        let mut doc = letter();
        doc.add_blank_page()
            .set_font("Helvetica", "", 12.0)
            .unwrap()
            .text(72.0, 720.0, "Hello")
            .unwrap();

        let content = text_of(&doc.serialize().unwrap());
        assert!(content.contains("/BaseFont /Helvetica"));
        assert!(content.contains("/F1 12 Tf\nBT\n72 720 Td\n(Hello) Tj\nET"));
        assert!(content.contains("/Resources <</Font <</F1 6 0 R>> /ProcSet [/PDF /Text]>>"));
    }

    #[test]
    fn test_object_numbering_follows_call_order() {
        let mut doc = letter();
        doc.add_blank_page(); // 4, 5
        doc.set_font("Courier", "B", 10.0).unwrap(); // 6
        doc.add_blank_page(); // 7, 8

        assert_eq!(doc.pages().get(0).unwrap().object_ref(), ObjectRef::new(4, 0));
        assert_eq!(doc.fonts().get(StandardFont::CourierBold).unwrap().object_ref.id, 6);
        assert_eq!(doc.pages().get(1).unwrap().object_ref(), ObjectRef::new(7, 0));

        let content = text_of(&doc.serialize().unwrap());
        assert!(content.contains("xref\n0 9\n0000000000 65535 f \n"));
        assert!(content.contains("trailer\n<</Info 3 0 R /Root 1 0 R /Size 9>>"));
    }

    #[test]
    fn test_second_serialize_fails() {
        let mut doc = letter();
        doc.add_blank_page();
        assert!(doc.serialize().is_ok());
        assert!(doc.is_serialized());
        assert!(matches!(doc.serialize(), Err(Error::AlreadySerialized)));
    }

    #[test]
    fn test_current_page_api_requires_page() {
        let mut doc = letter();
        assert!(matches!(doc.set_font("Helvetica", "", 12.0), Err(Error::NoCurrentPage)));
        assert!(matches!(doc.text(0.0, 0.0, "x"), Err(Error::NoCurrentPage)));
    }

    #[test]
    fn test_text_before_font() {
        let mut doc = letter();
        doc.add_blank_page();
        assert!(matches!(doc.text(72.0, 720.0, "x"), Err(Error::NoFontSelected)));
    }

    #[test]
    fn test_unknown_font_allocates_nothing() {
        let mut doc = letter();
        doc.add_blank_page();
        assert!(doc.set_font("Wingdings", "", 12.0).is_err());
        assert!(doc.fonts().is_empty());

        let content = text_of(&doc.serialize().unwrap());
        assert!(content.contains("/Size 6"));
    }

    #[test]
    fn test_pdf_with_metadata() {
        let date = chrono::DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z").unwrap();
        let config = WriterConfig::default()
            .with_title("Test Document")
            .with_author("Test Author")
            .with_creation_date(date);
        let mut doc = PdfDocument::with_config(PaperSize::a4(), Orientation::Portrait, config);
        doc.add_blank_page();

        let content = text_of(&doc.serialize().unwrap());
        assert!(content.contains("/Title (Test Document)"));
        assert!(content.contains("/Author (Test Author)"));
        assert!(content.contains("/CreationDate (D:20240102030405+00'00')"));
        assert!(content.contains("/Producer (pdf_assembly)"));
    }

    #[test]
    fn test_no_creation_date_by_default() {
        let mut doc = letter();
        doc.add_blank_page();
        assert!(!text_of(&doc.serialize().unwrap()).contains("CreationDate"));
    }

    #[test]
    fn test_landscape_media_box() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Landscape);
        doc.add_blank_page();
        let content = text_of(&doc.serialize().unwrap());
        assert!(content.contains("/MediaBox [0 0 792 612]"));
    }

    #[test]
    fn test_reopen_page() {
        let mut doc = letter();
        doc.add_blank_page();
        doc.add_blank_page();
        assert!(doc.page(2).is_none());

        let mut first = doc.page(0).unwrap();
        first.set_font("Times", "I", 11.0).unwrap();
        first.text(10.0, 10.0, "back on page one").unwrap();

        assert!(doc.pages().get(1).unwrap().content().is_empty());
        assert!(!doc.pages().get(0).unwrap().content().is_empty());
    }

    #[test]
    fn test_drawing_operations() {
        let mut doc = letter();
        let mut page = doc.add_blank_page();
        page.set_fill_color(0.9, 0.9, 0.9).unwrap();
        page.fill_rect(0.0, 0.0, 612.0, 36.0).unwrap();
        page.set_stroke_color(0.0, 0.0, 1.0).unwrap();
        page.set_line_width(2.0).unwrap();
        page.draw_rect(36.0, 36.0, 540.0, 720.0).unwrap();
        page.line(36.0, 400.0, 576.0, 400.0).unwrap();

        let content = text_of(&doc.serialize().unwrap());
        assert!(content.contains("0.9 0.9 0.9 rg\n0 0 612 36 re\nf\n"));
        assert!(content.contains("0 0 1 RG\n2 w\n36 36 540 720 re\nS\n36 400 m\n576 400 l\nS\n"));
    }

    #[test]
    fn test_font_carries_over_to_new_pages() {
        let mut doc = letter();
        doc.add_blank_page();
        doc.set_font("Helvetica", "", 12.0).unwrap();
        doc.text(72.0, 720.0, "one").unwrap();

        doc.add_blank_page();
        doc.text(72.0, 720.0, "two").unwrap();

        let second = doc.pages().get(1).unwrap().content();
        assert_eq!(second.current_font(), Some((StandardFont::Helvetica, 12.0)));
        let stream = text_of(&second.finalize(&doc.resources()).unwrap());
        assert!(stream.starts_with("/F1 12 Tf\nBT\n72 720 Td\n(two) Tj\nET"));
        assert_eq!(doc.fonts().len(), 1);
    }

    #[test]
    fn test_non_finite_text_position_is_rejected() {
        let mut doc = letter();
        doc.add_blank_page();
        doc.set_font("Helvetica", "", 12.0).unwrap();

        assert!(matches!(
            doc.text(f64::NAN, 720.0, "Hello"),
            Err(Error::InvalidNumber { name: "text position", .. })
        ));
        assert!(!text_of(&doc.serialize().unwrap()).contains("NaN"));
    }

    #[test]
    fn test_non_finite_font_size_registers_nothing() {
        let mut doc = letter();
        doc.add_blank_page();
        assert!(matches!(
            doc.set_font("Helvetica", "", f64::INFINITY),
            Err(Error::InvalidNumber { name: "font size", .. })
        ));
        assert!(doc.fonts().is_empty());

        // no font to carry over either
        doc.add_blank_page();
        assert!(matches!(doc.text(72.0, 720.0, "x"), Err(Error::NoFontSelected)));
    }

    #[test]
    fn test_write_to_reports_length() {
        let mut doc = letter();
        doc.add_blank_page();
        let mut sink = Vec::new();
        let written = doc.write_to(&mut sink).unwrap();
        assert_eq!(written as usize, sink.len());
        assert!(sink.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn test_failed_sink_surfaces_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut doc = letter();
        doc.add_blank_page();
        assert!(matches!(doc.write_to(&mut Broken), Err(Error::SinkWriteFailed(_))));
    }
}
