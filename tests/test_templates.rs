//! Integration tests for imported-page templates.

use pdf_assembly::object::{Dict, Object};
use pdf_assembly::writer::{
    DocumentWriter, ImportedPage, MemoryPageImporter, ObjectSerializer, Orientation, PageKind,
    PaperSize, PdfDocument,
};
use pdf_assembly::{Error, ObjectRef, Rect};

const COVER_CONTENT: &str = "0 0 1 rg 0 0 612 792 re f";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn importer() -> MemoryPageImporter {
    let mut importer = MemoryPageImporter::new();
    importer
        .insert("cover.pdf", 1, ImportedPage::new(Rect::from_size(612.0, 792.0), COVER_CONTENT))
        .insert("a4.pdf", 1, ImportedPage::new(Rect::from_size(595.28, 841.89), "0 0 m"))
        .insert("a4.pdf", 2, ImportedPage::new(Rect::new(10.0, 20.0, 110.0, 220.0), "1 1 m"));
    importer
}

fn as_text(pdf: &[u8]) -> String {
    String::from_utf8_lossy(pdf).to_string()
}

mod import_tests {
    use super::*;

    #[test]
    fn test_import_allocates_form_xobject() {
        init_logging();
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        let template = doc
            .import_page_as_template(&importer(), "cover.pdf", 1, "cover")
            .unwrap();

        assert_eq!(template, ObjectRef::new(4, 0));
        assert_eq!(doc.template_store().get("cover"), Some(template));

        let content = as_text(&doc.serialize().unwrap());
        assert!(content.contains(&format!(
            "4 0 obj\n<</BBox [0 0 612 792] /FormType 1 /Length {} \
             /Subtype /Form /Type /XObject>>\nstream\n{}\nendstream",
            COVER_CONTENT.len(),
            COVER_CONTENT
        )));
    }

    #[test]
    fn test_duplicate_key_consumes_no_id() {
        let source = importer();
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        doc.import_page_as_template(&source, "cover.pdf", 1, "cover").unwrap();

        let err = doc
            .import_page_as_template(&source, "a4.pdf", 1, "cover")
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(ref key) if key == "cover"));
        assert_eq!(doc.template_store().len(), 1);

        // the next allocation continues right after the first template
        let page = doc.add_blank_page();
        assert_eq!(page.object_ref(), ObjectRef::new(5, 0));
    }

    #[test]
    fn test_missing_source_page() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        let err = doc
            .import_page_as_template(&importer(), "cover.pdf", 7, "cover")
            .unwrap_err();

        assert!(matches!(err, Error::PageNotFound { page: 7, .. }));
        assert!(doc.template_store().is_empty());
    }

    #[test]
    fn test_register_rejects_degenerate_page() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        let flat = ImportedPage::new(Rect::new(0.0, 0.0, 612.0, 0.0), "");
        assert!(matches!(doc.register_template("flat", flat), Err(Error::Import(_))));
        assert!(!doc.template_store().contains("flat"));
    }

    #[test]
    fn test_template_resources_are_kept() {
        let mut font = Dict::new();
        font.insert("Type".to_string(), ObjectSerializer::name("Font"));
        font.insert("Subtype".to_string(), ObjectSerializer::name("Type1"));
        font.insert("BaseFont".to_string(), ObjectSerializer::name("Helvetica"));
        let mut fonts = Dict::new();
        fonts.insert("F1".to_string(), Object::Dictionary(font));
        let mut resources = Dict::new();
        resources.insert("Font".to_string(), Object::Dictionary(fonts));

        let page = ImportedPage::new(Rect::from_size(612.0, 792.0), "BT /F1 9 Tf (x) Tj ET")
            .with_resources(resources);

        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        doc.register_template("letterhead", page).unwrap();
        doc.add_template_page("letterhead");

        let content = as_text(&doc.serialize().unwrap());
        assert!(content.contains(
            "/Resources <</Font <</F1 <</BaseFont /Helvetica /Subtype /Type1 /Type /Font>>>>>>"
        ));
    }
}

mod template_page_tests {
    use super::*;

    #[test]
    fn test_cover_used_twice() {
        init_logging();
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        doc.import_page_as_template(&importer(), "cover.pdf", 1, "cover")
            .unwrap();

        let first = doc.add_template_page("cover").unwrap().object_ref();
        let second = doc.add_template_page("cover").unwrap().object_ref();
        assert_ne!(first, second);
        assert_eq!(doc.page_count(), 2);
        assert!(matches!(
            doc.pages().get(1).unwrap().kind(),
            PageKind::Template { key, .. } if key == "cover"
        ));

        let content = as_text(&doc.serialize().unwrap());
        assert_eq!(content.matches("/Subtype /Form").count(), 1);
        assert_eq!(content.matches("q\n1 0 0 1 0 0 cm\n/TPL1 Do\nQ\n").count(), 2);
        assert_eq!(
            content
                .matches("/Resources <</ProcSet [/PDF /Text] /XObject <</TPL1 4 0 R>>>>")
                .count(),
            2
        );
        assert!(content.contains("<</Count 2 /Kids [5 0 R 7 0 R] /Type /Pages>>"));
    }

    #[test]
    fn test_unknown_key_changes_nothing() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        doc.add_blank_page();

        assert!(doc.add_template_page("nope").is_none());
        assert_eq!(doc.page_count(), 1);

        let mut baseline = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        baseline.add_blank_page();
        assert_eq!(doc.serialize().unwrap(), baseline.serialize().unwrap());
    }

    #[test]
    fn test_template_scaled_to_landscape_page() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Landscape);
        doc.import_page_as_template(&importer(), "cover.pdf", 1, "cover")
            .unwrap();
        doc.add_template_page("cover").unwrap();

        let content = as_text(&doc.serialize().unwrap());
        assert!(content.contains("/MediaBox [0 0 792 612]"));
        assert!(content.contains("q\n1.29412 0 0 0.77273 0 0 cm\n/TPL1 Do\nQ\n"));
    }

    #[test]
    fn test_a4_template_on_letter() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        doc.import_page_as_template(&importer(), "a4.pdf", 1, "a4")
            .unwrap();
        doc.add_template_page("a4").unwrap();

        let content = as_text(&doc.serialize().unwrap());
        assert!(content.contains("1.02809 0 0 0.94074 0 0 cm"));
    }

    #[test]
    fn test_offset_bbox_maps_to_origin() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        doc.import_page_as_template(&importer(), "a4.pdf", 2, "offset")
            .unwrap();
        doc.add_template_page("offset").unwrap();

        // 100 x 200 box at (10, 20) stretched to 612 x 792
        let content = as_text(&doc.serialize().unwrap());
        assert!(content.contains("6.12 0 0 3.96 -61.2 -79.2 cm"));
    }

    #[test]
    fn test_text_over_template() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        doc.import_page_as_template(&importer(), "cover.pdf", 1, "cover")
            .unwrap();
        doc.add_template_page("cover")
            .unwrap()
            .set_font("Times", "B", 20.0)
            .unwrap()
            .text(72.0, 700.0, "Annual Report")
            .unwrap();

        let content = as_text(&doc.serialize().unwrap());
        assert!(content
            .contains("/TPL1 Do\nQ\n/F1 20 Tf\nBT\n72 700 Td\n(Annual Report) Tj\nET\n"));
        assert!(content.contains(
            "/Resources <</Font <</F1 7 0 R>> /ProcSet [/PDF /Text] /XObject <</TPL1 4 0 R>>>>"
        ));
    }

    #[test]
    fn test_use_template_on_blank_page() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        doc.import_page_as_template(&importer(), "cover.pdf", 1, "cover")
            .unwrap();

        let mut page = doc.add_blank_page();
        assert!(page.use_template("cover", 0.0, 0.0, 200.0, 100.0).unwrap());
        assert!(!page.use_template("missing", 0.0, 0.0, 10.0, 10.0).unwrap());

        let content = as_text(&doc.serialize().unwrap());
        assert!(content.contains("q\n0.3268 0 0 0.12626 0 0 cm\n/TPL1 Do\nQ\n"));
    }

    #[test]
    fn test_two_templates_named_in_import_order() {
        let source = importer();
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        doc.import_page_as_template(&source, "a4.pdf", 1, "second").unwrap();
        doc.import_page_as_template(&source, "cover.pdf", 1, "first").unwrap();
        doc.add_template_page("first").unwrap();

        let content = as_text(&doc.serialize().unwrap());
        assert!(content.contains("/XObject <</TPL2 5 0 R>>"));
    }

    #[test]
    fn test_through_document_writer() {
        let mut doc = PdfDocument::new(PaperSize::letter(), Orientation::Portrait);
        let writer: &mut dyn DocumentWriter = &mut doc;
        writer
            .import_page_as_template(&importer(), "cover.pdf", 1, "cover")
            .unwrap();
        writer.add_template_page("cover");
        writer.set_font("Helvetica", "", 12.0).unwrap();
        writer.text(72.0, 720.0, "Hello").unwrap();

        let mut sink = Vec::new();
        let written = writer.write_to(&mut sink).unwrap();
        assert_eq!(written as usize, sink.len());
        assert!(as_text(&sink).contains("(Hello) Tj"));
    }
}
