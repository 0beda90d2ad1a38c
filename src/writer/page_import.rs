//! Imported pages and the collaborator that supplies them.
//!
//! Reading a source PDF is not the assembler's job. A [`PageImporter`] hands
//! over an [`ImportedPage`]: the page's bounding box, its already-decoded
//! content bytes and an optional self-contained resource dictionary. The
//! assembler wraps that in a Form XObject so it can be drawn on any number of
//! output pages.

use std::collections::HashMap;

use super::object_serializer::ObjectSerializer;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::object::{Dict, Object};

/// A page taken from an external document.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedPage {
    /// Bounding box of the page (usually its MediaBox)
    pub bbox: Rect,
    /// Page content operators
    pub content: Vec<u8>,
    /// Resource dictionary the content needs, if any
    pub resources: Option<Dict>,
}

impl ImportedPage {
    /// Create an imported page without resources.
    pub fn new(bbox: Rect, content: impl Into<Vec<u8>>) -> Self {
        Self {
            bbox,
            content: content.into(),
            resources: None,
        }
    }

    /// Attach the resource dictionary the content refers to.
    pub fn with_resources(mut self, resources: Dict) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Check the page can be placed on an output page.
    pub fn validate(&self) -> Result<()> {
        if !self.bbox.is_valid() {
            return Err(Error::Import(format!(
                "bounding box [{} {} {} {}] has no area",
                self.bbox.llx, self.bbox.lly, self.bbox.urx, self.bbox.ury
            )));
        }
        Ok(())
    }

    /// Build the Form XObject stream for this page.
    pub fn to_form_xobject(&self) -> Object {
        let mut dict = Dict::new();
        dict.insert("Type".to_string(), ObjectSerializer::name("XObject"));
        dict.insert("Subtype".to_string(), ObjectSerializer::name("Form"));
        dict.insert("FormType".to_string(), ObjectSerializer::integer(1));
        dict.insert("BBox".to_string(), ObjectSerializer::rect(&self.bbox));
        if let Some(resources) = &self.resources {
            dict.insert("Resources".to_string(), Object::Dictionary(resources.clone()));
        }
        Object::Stream {
            dict,
            data: bytes::Bytes::from(self.content.clone()),
        }
    }
}

/// Supplies pages from external documents.
pub trait PageImporter {
    /// Import page `page` (1-indexed) of the document at `path`.
    fn import_page(&self, path: &str, page: u32) -> Result<ImportedPage>;
}

/// Importer backed by pages held in memory, keyed by path and page number.
#[derive(Debug, Clone, Default)]
pub struct MemoryPageImporter {
    pages: HashMap<(String, u32), ImportedPage>,
}

impl MemoryPageImporter {
    /// Create an empty importer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `page` available as page number `number` of `path`.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        number: u32,
        page: ImportedPage,
    ) -> &mut Self {
        self.pages.insert((path.into(), number), page);
        self
    }
}

impl PageImporter for MemoryPageImporter {
    fn import_page(&self, path: &str, page: u32) -> Result<ImportedPage> {
        self.pages
            .get(&(path.to_string(), page))
            .cloned()
            .ok_or_else(|| Error::PageNotFound {
                path: path.to_string(),
                page,
            })
    }
}
