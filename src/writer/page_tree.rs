//! Ordered page sequence.
//!
//! Page `i` of the tree is physical page `i + 1` of the output. Pages are
//! only ever appended.

use super::content_stream::ContentStreamBuilder;
use super::object_allocator::ObjectAllocator;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::geometry::Rect;
use crate::object::{Object, ObjectRef};

/// How a page was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// Empty page
    Blank,
    /// Page backed by a stored template
    Template {
        /// Store key the page was created from
        key: String,
        /// Form XObject drawn as the page background
        template: ObjectRef,
    },
}

/// One output page.
#[derive(Debug, Clone)]
pub struct Page {
    object_ref: ObjectRef,
    contents_ref: ObjectRef,
    kind: PageKind,
    content: ContentStreamBuilder,
}

impl Page {
    /// Object holding the page dictionary.
    pub fn object_ref(&self) -> ObjectRef {
        self.object_ref
    }

    /// Object holding the page's content stream.
    pub fn contents_ref(&self) -> ObjectRef {
        self.contents_ref
    }

    /// How the page was created.
    pub fn kind(&self) -> &PageKind {
        &self.kind
    }

    /// The page's content stream builder.
    pub fn content(&self) -> &ContentStreamBuilder {
        &self.content
    }

    /// Mutable access to the page's content stream builder.
    pub fn content_mut(&mut self) -> &mut ContentStreamBuilder {
        &mut self.content
    }

    /// Build the page dictionary.
    pub fn to_object(&self, parent: ObjectRef, media_box: &Rect, resources: Object) -> Object {
        ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Page")),
            ("Parent", ObjectSerializer::reference(parent)),
            ("MediaBox", ObjectSerializer::rect(media_box)),
            ("Contents", ObjectSerializer::reference(self.contents_ref)),
            ("Resources", resources),
        ])
    }
}

/// The document's pages in output order.
#[derive(Debug, Clone, Default)]
pub struct PageTree {
    pages: Vec<Page>,
}

impl PageTree {
    /// Create an empty page tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank page. Returns its index.
    pub fn add_blank_page(&mut self, alloc: &mut ObjectAllocator) -> usize {
        self.push(PageKind::Blank, ContentStreamBuilder::new(), alloc)
    }

    /// Append a page whose content starts by painting `template` with
    /// `matrix`. Returns its index.
    ///
    /// A non-finite matrix is rejected before any id is allocated.
    pub fn add_template_page(
        &mut self,
        key: &str,
        template: ObjectRef,
        matrix: [f64; 6],
        alloc: &mut ObjectAllocator,
    ) -> Result<usize> {
        let mut content = ContentStreamBuilder::new();
        content.draw_template(template, matrix)?;
        let kind = PageKind::Template {
            key: key.to_string(),
            template,
        };
        Ok(self.push(kind, content, alloc))
    }

    fn push(
        &mut self,
        kind: PageKind,
        content: ContentStreamBuilder,
        alloc: &mut ObjectAllocator,
    ) -> usize {
        let object_ref = alloc.allocate_ref();
        let contents_ref = alloc.allocate_ref();
        self.pages.push(Page {
            object_ref,
            contents_ref,
            kind,
            content,
        });
        self.pages.len() - 1
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the tree has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page at `index` (0-based).
    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Mutable page at `index` (0-based).
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Most recently added page.
    pub fn last_mut(&mut self) -> Option<&mut Page> {
        self.pages.last_mut()
    }

    /// Iterate pages in output order.
    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    /// Build the root `/Pages` node.
    pub fn to_object(&self) -> Object {
        let kids = self
            .pages
            .iter()
            .map(|p| ObjectSerializer::reference(p.object_ref))
            .collect();
        ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", Object::Array(kids)),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ])
    }
}

impl std::ops::Index<usize> for PageTree {
    type Output = Page;

    fn index(&self, index: usize) -> &Page {
        &self.pages[index]
    }
}

impl std::ops::IndexMut<usize> for PageTree {
    fn index_mut(&mut self, index: usize) -> &mut Page {
        &mut self.pages[index]
    }
}
