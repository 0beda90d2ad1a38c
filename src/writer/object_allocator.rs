//! Indirect object numbering.

use crate::object::ObjectRef;

/// Issues indirect object numbers for one document.
///
/// Numbers start at 1 and increase by one per call; 0 is the head of the
/// free list in the xref table and is never handed out. Once an object is
/// written, the allocator also remembers the byte offset it starts at.
#[derive(Debug, Clone)]
pub struct ObjectAllocator {
    next_id: u32,
    offsets: Vec<Option<usize>>,
}

impl ObjectAllocator {
    /// Create an allocator whose first id is 1.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            offsets: Vec::new(),
        }
    }

    /// Allocate a new object id.
    pub fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.offsets.push(None);
        id
    }

    /// Allocate a new id and wrap it in a generation-0 reference.
    pub fn allocate_ref(&mut self) -> ObjectRef {
        ObjectRef::new(self.allocate(), 0)
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next_id - 1
    }

    /// Value of the trailer `/Size` entry: highest id plus one.
    pub fn xref_size(&self) -> u32 {
        self.next_id
    }

    /// Record where object `id` starts in the output.
    ///
    /// Returns `false` for ids that were never allocated.
    pub fn record_offset(&mut self, id: u32, offset: usize) -> bool {
        match id.checked_sub(1).and_then(|i| self.offsets.get_mut(i as usize)) {
            Some(slot) => {
                *slot = Some(offset);
                true
            },
            None => false,
        }
    }

    /// Byte offset recorded for object `id`.
    pub fn offset(&self, id: u32) -> Option<usize> {
        let index = id.checked_sub(1)? as usize;
        self.offsets.get(index).copied().flatten()
    }
}

impl Default for ObjectAllocator {
    fn default() -> Self {
        Self::new()
    }
}
