//! Keyed store of imported-page templates.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::object::ObjectRef;

/// Maps caller-chosen keys to the object holding an imported page.
///
/// Keys are case-sensitive and compared exactly. Storing under a key that is
/// already present fails; [`TemplateStore::replace`] is the explicit way to
/// rebind a key.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    entries: HashMap<String, ObjectRef>,
}

impl TemplateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a template under `key`.
    pub fn store(&mut self, key: impl Into<String>, template: ObjectRef) -> Result<()> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(Error::DuplicateKey(key));
        }
        self.entries.insert(key, template);
        Ok(())
    }

    /// Rebind `key`, returning the template it previously named.
    pub fn replace(&mut self, key: impl Into<String>, template: ObjectRef) -> Option<ObjectRef> {
        self.entries.insert(key.into(), template)
    }

    /// Look up a template. A miss is `None`, not an error.
    pub fn get(&self, key: &str) -> Option<ObjectRef> {
        self.entries.get(key).copied()
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
