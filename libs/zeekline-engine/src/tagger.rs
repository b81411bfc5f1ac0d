use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use zeekline_api::error::PluginError;
use zeekline_api::tag::{TagId, Tagger};

/// Name of the tag every fresh table starts with (id 0).
pub const DEFAULT_TAG: &str = "default";

#[derive(Debug, Default)]
struct TagTable {
    by_name: HashMap<String, TagId>,
    names: Vec<String>,
}

/// In-process tag allocator.
///
/// Hands out sequential ids starting at 0 (`"default"`). Negotiating a name
/// twice returns the same id. Fails with `ErrorKind::Exhausted` once
/// `capacity` names are allocated.
#[derive(Debug)]
pub struct MemoryTagger {
    table: RwLock<TagTable>,
    capacity: usize,
}

impl Default for MemoryTagger {
    fn default() -> Self {
        Self::new(usize::from(u16::MAX))
    }
}

impl MemoryTagger {
    /// `capacity` is clamped to the id space (1..=65536).
    pub fn new(capacity: usize) -> Self {
        let tagger = Self {
            table: RwLock::new(TagTable::default()),
            capacity: capacity.clamp(1, usize::from(u16::MAX) + 1),
        };
        let mut table = tagger.write();
        table.by_name.insert(DEFAULT_TAG.to_string(), TagId(0));
        table.names.push(DEFAULT_TAG.to_string());
        drop(table);
        tagger
    }

    pub fn default_tag(&self) -> TagId {
        TagId(0)
    }

    /// Number of allocated tags, including the default one.
    pub fn len(&self) -> usize {
        self.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().names.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, TagTable> {
        match self.table.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("tag table read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, TagTable> {
        match self.table.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("tag table write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl Tagger for MemoryTagger {
    fn negotiate_tag(&self, name: &str) -> Result<TagId, PluginError> {
        if name.is_empty() {
            return Err(PluginError::config("empty tag name"));
        }
        if let Some(tag) = self.read().by_name.get(name) {
            return Ok(*tag);
        }

        let mut table = self.write();
        // Another thread may have won the race between the two locks.
        if let Some(tag) = table.by_name.get(name) {
            return Ok(*tag);
        }
        if table.names.len() >= self.capacity {
            return Err(PluginError::exhausted(format!(
                "tag table full ({} tags), cannot allocate '{name}'",
                self.capacity
            )));
        }
        let id = u16::try_from(table.names.len())
            .map_err(|_| PluginError::exhausted(format!("tag id space exhausted at '{name}'")))?;
        let tag = TagId(id);
        table.by_name.insert(name.to_string(), tag);
        table.names.push(name.to_string());
        tracing::debug!(tag_name = %name, tag = %tag, "allocated tag");
        Ok(tag)
    }

    fn lookup_tag(&self, tag: TagId) -> Option<String> {
        self.read().names.get(usize::from(tag.0)).cloned()
    }
}
