use std::fmt;

use crate::error::PluginError;

/// Numeric identifier of a named destination stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TagId(pub u16);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag allocation collaborator.
///
/// Resolves tag names to numeric identifiers, creating them on first use.
pub trait Tagger: Send + Sync {
    /// Resolve `name`, allocating a new identifier if needed.
    ///
    /// Must be idempotent: the same name always yields the same id within
    /// one process lifetime.
    fn negotiate_tag(&self, name: &str) -> Result<TagId, PluginError>;

    /// Reverse lookup of a previously negotiated tag.
    fn lookup_tag(&self, tag: TagId) -> Option<String>;
}
