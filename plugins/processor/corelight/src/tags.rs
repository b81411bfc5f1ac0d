use std::collections::HashMap;

use zeekline_api::tag::{TagId, Tagger};

use crate::error::CorelightError;
use crate::schema::{self, FieldList};

/// Where records of one category go: the negotiated tag and its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub tag: TagId,
    pub fields: FieldList,
}

/// Tag name → route table, built once per prefix and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    prefix: String,
    routes: HashMap<String, Route>,
}

impl TagRegistry {
    /// Negotiate `prefix + category` for every known category.
    ///
    /// The first failed negotiation aborts the build.
    pub fn build(prefix: &str, tagger: &dyn Tagger) -> Result<Self, CorelightError> {
        let mut routes = HashMap::with_capacity(schema::len());
        for (category, fields) in schema::categories() {
            let name = format!("{prefix}{category}");
            let tag = tagger
                .negotiate_tag(&name)
                .map_err(|source| CorelightError::Negotiate {
                    tag: name.clone(),
                    source,
                })?;
            tracing::debug!(tag_name = %name, tag = %tag, "negotiated tag");
            routes.insert(name, Route { tag, fields });
        }
        tracing::info!(prefix = %prefix, tags = routes.len(), "built corelight tag registry");
        Ok(Self {
            prefix: prefix.to_string(),
            routes,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn route(&self, tag_name: &str) -> Option<&Route> {
        self.routes.get(tag_name)
    }

    pub fn tag_id_for(&self, tag_name: &str) -> Option<TagId> {
        self.route(tag_name).map(|r| r.tag)
    }

    pub fn fields_for_tag_name(&self, tag_name: &str) -> Option<FieldList> {
        self.route(tag_name).map(|r| r.fields)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use zeekline_api::error::PluginError;

    use super::*;

    /// Hands out sequential ids and remembers every request.
    #[derive(Default)]
    struct SeqTagger {
        names: Mutex<Vec<String>>,
    }

    impl Tagger for SeqTagger {
        fn negotiate_tag(&self, name: &str) -> Result<TagId, PluginError> {
            let mut names = self.names.lock().unwrap();
            if let Some(pos) = names.iter().position(|n| n == name) {
                return Ok(TagId(pos as u16));
            }
            names.push(name.to_string());
            Ok(TagId((names.len() - 1) as u16))
        }

        fn lookup_tag(&self, tag: TagId) -> Option<String> {
            self.names.lock().unwrap().get(tag.0 as usize).cloned()
        }
    }

    /// Fails once `limit` tags have been handed out.
    struct LimitedTagger {
        inner: SeqTagger,
        limit: usize,
    }

    impl Tagger for LimitedTagger {
        fn negotiate_tag(&self, name: &str) -> Result<TagId, PluginError> {
            if self.inner.names.lock().unwrap().len() >= self.limit {
                return Err(PluginError::exhausted("tag space full"));
            }
            self.inner.negotiate_tag(name)
        }

        fn lookup_tag(&self, tag: TagId) -> Option<String> {
            self.inner.lookup_tag(tag)
        }
    }

    #[test]
    fn every_category_gets_a_prefixed_tag() {
        let tagger = SeqTagger::default();
        let registry = TagRegistry::build("zeek", &tagger).unwrap();
        assert_eq!(registry.len(), schema::len());
        assert_eq!(registry.prefix(), "zeek");

        for (category, fields) in schema::categories() {
            let name = format!("zeek{category}");
            let tag = registry.tag_id_for(&name).unwrap();
            assert_eq!(tagger.lookup_tag(tag).as_deref(), Some(name.as_str()));
            assert_eq!(registry.fields_for_tag_name(&name), Some(fields));
        }
    }

    #[test]
    fn bare_category_is_not_a_tag_name() {
        let registry = TagRegistry::build("zeek", &SeqTagger::default()).unwrap();
        assert!(registry.route("conn").is_none());
        assert!(registry.route("zeekconn").is_some());
        assert!(registry.route("zeekzeekdnp3").is_some());
    }

    #[test]
    fn custom_prefix_changes_tag_names_only() {
        let registry = TagRegistry::build("cl_", &SeqTagger::default()).unwrap();
        assert!(registry.route("zeekdns").is_none());
        assert_eq!(
            registry.fields_for_tag_name("cl_dns"),
            schema::fields_for("dns")
        );
    }

    #[test]
    fn negotiation_failure_aborts_build() {
        let tagger = LimitedTagger {
            inner: SeqTagger::default(),
            limit: 3,
        };
        let err = TagRegistry::build("zeek", &tagger).unwrap_err();
        match err {
            CorelightError::Negotiate { tag, source } => {
                assert!(tag.starts_with("zeek"));
                assert_eq!(source.kind, zeekline_api::error::ErrorKind::Exhausted);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
