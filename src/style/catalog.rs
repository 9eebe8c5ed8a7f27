use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::document::document_model::{NodeId, ProbeGuard, RenderedDocument, StyleMap};
use crate::error::HPathError;

// ============================================================================
// StyleCatalog — per-tag default computed style
// ============================================================================

/// Default computed style of a bare element, per tag.
///
/// Entries are discovered lazily by probing the document, so they reflect
/// its current stylesheets. A catalog must not outlive one computation.
#[derive(Debug, Default)]
pub struct StyleCatalog {
    defaults: HashMap<String, StyleMap>,
}

impl StyleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default value of `property` for `tag`, `""` when the tag has no such
    /// property.
    pub fn default_value<D: RenderedDocument + ?Sized>(
        &mut self,
        doc: &D,
        tag: &str,
        property: &str,
    ) -> Result<String, HPathError> {
        let styles = self.defaults_for(doc, tag)?;
        Ok(styles.get(property).cloned().unwrap_or_default())
    }

    /// True iff the node's computed `property` equals its tag default.
    /// Non-elements are never default.
    pub fn is_default<D: RenderedDocument + ?Sized>(
        &mut self,
        doc: &D,
        node: NodeId,
        property: &str,
    ) -> Result<bool, HPathError> {
        let Some(tag) = doc.tag(node).filter(|_| doc.is_element(node)) else {
            return Ok(false);
        };

        let default = self.default_value(doc, tag, property)?;
        let current = doc
            .computed_style(node)?
            .get(property)
            .map(String::as_str)
            .unwrap_or("");

        Ok(current == default)
    }

    /// Number of tags probed so far.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    fn defaults_for<D: RenderedDocument + ?Sized>(
        &mut self,
        doc: &D,
        tag: &str,
    ) -> Result<&StyleMap, HPathError> {
        match self.defaults.entry(tag.to_ascii_lowercase()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let styles = {
                    let probe = ProbeGuard::insert(doc, entry.key())?;
                    doc.computed_style(probe.id())?.clone()
                };
                tracing::debug!(tag = entry.key().as_str(), properties = styles.len(), "cached default style");
                Ok(entry.insert(styles))
            }
        }
    }
}
