use serde::{Deserialize, Serialize};

use crate::document::document_model::{NodeId, RenderedDocument, TreeView};
use crate::document::geometry::DEFAULT_PRECISION;
use crate::error::HPathError;
use crate::reduce::reduced_model::ReducedNode;
use crate::style::catalog::StyleCatalog;
use crate::style::properties::{is_border_property, is_painting_property};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimplifierConfig {
    /// Container tags that may vanish when they add nothing visible.
    #[serde(default = "default_removable_tags")]
    pub removable_tags: Vec<String>,

    /// Tolerance for comparing border boxes when folding.
    #[serde(default = "default_precision")]
    pub geometry_precision: f64,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            removable_tags: default_removable_tags(),
            geometry_precision: DEFAULT_PRECISION,
        }
    }
}

fn default_removable_tags() -> Vec<String> {
    vec!["div".to_string()]
}

fn default_precision() -> f64 {
    DEFAULT_PRECISION
}

// ============================================================================
// TreeSimplifier
// ============================================================================

/// Reduce a whole document. `None` means every node was pruned.
///
/// A fresh `StyleCatalog` is used for each call.
pub fn simplify_document<D: RenderedDocument + ?Sized>(
    doc: &D,
    config: &SimplifierConfig,
) -> Result<Option<ReducedNode>, HPathError> {
    let mut simplifier = TreeSimplifier::new(doc, config);
    let mut roots = simplifier.simplify(doc.root())?;

    if roots.len() > 1 {
        return Err(HPathError::MultipleRoots(roots.len()));
    }

    tracing::debug!(
        probed_tags = simplifier.catalog.len(),
        nodes = roots.first().map_or(0, ReducedNode::size),
        "document simplified"
    );
    Ok(roots.pop())
}

/// Bottom-up removal of redundant wrapper nodes.
pub struct TreeSimplifier<'a, D: RenderedDocument + ?Sized> {
    doc: &'a D,
    config: &'a SimplifierConfig,
    catalog: StyleCatalog,
}

impl<'a, D: RenderedDocument + ?Sized> TreeSimplifier<'a, D> {
    pub fn new(doc: &'a D, config: &'a SimplifierConfig) -> Self {
        Self {
            doc,
            config,
            catalog: StyleCatalog::new(),
        }
    }

    /// Simplify the subtree at `node`. A node contributes zero nodes
    /// (whitespace), itself, or its own simplified children when its wrapper
    /// is dropped.
    pub fn simplify(&mut self, node: NodeId) -> Result<Vec<ReducedNode>, HPathError> {
        let doc = self.doc;

        if doc.is_whitespace_text(node) {
            return Ok(vec![]);
        }

        if doc.children(node).is_empty() {
            return Ok(vec![ReducedNode::copy_of(doc, node)]);
        }

        let mut children = Vec::new();
        for child in doc.children(node) {
            children.extend(self.simplify(*child)?);
        }

        if !self.keep(node)? {
            tracing::debug!(node = %node, tag = doc.tag(node), spliced = children.len(), "wrapper removed");
            return Ok(children);
        }

        Ok(vec![self.create_node(node, children)?])
    }

    fn keep(&mut self, node: NodeId) -> Result<bool, HPathError> {
        if self.doc.is_whitespace_text(node) {
            return Ok(false);
        }

        if !self.is_removable(node) {
            return Ok(true);
        }

        if self.owns_text(node) {
            return Ok(true);
        }

        self.affects_rendering(node)
    }

    fn create_node(
        &mut self,
        node: NodeId,
        mut children: Vec<ReducedNode>,
    ) -> Result<ReducedNode, HPathError> {
        let mut parent = ReducedNode::copy_of(self.doc, node);

        if children.len() == 1 && self.can_fold(node, &children[0])? {
            if let Some(child) = children.pop() {
                tracing::debug!(node = %node, child = ?child.origin, "folded same-box child");
                parent.union_attributes(child.attributes);
                parent.children = child.children;
            }
        } else {
            parent.children = children;
        }

        Ok(parent)
    }

    /// Same tag and the same border box as the sole child.
    fn can_fold(&self, node: NodeId, child: &ReducedNode) -> Result<bool, HPathError> {
        let doc = self.doc;

        if !doc.is_element(node) || child.tag.as_deref() != doc.tag(node) {
            return Ok(false);
        }
        let Some(child_origin) = child.origin else {
            return Ok(false);
        };
        if !doc.is_element(child_origin) {
            return Ok(false);
        }

        match (doc.border_box(node)?, doc.border_box(child_origin)?) {
            (Some(outer), Some(inner)) => Ok(outer.same_as(&inner, self.config.geometry_precision)),
            _ => Ok(false),
        }
    }

    fn is_removable(&self, node: NodeId) -> bool {
        self.doc.is_element(node)
            && self
                .config
                .removable_tags
                .iter()
                .any(|t| self.doc.has_tag(node, t))
    }

    /// Directly owns a non-whitespace Text/CDATA child.
    fn owns_text(&self, node: NodeId) -> bool {
        let doc = self.doc;
        doc.children(node)
            .iter()
            .any(|c| doc.kind(*c).is_textual() && !doc.is_whitespace_text(*c))
    }

    /// Carries attributes and paints differently from its surroundings:
    /// a non-default border, or a painting property not inherited as is.
    fn affects_rendering(&mut self, node: NodeId) -> Result<bool, HPathError> {
        let doc = self.doc;

        if doc.attribute_count(node) == 0 {
            return Ok(false);
        }

        let style = doc.computed_style(node)?;
        let parent = doc.parent_element(node);

        for (property, value) in style {
            if is_border_property(property) && !self.catalog.is_default(doc, node, property)? {
                tracing::trace!(node = %node, property = property.as_str(), "border differs from default");
                return Ok(true);
            }

            if is_painting_property(property) && !self.is_inherited(node, parent, property, value)? {
                tracing::trace!(node = %node, property = property.as_str(), "painting differs from parent");
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Same value as the parent element, or the tag default for the root.
    fn is_inherited(
        &mut self,
        node: NodeId,
        parent: Option<NodeId>,
        property: &str,
        value: &str,
    ) -> Result<bool, HPathError> {
        match parent {
            Some(p) => {
                let inherited = self
                    .doc
                    .computed_style(p)?
                    .get(property)
                    .map(String::as_str)
                    .unwrap_or("");
                Ok(inherited == value)
            }
            None => self.catalog.is_default(self.doc, node, property),
        }
    }
}
