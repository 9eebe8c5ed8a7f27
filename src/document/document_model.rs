use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::document::geometry::{border_widths, BorderBox, OffsetBox};
use crate::error::HPathError;

/// Attribute name → value.
pub type AttributeMap = BTreeMap<String, String>;

/// Computed-style property → value.
pub type StyleMap = BTreeMap<String, String>;

/// Handle of a node in the raw document. Never owns the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Element,
    Text,
    #[serde(rename = "cdata")]
    CData,
    Other,
}

impl NodeKind {
    /// Text and CDATA are one kind for sibling comparison and text extraction.
    pub fn is_textual(self) -> bool {
        matches!(self, NodeKind::Text | NodeKind::CData)
    }
}

/// Whitespace as understood by the document: tab, LF, VT, FF, CR and space.
pub fn is_document_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' ')
}

// ============================================================================
// TreeView — read-only structural access
// ============================================================================

/// Structural read access shared by the raw document and the reduced tree.
///
/// Text extraction and caption resolution are written against this trait so
/// they run unchanged on either representation.
pub trait TreeView {
    type Id: Copy + Eq + Hash + fmt::Debug;

    fn kind(&self, id: Self::Id) -> NodeKind;

    /// Lowercase tag name, `None` for non-elements.
    fn tag(&self, id: Self::Id) -> Option<&str>;

    fn attribute(&self, id: Self::Id, name: &str) -> Option<&str>;

    fn attribute_count(&self, id: Self::Id) -> usize;

    fn attribute_names(&self, id: Self::Id) -> Vec<String>;

    fn children(&self, id: Self::Id) -> &[Self::Id];

    fn parent(&self, id: Self::Id) -> Option<Self::Id>;

    /// Character data of Text/CDATA nodes.
    fn text(&self, id: Self::Id) -> Option<&str>;

    fn is_element(&self, id: Self::Id) -> bool {
        self.kind(id) == NodeKind::Element
    }

    fn has_tag(&self, id: Self::Id, tag: &str) -> bool {
        self.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(tag))
    }

    /// True for Text/CDATA nodes made only of document whitespace.
    fn is_whitespace_text(&self, id: Self::Id) -> bool {
        self.kind(id).is_textual()
            && self
                .text(id)
                .map_or(true, |t| t.chars().all(is_document_whitespace))
    }

    fn parent_element(&self, id: Self::Id) -> Option<Self::Id> {
        self.parent(id).filter(|p| self.is_element(*p))
    }

    /// Direct element children, optionally restricted to one tag.
    fn child_elements(&self, id: Self::Id, tag: Option<&str>) -> Vec<Self::Id> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
            .filter(|c| tag.map_or(true, |t| self.has_tag(*c, t)))
            .collect()
    }
}

// ============================================================================
// RenderedDocument — style, geometry and probing
// ============================================================================

/// A rendered document: tree plus computed style and layout geometry.
///
/// Implementations are supplied by the rendering collaborator; the engine
/// only reads them, apart from the transient probe elements used to discover
/// per-tag default styles.
pub trait RenderedDocument: TreeView<Id = NodeId> {
    /// The document element.
    fn root(&self) -> NodeId;

    fn computed_style(&self, id: NodeId) -> Result<&StyleMap, HPathError>;

    /// Offset geometry including borders, `None` when the node has no box.
    fn offset_box(&self, id: NodeId) -> Option<OffsetBox>;

    /// Insert a detached, unstyled element of `tag` whose computed style can
    /// then be read. Must be paired with `remove_probe`; use `ProbeGuard`.
    fn insert_probe(&self, tag: &str) -> Result<NodeId, HPathError>;

    fn remove_probe(&self, id: NodeId);

    /// Border box: the offset box shrunk by the node's border widths.
    fn border_box(&self, id: NodeId) -> Result<Option<BorderBox>, HPathError> {
        if !self.is_element(id) {
            return Ok(None);
        }
        let Some(offset) = self.offset_box(id) else {
            return Ok(None);
        };
        let borders = border_widths(self.computed_style(id)?);
        Ok(Some(BorderBox::from_offset(&offset, &borders)))
    }
}

/// Scoped probe element: inserted on creation, removed on drop.
pub struct ProbeGuard<'a, D: RenderedDocument + ?Sized> {
    doc: &'a D,
    id: NodeId,
}

impl<'a, D: RenderedDocument + ?Sized> ProbeGuard<'a, D> {
    pub fn insert(doc: &'a D, tag: &str) -> Result<Self, HPathError> {
        let id = doc.insert_probe(tag)?;
        tracing::debug!(tag, probe = %id, "inserted style probe");
        Ok(Self { doc, id })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<D: RenderedDocument + ?Sized> Drop for ProbeGuard<'_, D> {
    fn drop(&mut self) {
        self.doc.remove_probe(self.id);
        tracing::debug!(probe = %self.id, "removed style probe");
    }
}
