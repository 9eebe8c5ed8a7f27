use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::document::document_model::{AttributeMap, NodeId, NodeKind, TreeView};
use crate::reduce::outline::format_outline;

// ============================================================================
// ReducedNode — owned output of the simplifier
// ============================================================================

/// Node of the simplified tree.
///
/// `origin` is the raw node this one stands for. After a fold it names the
/// outer of the two merged nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReducedNode {
    pub kind: NodeKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "AttributeMap::is_empty")]
    pub attributes: AttributeMap,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<NodeId>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ReducedNode>,
}

impl ReducedNode {
    /// Shallow copy of a raw node: kind, tag, text and attributes.
    pub fn copy_of<T: TreeView<Id = NodeId> + ?Sized>(doc: &T, id: NodeId) -> Self {
        let attributes = if doc.is_element(id) {
            collect_attributes(doc, id)
        } else {
            AttributeMap::new()
        };

        ReducedNode {
            kind: doc.kind(id),
            tag: doc.tag(id).map(str::to_string),
            text: doc.text(id).map(str::to_string),
            attributes,
            origin: Some(id),
            children: vec![],
        }
    }

    /// Merge `other`'s attributes into this node. Names present on both end
    /// up as `"<ours> <theirs>"`.
    pub fn union_attributes(&mut self, other: AttributeMap) {
        for (name, value) in other {
            match self.attributes.get_mut(&name) {
                Some(existing) => {
                    existing.push(' ');
                    existing.push_str(&value);
                }
                None => {
                    self.attributes.insert(name, value);
                }
            }
        }
    }

    /// Total number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(ReducedNode::size).sum::<usize>()
    }
}

fn collect_attributes<T: TreeView<Id = NodeId> + ?Sized>(doc: &T, id: NodeId) -> AttributeMap {
    doc.attribute_names(id)
        .into_iter()
        .filter_map(|name| {
            doc.attribute(id, &name)
                .map(|value| (name.clone(), value.to_string()))
        })
        .collect()
}

// ============================================================================
// ReducedTree — indexed arena over a ReducedNode tree
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReducedId(pub usize);

#[derive(Debug, Clone)]
struct IndexedNode {
    kind: NodeKind,
    tag: Option<String>,
    text: Option<String>,
    attributes: AttributeMap,
    origin: Option<NodeId>,
    parent: Option<ReducedId>,
    children: Vec<ReducedId>,
}

/// Reduced tree with parent links and an index from original node to
/// reduced node. Ids are pre-order, the root is `ReducedId(0)`.
#[derive(Debug, Clone)]
pub struct ReducedTree {
    nodes: Vec<IndexedNode>,
    by_origin: HashMap<NodeId, ReducedId>,
}

impl ReducedTree {
    /// Index a reduced tree.
    ///
    /// Panics if two nodes reference the same original: the simplifier never
    /// produces such a tree.
    pub fn new(root: ReducedNode) -> Self {
        let mut tree = ReducedTree {
            nodes: Vec::with_capacity(root.size()),
            by_origin: HashMap::new(),
        };
        tree.push(root, None);
        tree
    }

    fn push(&mut self, node: ReducedNode, parent: Option<ReducedId>) -> ReducedId {
        let id = ReducedId(self.nodes.len());
        let ReducedNode {
            kind,
            tag,
            text,
            attributes,
            origin,
            children,
        } = node;

        if let Some(original) = origin {
            let previous = self.by_origin.insert(original, id);
            assert!(
                previous.is_none(),
                "original node {} is represented twice in the reduced tree",
                original
            );
        }

        self.nodes.push(IndexedNode {
            kind,
            tag,
            text,
            attributes,
            origin,
            parent,
            children: Vec::new(),
        });

        let child_ids: Vec<ReducedId> = children
            .into_iter()
            .map(|child| self.push(child, Some(id)))
            .collect();
        self.nodes[id.0].children = child_ids;

        id
    }

    pub fn root(&self) -> ReducedId {
        ReducedId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = ReducedId> + '_ {
        (0..self.nodes.len()).map(ReducedId)
    }

    /// Elements tagged `tag`, in document order.
    pub fn elements_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = ReducedId> + 'a {
        self.ids().filter(move |id| self.has_tag(*id, tag))
    }

    pub fn origin(&self, id: ReducedId) -> Option<NodeId> {
        self.nodes[id.0].origin
    }

    /// The reduced node standing for `original`, if it survived.
    pub fn find_by_origin(&self, original: NodeId) -> Option<ReducedId> {
        self.by_origin.get(&original).copied()
    }

    pub fn attributes(&self, id: ReducedId) -> &AttributeMap {
        &self.nodes[id.0].attributes
    }

    /// SHA-1 of the tree's outline; equal trees have equal fingerprints.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let mut hasher = Sha1::new();
        hasher.update(format_outline(self).as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl TreeView for ReducedTree {
    type Id = ReducedId;

    fn kind(&self, id: ReducedId) -> NodeKind {
        self.nodes[id.0].kind
    }

    fn tag(&self, id: ReducedId) -> Option<&str> {
        self.nodes[id.0].tag.as_deref()
    }

    fn attribute(&self, id: ReducedId, name: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(name).map(String::as_str)
    }

    fn attribute_count(&self, id: ReducedId) -> usize {
        self.nodes[id.0].attributes.len()
    }

    fn attribute_names(&self, id: ReducedId) -> Vec<String> {
        self.nodes[id.0].attributes.keys().cloned().collect()
    }

    fn children(&self, id: ReducedId) -> &[ReducedId] {
        &self.nodes[id.0].children
    }

    fn parent(&self, id: ReducedId) -> Option<ReducedId> {
        self.nodes[id.0].parent
    }

    fn text(&self, id: ReducedId) -> Option<&str> {
        self.nodes[id.0].text.as_deref()
    }
}

impl fmt::Display for ReducedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_outline(self))
    }
}
