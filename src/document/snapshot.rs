use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::document_model::{
    AttributeMap, NodeId, NodeKind, RenderedDocument, StyleMap, TreeView,
};
use crate::document::geometry::OffsetBox;
use crate::error::HPathError;

// ============================================================================
// Snapshot file model (nested, serde)
// ============================================================================

/// A captured document as written by a capture tool or by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Default computed style of a bare element, per tag.
    #[serde(default)]
    pub user_agent_styles: BTreeMap<String, StyleMap>,

    pub root: SnapshotNode,
}

/// One node of a captured document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnapshotNode {
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: AttributeMap,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Computed style. May be sparse: missing properties take the tag's
    /// user-agent default when the snapshot is loaded.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: StyleMap,

    #[serde(default, rename = "box", skip_serializing_if = "Option::is_none")]
    pub offset: Option<OffsetBox>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,

    /// Marks the element the capture tool was asked about.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub target: bool,
}

impl SnapshotNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            tag: None,
            attributes: AttributeMap::new(),
            text: None,
            style: StyleMap::new(),
            offset: None,
            children: vec![],
            target: false,
        }
    }

    pub fn element(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..Self::new(NodeKind::Element)
        }
    }

    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::new(NodeKind::Text)
        }
    }

    pub fn cdata(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::new(NodeKind::CData)
        }
    }

    /// Comment, processing instruction and the like.
    pub fn other() -> Self {
        Self::new(NodeKind::Other)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.style.insert(property.to_string(), value.to_string());
        self
    }

    pub fn at(mut self, left: f64, top: f64, width: f64, height: f64) -> Self {
        self.offset = Some(OffsetBox::new(left, top, width, height));
        self
    }

    pub fn child(mut self, child: SnapshotNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = SnapshotNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn as_target(mut self) -> Self {
        self.target = true;
        self
    }
}

// ============================================================================
// DocumentSnapshot — flattened, queryable document
// ============================================================================

#[derive(Debug, Clone)]
struct FlatNode {
    kind: NodeKind,
    tag: Option<String>,
    attributes: AttributeMap,
    text: Option<String>,
    style: StyleMap,
    offset: Option<OffsetBox>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory `RenderedDocument` built from a `SnapshotFile`.
///
/// Node ids are pre-order indices, the root is `#0`. Probe elements get ids
/// past the last node and only support `computed_style`.
#[derive(Debug)]
pub struct DocumentSnapshot {
    url: Option<String>,
    title: Option<String>,
    nodes: Vec<FlatNode>,
    user_agent_styles: BTreeMap<String, StyleMap>,
    target: Option<NodeId>,
    probes: RefCell<BTreeMap<NodeId, String>>,
    next_probe: Cell<usize>,
}

impl DocumentSnapshot {
    pub fn new(file: SnapshotFile) -> Self {
        let SnapshotFile {
            url,
            title,
            user_agent_styles,
            root,
        } = file;

        let mut snapshot = DocumentSnapshot {
            url,
            title,
            nodes: Vec::new(),
            user_agent_styles,
            target: None,
            probes: RefCell::new(BTreeMap::new()),
            next_probe: Cell::new(0),
        };
        snapshot.push_node(root, None);
        snapshot.next_probe.set(snapshot.nodes.len());
        snapshot
    }

    /// Convenience for building documents in code.
    pub fn from_root(root: SnapshotNode, user_agent_styles: BTreeMap<String, StyleMap>) -> Self {
        Self::new(SnapshotFile {
            url: None,
            title: None,
            user_agent_styles,
            root,
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self, HPathError> {
        let file: SnapshotFile =
            serde_json::from_str(content).map_err(|e| HPathError::SnapshotParse {
                context: "snapshot".into(),
                source: e,
            })?;
        Ok(Self::new(file))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, HPathError> {
        let file: SnapshotFile =
            serde_yaml::from_str(content).map_err(|e| HPathError::SnapshotYaml {
                context: "snapshot".into(),
                source: e,
            })?;
        Ok(Self::new(file))
    }

    /// Load a snapshot, YAML for `.yaml`/`.yml` files and JSON otherwise.
    pub fn load(path: &str) -> Result<Self, HPathError> {
        let content = std::fs::read_to_string(path).map_err(|e| HPathError::Io {
            path: path.to_string(),
            source: e,
        })?;

        let is_yaml = Path::new(path)
            .extension()
            .map_or(false, |e| e == "yaml" || e == "yml");

        if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    fn push_node(&mut self, node: SnapshotNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let SnapshotNode {
            kind,
            tag,
            attributes,
            text,
            style,
            offset,
            children,
            target,
        } = node;

        let tag = tag.map(|t| t.to_ascii_lowercase());
        let style = match (&kind, &tag) {
            (NodeKind::Element, Some(t)) => self.complete_style(t, style),
            _ => style,
        };

        if target {
            match self.target {
                None => self.target = Some(id),
                Some(first) => {
                    tracing::warn!(first = %first, ignored = %id, "snapshot marks several targets")
                }
            }
        }

        self.nodes.push(FlatNode {
            kind,
            tag,
            attributes,
            text,
            style,
            offset,
            parent,
            children: Vec::new(),
        });

        let child_ids: Vec<NodeId> = children
            .into_iter()
            .map(|child| self.push_node(child, Some(id)))
            .collect();
        self.nodes[id.0].children = child_ids;

        id
    }

    fn complete_style(&self, tag: &str, captured: StyleMap) -> StyleMap {
        match self.user_agent_styles.get(tag) {
            Some(defaults) => {
                let mut style = defaults.clone();
                style.extend(captured);
                style
            }
            None => captured,
        }
    }

    fn node(&self, id: NodeId) -> &FlatNode {
        match self.nodes.get(id.0) {
            Some(node) => node,
            None => panic!("node {} is not part of this snapshot", id),
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// All node ids in document order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// The node flagged `target: true`, if any.
    pub fn marked_target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.node_ids().filter(|id| self.has_tag(*id, tag)).collect()
    }

    pub fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        self.node_ids()
            .find(|id| self.attribute(*id, name) == Some(value))
    }

    /// Number of probe elements currently inserted.
    pub fn live_probes(&self) -> usize {
        self.probes.borrow().len()
    }
}

impl TreeView for DocumentSnapshot {
    type Id = NodeId;

    fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).tag.as_deref()
    }

    fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).attributes.get(name).map(String::as_str)
    }

    fn attribute_count(&self, id: NodeId) -> usize {
        self.node(id).attributes.len()
    }

    fn attribute_names(&self, id: NodeId) -> Vec<String> {
        self.node(id).attributes.keys().cloned().collect()
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).text.as_deref()
    }
}

impl RenderedDocument for DocumentSnapshot {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn computed_style(&self, id: NodeId) -> Result<&StyleMap, HPathError> {
        if let Some(node) = self.nodes.get(id.0) {
            return match node.kind {
                NodeKind::Element => Ok(&node.style),
                _ => Err(HPathError::NotAnElement(id)),
            };
        }

        let tag = self
            .probes
            .borrow()
            .get(&id)
            .cloned()
            .ok_or(HPathError::UnknownNode(id))?;

        self.user_agent_styles
            .get(&tag)
            .ok_or(HPathError::MissingDefaultStyle { tag })
    }

    fn offset_box(&self, id: NodeId) -> Option<OffsetBox> {
        self.nodes.get(id.0).and_then(|n| n.offset)
    }

    fn insert_probe(&self, tag: &str) -> Result<NodeId, HPathError> {
        let id = NodeId(self.next_probe.get());
        self.next_probe.set(id.0 + 1);
        self.probes
            .borrow_mut()
            .insert(id, tag.to_ascii_lowercase());
        Ok(id)
    }

    fn remove_probe(&self, id: NodeId) {
        self.probes.borrow_mut().remove(&id);
    }
}
