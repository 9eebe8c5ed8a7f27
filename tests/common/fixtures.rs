use std::collections::BTreeMap;

use hpath::compute_hpath;
use hpath::document::document_model::{NodeId, StyleMap};
use hpath::document::snapshot::{DocumentSnapshot, SnapshotNode};
use hpath::reduce::simplifier::SimplifierConfig;

/// Tags given the base user-agent style below.
const STYLED_TAGS: &[&str] = &[
    "html", "head", "body", "div", "span", "p", "h1", "ul", "ol", "li", "a", "b", "i", "em",
    "strong", "button", "input", "select", "option", "textarea", "label", "form", "table",
    "caption", "tr", "td", "fieldset", "legend", "figure", "figcaption", "img", "section",
];

/// The same defaults for every tag keeps "differs from parent" checks quiet
/// unless a test sets a property on purpose.
pub fn base_style() -> StyleMap {
    let mut style = StyleMap::new();
    for (property, value) in [
        ("background-color", "rgba(0, 0, 0, 0)"),
        ("border-bottom-style", "none"),
        ("border-bottom-width", "0px"),
        ("border-left-style", "none"),
        ("border-left-width", "0px"),
        ("border-right-style", "none"),
        ("border-right-width", "0px"),
        ("border-top-style", "none"),
        ("border-top-width", "0px"),
        ("color", "rgb(0, 0, 0)"),
        ("display", "block"),
        ("font-size", "16px"),
        ("opacity", "1"),
    ] {
        style.insert(property.to_string(), value.to_string());
    }
    style
}

pub fn ua_styles() -> BTreeMap<String, StyleMap> {
    STYLED_TAGS
        .iter()
        .map(|tag| (tag.to_string(), base_style()))
        .collect()
}

/// `<html><body>{children}</body></html>` with page-sized boxes.
pub fn page(children: Vec<SnapshotNode>) -> SnapshotNode {
    SnapshotNode::element("html").at(0.0, 0.0, 800.0, 600.0).child(
        SnapshotNode::element("body")
            .at(8.0, 8.0, 784.0, 584.0)
            .children(children),
    )
}

pub fn el(tag: &str) -> SnapshotNode {
    SnapshotNode::element(tag)
}

pub fn text(content: &str) -> SnapshotNode {
    SnapshotNode::text(content)
}

/// Element holding a single text child.
pub fn el_text(tag: &str, content: &str) -> SnapshotNode {
    SnapshotNode::element(tag).child(SnapshotNode::text(content))
}

pub fn doc(root: SnapshotNode) -> DocumentSnapshot {
    DocumentSnapshot::from_root(root, ua_styles())
}

/// Rendered locate result for `target` with the default configuration.
pub fn hpath_of(doc: &DocumentSnapshot, target: Option<NodeId>) -> String {
    compute_hpath(doc, target, &SimplifierConfig::default())
        .expect("locate should not fail on fixture documents")
        .outcome
        .to_string()
}

/// Locate the node marked with `as_target()`.
pub fn hpath_of_marked(doc: &DocumentSnapshot) -> String {
    let target = doc.marked_target().expect("fixture marks a target");
    hpath_of(doc, Some(target))
}

pub fn fixture_path(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    base.join("tests")
        .join("fixtures")
        .join(name)
        .display()
        .to_string()
}
