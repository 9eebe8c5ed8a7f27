use crate::document::document_model::{NodeKind, TreeView};
use crate::reduce::reduced_model::{ReducedId, ReducedTree};

// ============================================================================
// Outline — indented text rendering of a reduced tree
// ============================================================================

/// Render a reduced tree, one node per line, two spaces per level.
///
/// Produces output like:
/// ```text
/// <html> #0
///   <body> #1
///     <ul class="menu"> #2
///       <li> #3
///         "Home" #4
/// ```
pub fn format_outline(tree: &ReducedTree) -> String {
    let mut out = String::new();
    write_node(tree, tree.root(), 0, &mut out);
    out
}

fn write_node(tree: &ReducedTree, id: ReducedId, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&describe(tree, id));

    if let Some(origin) = tree.origin(id) {
        out.push_str(&format!(" {}", origin));
    }
    out.push('\n');

    for child in tree.children(id) {
        write_node(tree, *child, depth + 1, out);
    }
}

fn describe(tree: &ReducedTree, id: ReducedId) -> String {
    match tree.kind(id) {
        NodeKind::Element => {
            let mut label = format!("<{}", tree.tag(id).unwrap_or("?"));
            for (name, value) in tree.attributes(id) {
                label.push_str(&format!(" {}=\"{}\"", name, value));
            }
            label.push('>');
            label
        }
        NodeKind::Text => format!("\"{}\"", tree.text(id).unwrap_or("").trim()),
        NodeKind::CData => format!("<![CDATA[{}]]>", tree.text(id).unwrap_or("")),
        NodeKind::Other => "<!-- -->".to_string(),
    }
}
