use crate::document::document_model::{NodeKind, TreeView};

/// Tags that are transparent for text extraction.
pub const INLINE_FORMATTING_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "mark", "small", "del", "ins", "sub", "sup", "a", "span",
];

pub fn is_inline_formatting(tag: &str) -> bool {
    INLINE_FORMATTING_TAGS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(tag))
}

/// Visible text of `element`, looking through inline formatting children.
///
/// With `strict`, any other element child means the element is not simple
/// text and `None` is returned. Without it such children are skipped.
pub fn extract_text<T: TreeView + ?Sized>(tree: &T, element: T::Id, strict: bool) -> Option<String> {
    let mut text = String::new();

    for child in tree.children(element) {
        let child = *child;
        match tree.kind(child) {
            NodeKind::Text | NodeKind::CData => {
                if tree.is_whitespace_text(child) {
                    continue;
                }
                text.push(' ');
                text.push_str(tree.text(child).unwrap_or("").trim());
            }
            NodeKind::Element => {
                let inline = tree.tag(child).is_some_and(is_inline_formatting);
                if inline {
                    if let Some(inner) = extract_text(tree, child, false) {
                        if !inner.is_empty() {
                            text.push(' ');
                            text.push_str(&inner);
                        }
                    }
                } else if strict {
                    return None;
                }
            }
            NodeKind::Other => {}
        }
    }

    Some(text.trim().to_string())
}
