use crate::document::document_model::TreeView;
use crate::text::extractor::extract_text;

/// Label text associated with a form control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelText {
    pub text: Option<String>,

    /// The label wraps the control, so the control's path step already
    /// accounts for the label level.
    pub is_parent: bool,
}

/// Resolve the label of a form control: a wrapping `<label>`, or exactly one
/// sibling `<label for="...">` naming the control's `id`. A sibling label
/// holding anything but text and inline formatting yields no text.
pub fn label<T: TreeView + ?Sized>(tree: &T, element: T::Id) -> LabelText {
    let Some(parent) = tree.parent_element(element) else {
        return LabelText::default();
    };

    if tree.has_tag(parent, "label") {
        return match non_empty_text(tree, parent) {
            Some(text) => LabelText {
                text: Some(text),
                is_parent: true,
            },
            None => LabelText::default(),
        };
    }

    let Some(id) = tree.attribute(element, "id") else {
        return LabelText::default();
    };

    let labels: Vec<T::Id> = tree
        .child_elements(parent, Some("label"))
        .into_iter()
        .filter(|l| *l != element)
        .filter(|l| tree.attribute(*l, "for") == Some(id))
        .collect();

    match labels.as_slice() {
        [only] => LabelText {
            text: extract_text(tree, *only, true).filter(|t| !t.is_empty()),
            is_parent: false,
        },
        _ => LabelText::default(),
    }
}

/// Text of the single direct child tagged `tag` (`caption`, `legend`,
/// `figcaption`). `None` when there is no such child or several.
pub fn caption_like<T: TreeView + ?Sized>(tree: &T, element: T::Id, tag: &str) -> Option<String> {
    match tree.child_elements(element, Some(tag)).as_slice() {
        [only] => non_empty_text(tree, *only),
        _ => None,
    }
}

fn non_empty_text<T: TreeView + ?Sized>(tree: &T, element: T::Id) -> Option<String> {
    extract_text(tree, element, false).filter(|t| !t.is_empty())
}
