use crate::document::document_model::{NodeId, NodeKind, TreeView};
use crate::locate::step::{Disambiguator, HPath, LocateOutcome, PathStep};
use crate::reduce::reduced_model::{ReducedId, ReducedTree};
use crate::text::caption::{caption_like, label};
use crate::text::extractor::extract_text;

/// Form controls that can be named by a label.
pub const INPUT_TAGS: &[&str] = &["input", "select", "textarea", "button", "option"];

// ============================================================================
// Locate — ascent from the target to the root
// ============================================================================

/// Compute the HPath of `target` in a reduced tree.
pub fn locate(tree: &ReducedTree, target: Option<NodeId>) -> LocateOutcome {
    let Some(target) = target else {
        return LocateOutcome::TargetIsNull;
    };
    let Some(start) = tree.find_by_origin(target) else {
        tracing::debug!(node = %target, "target has no node in the reduced tree");
        return LocateOutcome::TargetNotPresent;
    };

    let mut steps = Vec::new();
    let mut current = Some(start);

    while let Some(id) = current {
        let step = compute_step(tree, id);
        if step.is_empty() {
            break;
        }

        tracing::debug!(label = step.label.as_str(), optimized = step.optimized, "step computed");
        let optimized = step.optimized;
        let skip_parent = step.skip_parent;
        steps.push(step);

        if optimized {
            break;
        }

        current = tree.parent(id);
        if skip_parent {
            current = current.and_then(|p| tree.parent(p));
        }
    }

    steps.reverse();
    LocateOutcome::Path(HPath::new(steps))
}

/// Path step for one reduced node.
pub fn compute_step(tree: &ReducedTree, id: ReducedId) -> PathStep {
    match tree.kind(id) {
        NodeKind::Text | NodeKind::CData => PathStep::text_node(),
        NodeKind::Element => match tree.tag(id) {
            Some(tag) if !tag.is_empty() => {
                let disambiguator = STEP_RULES
                    .iter()
                    .find_map(|(_, rule)| rule(tree, id, tag));
                PathStep::element(tag, disambiguator)
            }
            _ => PathStep::empty(),
        },
        NodeKind::Other => PathStep::empty(),
    }
}

// ============================================================================
// Disambiguation rules, in priority order
// ============================================================================

type StepRule = fn(&ReducedTree, ReducedId, &str) -> Option<Disambiguator>;

/// First rule returning a disambiguator wins. No match renders the bare tag.
pub const STEP_RULES: [(&str, StepRule); 6] = [
    ("clickable-text", clickable_text),
    ("input-label", input_label),
    ("table-caption", table_caption),
    ("fieldset-legend", fieldset_legend),
    ("figure-caption", figure_caption),
    ("position", position),
];

fn clickable_text(tree: &ReducedTree, id: ReducedId, tag: &str) -> Option<Disambiguator> {
    if !is_clickable(tree, id) {
        return None;
    }
    let text = extract_text(tree, id, true).filter(|t| !t.is_empty())?;

    Some(Disambiguator {
        optimized: count_clickable_with_text(tree, tag, &text) == 1,
        predicate: format!("text()=\"{}\"", text),
        skip_parent: false,
    })
}

fn input_label(tree: &ReducedTree, id: ReducedId, tag: &str) -> Option<Disambiguator> {
    if !is_input(tag) {
        return None;
    }
    let resolved = label(tree, id);
    let text = resolved.text?;

    Some(Disambiguator {
        optimized: count_with_text(tree, "label", &text) == 1,
        predicate: format!("label()=\"{}\"", text),
        skip_parent: resolved.is_parent,
    })
}

fn table_caption(tree: &ReducedTree, id: ReducedId, tag: &str) -> Option<Disambiguator> {
    caption_rule(tree, id, tag, "table", "caption", "caption()")
}

fn fieldset_legend(tree: &ReducedTree, id: ReducedId, tag: &str) -> Option<Disambiguator> {
    caption_rule(tree, id, tag, "fieldset", "legend", "legend()")
}

fn figure_caption(tree: &ReducedTree, id: ReducedId, tag: &str) -> Option<Disambiguator> {
    caption_rule(tree, id, tag, "figure", "figcaption", "figCaption()")
}

fn caption_rule(
    tree: &ReducedTree,
    id: ReducedId,
    tag: &str,
    container: &str,
    caption_tag: &str,
    function: &str,
) -> Option<Disambiguator> {
    if !tag.eq_ignore_ascii_case(container) {
        return None;
    }
    let text = caption_like(tree, id, caption_tag)?;

    Some(Disambiguator {
        optimized: count_with_text(tree, caption_tag, &text) == 1,
        predicate: format!("{}=\"{}\"", function, text),
        skip_parent: false,
    })
}

/// 1-based rank among similar siblings, when there is more than one.
fn position(tree: &ReducedTree, id: ReducedId, _tag: &str) -> Option<Disambiguator> {
    let parent = tree.parent(id)?;
    let similar: Vec<ReducedId> = tree
        .children(parent)
        .iter()
        .copied()
        .filter(|s| are_similar(tree, id, *s))
        .collect();

    if similar.len() < 2 {
        return None;
    }

    let rank = similar.iter().position(|s| *s == id)? + 1;
    Some(Disambiguator::position(rank))
}

// ============================================================================
// Classification and uniqueness scans
// ============================================================================

/// Anchor, button, or `<input type="button|submit">`.
pub fn is_clickable<T: TreeView + ?Sized>(tree: &T, id: T::Id) -> bool {
    if tree.has_tag(id, "a") || tree.has_tag(id, "button") {
        return true;
    }

    tree.has_tag(id, "input")
        && tree.attribute(id, "type").is_some_and(|t| {
            t.eq_ignore_ascii_case("button") || t.eq_ignore_ascii_case("submit")
        })
}

pub fn is_input(tag: &str) -> bool {
    INPUT_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Same tag for elements; Text and CDATA count as one kind; otherwise the
/// same node kind.
pub fn are_similar<T: TreeView + ?Sized>(tree: &T, left: T::Id, right: T::Id) -> bool {
    if left == right {
        return true;
    }

    let (lk, rk) = (tree.kind(left), tree.kind(right));
    match (lk, rk) {
        (NodeKind::Element, NodeKind::Element) => tree.tag(left) == tree.tag(right),
        _ if lk == rk => true,
        _ => lk.is_textual() && rk.is_textual(),
    }
}

/// Clickable `tag` elements whose strict text equals `text`.
pub fn count_clickable_with_text(tree: &ReducedTree, tag: &str, text: &str) -> usize {
    tree.elements_by_tag(tag)
        .filter(|id| is_clickable(tree, *id))
        .filter(|id| extract_text(tree, *id, true).as_deref() == Some(text))
        .count()
}

/// `tag` elements whose non-strict text equals `text`.
pub fn count_with_text(tree: &ReducedTree, tag: &str, text: &str) -> usize {
    tree.elements_by_tag(tag)
        .filter(|id| extract_text(tree, *id, false).as_deref() == Some(text))
        .count()
}
