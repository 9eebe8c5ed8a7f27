use crate::{
    document::document_model::{NodeId, RenderedDocument},
    error::HPathError,
    locate::{path_builder::locate, step::LocateOutcome},
    reduce::{
        reduced_model::ReducedTree,
        simplifier::{simplify_document, SimplifierConfig},
    },
};

pub mod cli;
pub mod document;
pub mod error;
pub mod locate;
pub mod reduce;
pub mod report;
pub mod style;
pub mod text;
pub mod trace;

/// Outcome of one locate computation, with the reduced tree it ran on.
#[derive(Debug, Clone, PartialEq)]
pub struct LocateRun {
    pub outcome: LocateOutcome,

    /// Nodes in the reduced tree, 0 when the tree was not built or is empty.
    pub reduced_nodes: usize,

    /// SHA-1 of the reduced tree outline.
    pub fingerprint: Option<String>,
}

/// Simplify `doc` and index the result. `None` when everything was pruned.
pub fn reduce_document<D: RenderedDocument + ?Sized>(
    doc: &D,
    config: &SimplifierConfig,
) -> Result<Option<ReducedTree>, HPathError> {
    Ok(simplify_document(doc, config)?.map(ReducedTree::new))
}

/// Compute the HPath of `target` in `doc`.
///
/// A null target and a target without its own reduced node are reported in
/// the outcome. Errors come from reading the document only.
pub fn compute_hpath<D: RenderedDocument + ?Sized>(
    doc: &D,
    target: Option<NodeId>,
    config: &SimplifierConfig,
) -> Result<LocateRun, HPathError> {
    if target.is_none() {
        return Ok(LocateRun {
            outcome: LocateOutcome::TargetIsNull,
            reduced_nodes: 0,
            fingerprint: None,
        });
    }

    let run = match reduce_document(doc, config)? {
        Some(tree) => LocateRun {
            outcome: locate(&tree, target),
            reduced_nodes: tree.len(),
            fingerprint: Some(tree.fingerprint()),
        },
        None => LocateRun {
            outcome: LocateOutcome::TargetNotPresent,
            reduced_nodes: 0,
            fingerprint: None,
        },
    };

    tracing::info!(node = ?target, result = %run.outcome, "locate finished");
    Ok(run)
}

/// Locate several targets against one simplification of `doc`.
pub fn locate_many<D: RenderedDocument + ?Sized>(
    doc: &D,
    targets: &[NodeId],
    config: &SimplifierConfig,
) -> Result<(Option<ReducedTree>, Vec<(NodeId, LocateOutcome)>), HPathError> {
    let tree = reduce_document(doc, config)?;

    let outcomes = targets
        .iter()
        .map(|target| {
            let outcome = match &tree {
                Some(tree) => locate(tree, Some(*target)),
                None => LocateOutcome::TargetNotPresent,
            };
            (*target, outcome)
        })
        .collect();

    Ok((tree, outcomes))
}
