use serde::Serialize;

use crate::document::document_model::{NodeId, TreeView};
use crate::locate::step::LocateOutcome;

// ============================================================================
// Batch report — aggregates locate outcomes for one document
// ============================================================================

/// One located (or not located) node.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchEntry {
    /// Node id in the snapshot
    pub target: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// `located`, `not_present` or `null_target`
    pub status: String,

    /// HPath or diagnostic text
    pub result: String,

    /// The path starts at a globally unique step
    pub anchored: bool,
}

/// Aggregated outcomes of a batch locate run.
///
/// Built via `from_outcomes()`; consumed by the console reporter or
/// serialized as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub total: usize,
    pub located: usize,
    pub not_present: usize,

    /// Nodes in the reduced tree
    pub reduced_nodes: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn from_outcomes<T: TreeView<Id = NodeId> + ?Sized>(
        doc: &T,
        outcomes: &[(NodeId, LocateOutcome)],
    ) -> Self {
        let entries: Vec<BatchEntry> = outcomes
            .iter()
            .map(|(target, outcome)| BatchEntry {
                target: target.0,
                tag: doc.tag(*target).map(str::to_string),
                status: outcome.status().to_string(),
                result: outcome.to_string(),
                anchored: outcome.path().is_some_and(|p| p.is_anchored()),
            })
            .collect();

        let located = outcomes.iter().filter(|(_, o)| o.is_located()).count();

        Self {
            url: None,
            total: entries.len(),
            located,
            not_present: entries.len() - located,
            reduced_nodes: 0,
            fingerprint: None,
            entries,
        }
    }

    pub fn with_url(mut self, url: Option<&str>) -> Self {
        self.url = url.map(str::to_string);
        self
    }

    pub fn with_tree(mut self, reduced_nodes: usize, fingerprint: Option<String>) -> Self {
        self.reduced_nodes = reduced_nodes;
        self.fingerprint = fingerprint;
        self
    }

    /// Share of targets that got a path, 0.0 for an empty batch.
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.located as f64 / self.total as f64
        }
    }
}
