use serde_json::json;

use crate::compute_hpath;
use crate::document::document_model::{NodeId, TreeView};
use crate::document::snapshot::DocumentSnapshot;
use crate::error::HPathError;
use crate::locate_many;
use crate::reduce::outline::format_outline;
use crate::reduce::reduced_model::ReducedTree;
use crate::reduce::simplifier::{simplify_document, SimplifierConfig};
use crate::report::console::format_console_report;
use crate::report::report_model::BatchReport;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::LocateTrace;
use crate::LocateRun;

// ============================================================================
// locate subcommand
// ============================================================================

/// Print the HPath of one node. Returns whether a path was produced.
pub fn cmd_locate(
    snapshot_path: &str,
    target: Option<usize>,
    format: &str,
    config: &SimplifierConfig,
    tracer: &TraceLogger,
) -> Result<bool, Box<dyn std::error::Error>> {
    let doc = DocumentSnapshot::load(snapshot_path)?;
    let target = resolve_target(&doc, target)?;

    let run = compute_hpath(&doc, target, config)?;

    tracer.log(
        &LocateTrace::now(target.map(|t| t.0))
            .with_url(doc.url())
            .with_outcome(&run.outcome)
            .with_tree(run.reduced_nodes, run.fingerprint.as_deref()),
    );

    println!("{}", format_locate(&run, target, format)?);
    Ok(run.outcome.is_located())
}

/// Render a locate result as plain text or JSON.
pub fn format_locate(
    run: &LocateRun,
    target: Option<NodeId>,
    format: &str,
) -> Result<String, HPathError> {
    match format {
        "json" => {
            let value = json!({
                "target": target.map(|t| t.0),
                "status": run.outcome.status(),
                "result": run.outcome.to_string(),
                "steps": run.outcome.path().map(|p| &p.steps),
                "reduced_nodes": run.reduced_nodes,
                "fingerprint": run.fingerprint,
            });
            serde_json::to_string_pretty(&value).map_err(|e| HPathError::Serialize(e.to_string()))
        }
        _ => Ok(run.outcome.to_string()),
    }
}

/// Explicit node id, else the snapshot's marked target, else none.
pub fn resolve_target(
    doc: &DocumentSnapshot,
    target: Option<usize>,
) -> Result<Option<NodeId>, HPathError> {
    match target {
        Some(index) if doc.contains(NodeId(index)) => Ok(Some(NodeId(index))),
        Some(index) => Err(HPathError::InvalidTarget(format!(
            "node {} does not exist (snapshot has {} nodes)",
            index,
            doc.len()
        ))),
        None => Ok(doc.marked_target()),
    }
}

// ============================================================================
// reduce subcommand
// ============================================================================

pub fn cmd_reduce(
    snapshot_path: &str,
    format: &str,
    config: &SimplifierConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = DocumentSnapshot::load(snapshot_path)?;
    println!("{}", render_reduced(&doc, format, config)?);
    Ok(())
}

/// Render the simplified tree as an outline, YAML or JSON.
pub fn render_reduced(
    doc: &DocumentSnapshot,
    format: &str,
    config: &SimplifierConfig,
) -> Result<String, HPathError> {
    let root = simplify_document(doc, config)?;

    match format {
        "yaml" => serde_yaml::to_string(&root).map_err(|e| HPathError::Serialize(e.to_string())),
        "json" => {
            serde_json::to_string_pretty(&root).map_err(|e| HPathError::Serialize(e.to_string()))
        }
        _ => Ok(match root {
            Some(root) => format_outline(&ReducedTree::new(root)),
            None => "(every node was pruned)".to_string(),
        }),
    }
}

// ============================================================================
// batch subcommand
// ============================================================================

pub fn cmd_batch(
    snapshot_path: &str,
    targets: &[usize],
    format: &str,
    output: Option<&str>,
    config: &SimplifierConfig,
    tracer: &TraceLogger,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = DocumentSnapshot::load(snapshot_path)?;
    let report = build_batch_report(&doc, targets, config)?;

    if verbose > 0 {
        eprintln!(
            "Located {}/{} nodes of {}",
            report.located, report.total, snapshot_path
        );
    }

    for entry in &report.entries {
        tracer.log(&LocateTrace {
            status: entry.status.clone(),
            hpath: (entry.status == "located").then(|| entry.result.clone()),
            reduced_nodes: report.reduced_nodes,
            fingerprint: report.fingerprint.clone(),
            ..LocateTrace::now(Some(entry.target)).with_url(doc.url())
        });
    }

    let content = match format {
        "json" => serde_json::to_string_pretty(&report)?,
        _ => format_console_report(&report),
    };

    match output {
        Some(path) => std::fs::write(path, &content)?,
        None => print!("{}", content),
    }

    Ok(())
}

/// Locate the given nodes, or every element when `targets` is empty.
pub fn build_batch_report(
    doc: &DocumentSnapshot,
    targets: &[usize],
    config: &SimplifierConfig,
) -> Result<BatchReport, HPathError> {
    let ids: Vec<NodeId> = if targets.is_empty() {
        doc.node_ids().filter(|id| doc.is_element(*id)).collect()
    } else {
        targets
            .iter()
            .map(|t| resolve_target(doc, Some(*t)))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect()
    };

    let (tree, outcomes) = locate_many(doc, &ids, config)?;

    Ok(BatchReport::from_outcomes(doc, &outcomes)
        .with_url(doc.url())
        .with_tree(
            tree.as_ref().map_or(0, ReducedTree::len),
            tree.as_ref().map(ReducedTree::fingerprint),
        ))
}
