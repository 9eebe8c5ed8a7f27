use crate::report::report_model::BatchReport;

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format a batch report for terminal output.
///
/// Produces output like:
/// ```text
/// === HPath batch: https://example.com/ ===
///
/// ✓ #4   <a>       //a[text()="Home"]
/// ✓ #9   <li>      /html/body/ul/li[2]
/// ✗ #12  <div>     target not present in reduced tree
///
/// === Results: 2 located, 1 not present (3 total, 41 reduced nodes) ===
/// ```
pub fn format_console_report(report: &BatchReport) -> String {
    let mut out = String::new();

    let title = report.url.as_deref().unwrap_or("snapshot");
    out.push_str(&format!("=== HPath batch: {} ===\n\n", title));

    for entry in &report.entries {
        let marker = if entry.status == "located" {
            "\u{2713}"
        } else {
            "\u{2717}"
        };
        let tag = entry
            .tag
            .as_deref()
            .map(|t| format!("<{}>", t))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!(
            "{} {:<5}{:<10}{}\n",
            marker,
            format!("#{}", entry.target),
            tag,
            entry.result
        ));
    }

    out.push_str(&format!(
        "\n=== Results: {} located, {} not present ({} total, {} reduced nodes) ===\n",
        report.located, report.not_present, report.total, report.reduced_nodes
    ));

    out
}
