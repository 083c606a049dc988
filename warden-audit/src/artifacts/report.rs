//! Human-readable audit report renderer.
//!
//! The report deliberately separates "no violations" from "could not
//! evaluate": a clean findings section plus a non-empty could-not-evaluate
//! section means the audit is incomplete, not passing.

use std::fmt::Write as _;

use warden_analysis::checks::Finding;

use crate::coverage::{CoverageComputer, Gap};
use crate::reconcile::CoverageStatus;

use super::types::CoverageMap;

/// Everything the renderer needs beyond the coverage map itself.
pub struct ReportInputs<'a> {
    pub map: &'a CoverageMap,
    /// Full gap list; the report truncates, the machine artifact does not.
    pub gaps: &'a [Gap],
    pub top_gaps: usize,
    /// `(path, present)` for each evidence document.
    pub evidence_files: Vec<(String, bool)>,
    pub findings: &'a [Finding],
    pub unparseable_documents: Vec<String>,
    pub unclassified_rules: Vec<String>,
    pub digest_mismatches: Vec<String>,
}

/// Render the Markdown report.
pub fn render_report(inputs: &ReportInputs) -> String {
    let map = inputs.map;
    let mut out = String::new();

    let _ = writeln!(out, "# Governance Coverage Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated: {}", map.metadata.generated_at);
    if let Some(commit) = &map.metadata.repository_commit {
        let _ = writeln!(out, "Commit: {commit}");
    }

    // Totals
    let summary = &map.summary;
    let _ = writeln!(out, "\n## Totals\n");
    let _ = writeln!(out, "- Rules declared: {}", summary.rules_total);
    let _ = writeln!(out, "- Enforced: {}", summary.rules_enforced);
    let _ = writeln!(out, "- Partially enforced: {}", summary.rules_partially_enforced);
    let _ = writeln!(
        out,
        "- Implementable or declared only: {}",
        summary.rules_implementable_or_declared_only
    );
    let _ = writeln!(out, "- Unknown: {}", summary.rules_unknown);
    let _ = writeln!(out, "- Execution rate: {:.1}%", summary.execution_rate);

    // Evidence file presence
    let _ = writeln!(out, "\n## Evidence files\n");
    if inputs.evidence_files.is_empty() {
        let _ = writeln!(out, "- none configured");
    }
    for (path, present) in &inputs.evidence_files {
        let state = if *present { "present" } else { "missing" };
        let _ = writeln!(out, "- `{path}` — {state}");
    }

    // Enforced rules, alphabetical by rule id
    let _ = writeln!(out, "\n## Enforced rules\n");
    let mut enforced: Vec<&crate::reconcile::EnforcementRecord> = map
        .entries
        .iter()
        .filter(|r| r.coverage_status == CoverageStatus::Enforced)
        .collect();
    enforced.sort_by(|a, b| a.rule.rule_id.cmp(&b.rule.rule_id));
    if enforced.is_empty() {
        let _ = writeln!(out, "no enforced rules yet");
    }
    for record in enforced {
        let _ = writeln!(out, "- {} — {}", record.rule.rule_id, record.rule.policy_path);
    }

    // Top gaps, severity tier then ascending id
    let _ = writeln!(out, "\n## Top gaps\n");
    if inputs.gaps.is_empty() {
        let _ = writeln!(out, "no gaps detected");
    } else {
        for gap in inputs.gaps.iter().take(inputs.top_gaps) {
            let _ = writeln!(
                out,
                "- [{}] {} — {}: {}",
                gap.severity, gap.rule_id, gap.policy_path, gap.statement
            );
        }
        if inputs.gaps.len() > inputs.top_gaps {
            let _ = writeln!(
                out,
                "- … {} more (full list in the coverage map)",
                inputs.gaps.len() - inputs.top_gaps
            );
        }
    }

    // Per-policy table
    let _ = writeln!(out, "\n## Per-policy coverage\n");
    let breakdown = CoverageComputer::per_policy(&map.entries);
    if breakdown.is_empty() {
        let _ = writeln!(out, "no policy files discovered");
    } else {
        let _ = writeln!(out, "| Policy | Enforced | Partial | Declared | Unknown |");
        let _ = writeln!(out, "|---|---|---|---|---|");
        for (policy, counts) in &breakdown {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                policy, counts.enforced, counts.partial, counts.declared, counts.unknown
            );
        }
    }

    // Findings
    let _ = writeln!(out, "\n## Findings\n");
    if inputs.findings.is_empty() {
        let _ = writeln!(out, "no violations");
    }
    for finding in inputs.findings {
        let location = match finding.line_number {
            Some(line) => format!("{}:{line}", finding.file_path),
            None => finding.file_path.clone(),
        };
        let _ = writeln!(
            out,
            "- [{}] {} — {} ({})",
            finding.severity, location, finding.message, finding.check_id
        );
    }

    // Could-not-evaluate sections
    let _ = writeln!(out, "\n## Could not evaluate\n");
    let _ = writeln!(out, "### Unparseable documents\n");
    render_list(&mut out, &inputs.unparseable_documents);
    let _ = writeln!(out, "\n### Unclassifiable rules\n");
    render_list(&mut out, &inputs.unclassified_rules);
    let _ = writeln!(out, "\n### Digest mismatches\n");
    render_list(&mut out, &inputs.digest_mismatches);

    out
}

fn render_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "none");
        return;
    }
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}
