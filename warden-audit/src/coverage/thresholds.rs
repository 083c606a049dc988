//! Coverage-threshold gates: scope entries of the form
//! `<glob> >= <percent>%` evaluated against the source-coverage evidence.

use glob::Pattern;
use tracing::debug;

use warden_analysis::checks::Finding;
use warden_analysis::discovery::{Rule, Severity};

use crate::evidence::CoverageEvidence;

const CHECK_ID: &str = "coverage_threshold";

/// Parse a threshold scope entry into `(glob, required_percent)`.
/// Returns `None` for plain scope globs.
pub fn parse_threshold(scope_entry: &str) -> Option<(String, f64)> {
    let (glob_part, percent_part) = scope_entry.split_once(">=")?;
    let glob = glob_part.trim();
    let percent = percent_part.trim().strip_suffix('%')?.trim();
    if glob.is_empty() {
        return None;
    }
    percent
        .parse::<f64>()
        .ok()
        .map(|required| (glob.to_string(), required))
}

/// Evaluate every threshold entry of every rule against the evidence map.
///
/// Emits an ERROR finding (carrying both values) when the weighted
/// coverage falls below the requirement, a WARNING when a glob matches no
/// evidence entries (cannot verify), and a WARNING per exclusion glob that
/// matches nothing at all (dead configuration, likely a typo).
pub fn evaluate_thresholds(
    rules: &[Rule],
    evidence: &CoverageEvidence,
    exclusions: &[String],
) -> Vec<Finding> {
    let exclusion_patterns: Vec<(&String, Option<Pattern>)> = exclusions
        .iter()
        .map(|g| (g, Pattern::new(g).ok()))
        .collect();

    let mut findings = Vec::new();

    for rule in rules {
        for scope_entry in &rule.scope {
            let Some((glob, required)) = parse_threshold(scope_entry) else {
                continue;
            };
            let Ok(pattern) = Pattern::new(&glob) else {
                findings.push(Finding::error(
                    CHECK_ID,
                    format!("rule {} has an invalid coverage glob `{glob}`", rule.rule_id),
                    rule.policy_path.clone(),
                ));
                continue;
            };

            let mut total_statements = 0u64;
            let mut covered_statements = 0u64;
            let mut matched = 0usize;
            for (path, coverage) in &evidence.files {
                if !pattern.matches(path) {
                    continue;
                }
                if exclusion_patterns
                    .iter()
                    .any(|(_, p)| p.as_ref().is_some_and(|p| p.matches(path)))
                {
                    continue;
                }
                matched += 1;
                total_statements += coverage.num_statements;
                covered_statements += coverage.covered_lines;
            }

            if matched == 0 {
                findings.push(Finding {
                    check_id: CHECK_ID.to_string(),
                    severity: Severity::Warn,
                    message: format!(
                        "rule {} cannot be verified: glob `{glob}` matches no coverage evidence",
                        rule.rule_id
                    ),
                    file_path: rule.policy_path.clone(),
                    line_number: None,
                    evidence: None,
                });
                continue;
            }

            let weighted = if total_statements == 0 {
                100.0
            } else {
                covered_statements as f64 / total_statements as f64 * 100.0
            };
            debug!(
                rule = %rule.rule_id,
                glob = %glob,
                weighted,
                required,
                "evaluated coverage threshold"
            );

            if weighted < required {
                findings.push(Finding::error(
                    CHECK_ID,
                    format!(
                        "coverage for `{glob}` is below threshold: current={weighted:.1}, required={required:.1}"
                    ),
                    rule.policy_path.clone(),
                ));
            }
        }
    }

    // Dead exclusion configuration: an exclusion that matches nothing is
    // likely a typo and deserves a warning even when every gate passes.
    if !evidence.is_empty() {
        for (glob, pattern) in &exclusion_patterns {
            let matches_any = pattern
                .as_ref()
                .is_some_and(|p| evidence.files.keys().any(|path| p.matches(path)));
            if !matches_any {
                findings.push(Finding {
                    check_id: CHECK_ID.to_string(),
                    severity: Severity::Warn,
                    message: format!(
                        "coverage exclusion `{glob}` matches no evidence entries (dead configuration)"
                    ),
                    file_path: String::new(),
                    line_number: None,
                    evidence: None,
                });
            }
        }
    }

    findings
}
