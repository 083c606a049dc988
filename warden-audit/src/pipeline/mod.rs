//! Single-pass batch orchestration of a whole audit run: policy loading,
//! rule discovery, enforcement checks, evidence reconciliation, coverage
//! computation, and artifact writing — in that order, with all writes
//! deferred until computation finishes.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use warden_analysis::checks::{
    build_method, is_implementable, CheckContext, Finding, RuleEnforcementCheck,
};
use warden_analysis::discovery::RuleDiscoveryEngine;
use warden_analysis::scanner::Scanner;
use warden_core::config::WardenConfig;
use warden_core::errors::{ArtifactError, EvidenceError};

use crate::artifacts::{
    render_report, ArtifactPaths, AuditArtifactWriter, CoverageMap, MapMetadata, ReportInputs,
};
use crate::coverage::{evaluate_thresholds, rank_gaps, CoverageComputer, Gap};
use crate::evidence::{
    load_coverage_evidence, load_execution_evidence, load_links, CoverageEvidence,
    ExecutionEvidence, ExplicitLink,
};
use crate::reconcile::EvidenceReconciler;

/// Everything one run produced, for the CLI to summarize.
pub struct RunOutcome {
    pub map: CoverageMap,
    pub findings: Vec<Finding>,
    pub gaps: Vec<Gap>,
    pub paths: ArtifactPaths,
}

pub struct AuditPipeline {
    root: PathBuf,
    config: WardenConfig,
}

impl AuditPipeline {
    pub fn new(root: impl Into<PathBuf>, config: WardenConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Execute one full audit run.
    ///
    /// Per-rule and per-file problems become findings and the run
    /// continues; only an artifact-layer failure (including an integrity
    /// mismatch guarding the destructive replace) aborts.
    pub async fn run(&self) -> Result<RunOutcome, ArtifactError> {
        let mut findings: Vec<Finding> = Vec::new();
        let mut unparseable_documents: Vec<String> = Vec::new();

        // Policy documents.
        let (documents, policy_errors) = self.load_policies();
        for (path, message) in &policy_errors {
            findings.push(Finding::error(
                "configuration_error",
                format!("policy document could not be loaded: {message}"),
                path.clone(),
            ));
            unparseable_documents.push(format!("{path} — {message}"));
        }

        // Rule discovery.
        let rules = RuleDiscoveryEngine::discover(&documents);
        info!(rules = rules.len(), policies = documents.len(), "discovered rules");

        // Source modules.
        let scan = Scanner::new(self.config.scan.clone()).scan(&self.root);
        for (path, message) in &scan.unreadable {
            findings.push(Finding::error(
                "unreadable_file",
                message.clone(),
                path.to_string_lossy().replace('\\', "/"),
            ));
        }
        for module in &scan.modules {
            if module.has_errors {
                let message = module
                    .first_error
                    .clone()
                    .unwrap_or_else(|| "syntax error".to_string());
                findings.push(Finding::syntax_error(module.path_str(), message));
            }
        }

        // Per-run context.
        let mut ctx = CheckContext::new(self.root.clone(), self.config.clone(), scan.modules);
        for (path, document) in &documents {
            ctx.insert_policy(path.clone(), document.clone());
        }
        for (path, message) in &policy_errors {
            ctx.record_policy_error(path.clone(), message.clone());
        }

        // Enforcement checks: one check per machine-checkable rule.
        for rule in &rules {
            let Some(method) = build_method(rule, &self.config.rules, &self.config.coverage)
            else {
                continue;
            };
            let check = RuleEnforcementCheck::builder()
                .policy(&rule.policy_path)
                .rule(rule.clone())
                .method(method)
                .complete();
            match check {
                Ok(check) => findings.extend(check.run(&ctx).await),
                Err(err) => findings.push(Finding::error(
                    "check_binding",
                    err.to_string(),
                    rule.policy_path.clone(),
                )),
            }
        }

        // Evidence documents.
        let (execution, links, coverage_evidence) =
            self.load_evidence(&mut findings, &mut unparseable_documents);

        // Reconciliation.
        let reconciler = EvidenceReconciler::new(&execution, &links, |check| {
            is_implementable(check, &self.config.rules)
        });
        let outcome = reconciler.reconcile(&rules);

        // Coverage thresholds and gaps.
        findings.extend(evaluate_thresholds(
            &rules,
            &coverage_evidence,
            &self.config.coverage.exclusions,
        ));
        let gaps = rank_gaps(&outcome.records);
        let summary = CoverageComputer::summarize(&outcome.records);

        let map = CoverageMap {
            metadata: MapMetadata {
                generated_at: Utc::now().to_rfc3339(),
                repository_commit: repository_commit(&self.root),
            },
            summary,
            entries: outcome.records,
        };

        let report = render_report(&ReportInputs {
            map: &map,
            gaps: &gaps,
            top_gaps: self.config.report.effective_top_gaps(),
            evidence_files: self.evidence_presence(),
            findings: &findings,
            unparseable_documents,
            unclassified_rules: outcome.unclassified,
            digest_mismatches: Vec::new(),
        });

        // All computation is done; only now do artifacts hit disk.
        let output_dir = self.root.join(self.config.report.effective_output_dir());
        let writer = AuditArtifactWriter::new(output_dir);
        let paths = writer.write(&map, &report)?;

        Ok(RunOutcome {
            map,
            findings,
            gaps,
            paths,
        })
    }

    /// Expand the policy globs and parse every matching document. Returns
    /// parsed `(relative_path, document)` pairs plus per-path load errors.
    fn load_policies(&self) -> (Vec<(String, serde_yaml::Value)>, Vec<(String, String)>) {
        let mut paths: BTreeSet<PathBuf> = BTreeSet::new();
        for pattern in self.config.policies.effective_paths() {
            let absolute = self.root.join(&pattern).to_string_lossy().to_string();
            match glob::glob(&absolute) {
                Ok(matches) => {
                    for path in matches.flatten() {
                        if path.is_file() {
                            paths.insert(path);
                        }
                    }
                }
                Err(e) => warn!(pattern = %pattern, error = %e, "invalid policy glob"),
            }
        }

        let mut documents = Vec::new();
        let mut errors = Vec::new();
        for path in paths {
            let rel = path
                .strip_prefix(&self.root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            match std::fs::read_to_string(&path) {
                Ok(raw) => match serde_yaml::from_str::<serde_yaml::Value>(&raw) {
                    Ok(document) => documents.push((rel, document)),
                    Err(e) => errors.push((rel, e.to_string())),
                },
                Err(e) => errors.push((rel, e.to_string())),
            }
        }
        debug!(loaded = documents.len(), failed = errors.len(), "loaded policy documents");
        (documents, errors)
    }

    /// Load the three evidence documents with deterministic degradation:
    /// a missing document is an empty evidence set; a broken one is an
    /// ERROR finding plus an empty set.
    fn load_evidence(
        &self,
        findings: &mut Vec<Finding>,
        unparseable_documents: &mut Vec<String>,
    ) -> (ExecutionEvidence, Vec<ExplicitLink>, CoverageEvidence) {
        let coverage_cfg = &self.config.coverage;

        let execution = match load_execution_evidence(
            &self.root.join(coverage_cfg.effective_execution_evidence_path()),
        ) {
            Ok(evidence) => evidence,
            Err(EvidenceError::NotFound { path }) => {
                debug!(%path, "no execution evidence this run");
                ExecutionEvidence::default()
            }
            Err(err) => {
                degrade(err, findings, unparseable_documents);
                ExecutionEvidence::default()
            }
        };

        let links = match load_links(&self.root.join(coverage_cfg.effective_links_path())) {
            Ok(links) => links,
            Err(EvidenceError::NotFound { path }) => {
                debug!(%path, "no explicit links this run");
                Vec::new()
            }
            Err(err) => {
                degrade(err, findings, unparseable_documents);
                Vec::new()
            }
        };

        let coverage = match load_coverage_evidence(
            &self.root.join(coverage_cfg.effective_evidence_path()),
        ) {
            Ok(evidence) => evidence,
            Err(EvidenceError::NotFound { path }) => {
                debug!(%path, "no source-coverage evidence this run");
                CoverageEvidence::default()
            }
            Err(err) => {
                degrade(err, findings, unparseable_documents);
                CoverageEvidence::default()
            }
        };

        (execution, links, coverage)
    }

    /// Presence of each configured evidence document, for the report.
    fn evidence_presence(&self) -> Vec<(String, bool)> {
        let coverage_cfg = &self.config.coverage;
        [
            coverage_cfg.effective_execution_evidence_path(),
            coverage_cfg.effective_links_path(),
            coverage_cfg.effective_evidence_path(),
        ]
        .into_iter()
        .map(|rel| {
            let present = self.root.join(&rel).exists();
            (rel, present)
        })
        .collect()
    }
}

fn degrade(
    err: EvidenceError,
    findings: &mut Vec<Finding>,
    unparseable_documents: &mut Vec<String>,
) {
    warn!(error = %err, "evidence document could not be loaded");
    findings.push(Finding::error(
        "configuration_error",
        err.to_string(),
        err.path().to_string(),
    ));
    unparseable_documents.push(format!("{} — {err}", err.path()));
}

/// Best-effort repository commit for artifact metadata: the
/// `WARDEN_COMMIT` override, else `.git/HEAD`.
fn repository_commit(root: &Path) -> Option<String> {
    if let Ok(commit) = std::env::var("WARDEN_COMMIT") {
        if !commit.is_empty() {
            return Some(commit);
        }
    }
    let head = std::fs::read_to_string(root.join(".git/HEAD")).ok()?;
    let head = head.trim();
    match head.strip_prefix("ref: ") {
        Some(reference) => std::fs::read_to_string(root.join(".git").join(reference))
            .ok()
            .map(|s| s.trim().to_string()),
        None => Some(head.to_string()),
    }
}
