//! RuleEnforcementCheck — binds one policy document, a fixed set of rules,
//! and an ordered list of enforcement methods. A check is built through
//! `RuleCheckBuilder` and cannot run until the builder declares it
//! complete, so half-specified checks never execute.

use futures::future::join_all;
use tracing::debug;

use warden_core::errors::CheckError;

use crate::discovery::Rule;

use super::context::CheckContext;
use super::method::CheckMethod;
use super::types::Finding;

#[derive(Debug)]
pub struct RuleEnforcementCheck {
    policy_path: String,
    rules: Vec<Rule>,
    methods: Vec<CheckMethod>,
}

impl RuleEnforcementCheck {
    pub fn builder() -> RuleCheckBuilder {
        RuleCheckBuilder::default()
    }

    pub fn policy_path(&self) -> &str {
        &self.policy_path
    }

    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.rule_id.as_str()).collect()
    }

    /// Run every method against every bound rule.
    ///
    /// Synchronous methods run sequentially in declared order; asynchronous
    /// methods are joined concurrently and their findings concatenated —
    /// the merge is associative and commutative, so execution order never
    /// affects the result.
    ///
    /// An unreachable or unparseable policy document yields exactly one
    /// ERROR finding naming the affected rule ids: the check never reports
    /// "no violations" when it could not evaluate anything.
    pub async fn run(&self, ctx: &CheckContext) -> Vec<Finding> {
        if let Err(err) = ctx.policy(&self.policy_path) {
            return vec![Finding::error(
                "policy_unavailable",
                format!(
                    "could not evaluate rules [{}]: {err}",
                    self.rule_ids().join(", ")
                ),
                self.policy_path.clone(),
            )];
        }

        let mut findings = Vec::new();
        let mut async_jobs = Vec::new();

        for method in &self.methods {
            match method {
                CheckMethod::Sync(m) => {
                    for rule in &self.rules {
                        match m.verify(ctx, rule) {
                            Ok(results) => findings.extend(results),
                            Err(err) => findings.push(method_failure(m.check_id(), rule, err)),
                        }
                    }
                }
                CheckMethod::Async(m) => {
                    for rule in &self.rules {
                        async_jobs.push(async move {
                            match m.verify(ctx, rule).await {
                                Ok(results) => results,
                                Err(err) => {
                                    vec![method_failure(m.check_id(), rule, err)]
                                }
                            }
                        });
                    }
                }
            }
        }

        for results in join_all(async_jobs).await {
            findings.extend(results);
        }

        debug!(
            policy = %self.policy_path,
            findings = findings.len(),
            "check completed"
        );
        findings
    }
}

/// One ERROR finding for a method that could not evaluate a rule.
fn method_failure(check_id: &str, rule: &Rule, err: CheckError) -> Finding {
    Finding::error(
        check_id,
        format!("could not evaluate rule {}: {err}", rule.rule_id),
        rule.policy_path.clone(),
    )
}

/// Builder for `RuleEnforcementCheck`. The binding stays abstract until
/// `complete()` validates it.
#[derive(Default)]
pub struct RuleCheckBuilder {
    policy_path: Option<String>,
    rules: Vec<Rule>,
    methods: Vec<CheckMethod>,
}

impl RuleCheckBuilder {
    pub fn policy(mut self, path: impl Into<String>) -> Self {
        self.policy_path = Some(path.into());
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn method(mut self, method: CheckMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare the binding complete, making it runnable.
    ///
    /// Fails with `IncompleteBinding` naming whatever is still missing.
    pub fn complete(self) -> Result<RuleEnforcementCheck, CheckError> {
        let mut missing = Vec::new();
        if self.policy_path.is_none() {
            missing.push("policy path");
        }
        if self.rules.is_empty() {
            missing.push("rule ids");
        }
        if self.methods.is_empty() {
            missing.push("methods");
        }
        match (self.policy_path, missing.is_empty()) {
            (Some(policy_path), true) => Ok(RuleEnforcementCheck {
                policy_path,
                rules: self.rules,
                methods: self.methods,
            }),
            _ => Err(CheckError::IncompleteBinding {
                missing: missing.join(", "),
            }),
        }
    }
}
