//! GenericRequirementMethod — the single parameterized method behind the
//! declarative check types. One method replaces what would otherwise be a
//! family of near-identical scan-and-report check classes; the differences
//! live in `RequirementSpec` and the include/exclude globs.

use serde_yaml::Value;

use warden_core::errors::CheckError;

use crate::discovery::{CheckSpec, Rule};
use crate::matchers::{requirement_violations, DecoratorArgsSpec, RequirementSpec};

use super::context::CheckContext;
use super::method::EnforcementMethod;
use super::types::Finding;

pub struct GenericRequirementMethod {
    check_id: String,
    spec: RequirementSpec,
    /// Include globs; the rule's own scope is used when empty.
    include: Vec<String>,
    exclude: Vec<String>,
}

impl GenericRequirementMethod {
    /// Validate a rule's check spec into a runnable method.
    ///
    /// Returns `None` when the engine is not one of the requirement check
    /// types or the parameters do not parse — the rule is then simply not
    /// implementable by this method.
    pub fn from_rule(rule: &Rule) -> Option<Self> {
        let check = rule.check.as_ref()?;
        let spec = parse_requirement(check)?;
        Some(Self {
            check_id: check.engine.clone(),
            spec,
            include: string_list(&check.params, "include"),
            exclude: string_list(&check.params, "exclude"),
        })
    }
}

impl EnforcementMethod for GenericRequirementMethod {
    fn check_id(&self) -> &str {
        &self.check_id
    }

    fn verify(&self, ctx: &CheckContext, rule: &Rule) -> Result<Vec<Finding>, CheckError> {
        let include = if self.include.is_empty() {
            &rule.scope
        } else {
            &self.include
        };

        let mut findings = Vec::new();
        for module in ctx.modules_in_scope(include, &self.exclude) {
            for violation in
                requirement_violations(module.tree.root_node(), &module.source, &self.spec)
            {
                findings.push(Finding::from_violation(
                    &self.check_id,
                    rule.severity,
                    module.path_str(),
                    violation,
                ));
            }
        }
        Ok(findings)
    }
}

/// Parse a check spec into a `RequirementSpec`, validating the statically
/// declared parameters for its engine.
pub fn parse_requirement(check: &CheckSpec) -> Option<RequirementSpec> {
    match check.engine.as_str() {
        "returns_type" => {
            let expected = check
                .params
                .get("expected")
                .and_then(Value::as_str)
                .or_else(|| check.params.as_str())?;
            Some(RequirementSpec::ReturnsType {
                expected: expected.to_string(),
            })
        }
        "forbidden_calls" => {
            let calls = keyed_or_bare_list(&check.params, "calls")?;
            Some(RequirementSpec::ForbiddenCalls { calls })
        }
        "required_calls" => {
            let calls = keyed_or_bare_list(&check.params, "calls")?;
            Some(RequirementSpec::RequiredCalls { calls })
        }
        "forbidden_imports" => {
            let modules = keyed_or_bare_list(&check.params, "modules")?;
            Some(RequirementSpec::ForbiddenImports { modules })
        }
        "decorator_args" => {
            let decorator = check.params.get("decorator").and_then(Value::as_str)?;
            let required_args = string_list(&check.params, "required_args");
            if required_args.is_empty() {
                return None;
            }
            Some(RequirementSpec::DecoratorArgs(DecoratorArgsSpec {
                decorator: decorator.to_string(),
                required_args,
            }))
        }
        _ => None,
    }
}

/// A non-empty string list under `key`, or the params value itself when it
/// is a bare sequence.
fn keyed_or_bare_list(params: &Value, key: &str) -> Option<Vec<String>> {
    let list = match params.get(key) {
        Some(value) => value,
        None => params,
    };
    let items: Vec<String> = list
        .as_sequence()?
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn string_list(params: &Value, key: &str) -> Vec<String> {
    params
        .get(key)
        .and_then(Value::as_sequence)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
