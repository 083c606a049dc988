//! Built-in matcher methods and the engine registry: mapping a rule's
//! declared check engine onto a runnable method, plus the implementability
//! predicate the reconciler consults.

use serde_yaml::Value;

use warden_core::config::{CoverageConfig, RulesConfig};
use warden_core::errors::CheckError;

use crate::discovery::{CheckSpec, Rule};
use crate::matchers::{
    decorator_argument_completeness, direct_write_bypass, forbidden_decorators,
    forbidden_primitives, required_decorator_if_mutating, stable_id_anchor, AnchorSpec,
    DecoratorArgsSpec, ForbiddenDecoratorSpec, ForbiddenPrimitiveSpec, MatchViolation,
    MutatingDecoratorSpec, WriteBypassSpec,
};
use crate::parsers::ParsedModule;

use super::context::CheckContext;
use super::evidence::ExecutionLogMethod;
use super::generic::{parse_requirement, GenericRequirementMethod};
use super::method::{CheckMethod, EnforcementMethod};
use super::types::Finding;

/// The named matchers, with their statically declared specs.
enum BuiltinEngine {
    StableIdAnchor(AnchorSpec),
    ForbiddenDecorators(ForbiddenDecoratorSpec),
    ForbiddenPrimitives(ForbiddenPrimitiveSpec),
    RequiredDecoratorIfMutating(MutatingDecoratorSpec),
    DirectWriteBypass(WriteBypassSpec),
    DecoratorArgs(DecoratorArgsSpec),
}

/// An `EnforcementMethod` wrapping one of the named matchers.
pub struct BuiltinMatcherMethod {
    check_id: String,
    engine: BuiltinEngine,
}

impl BuiltinMatcherMethod {
    /// Build a named matcher method for a rule, taking parameters from the
    /// check spec where given and from the rules config otherwise.
    pub fn from_rule(rule: &Rule, config: &RulesConfig) -> Option<Self> {
        let check = rule.check.as_ref()?;
        let engine = build_engine(check, config)?;
        Some(Self {
            check_id: check.engine.clone(),
            engine,
        })
    }

    fn run_matcher(&self, module: &ParsedModule) -> Vec<MatchViolation> {
        let root = module.tree.root_node();
        let source = &module.source;
        match &self.engine {
            BuiltinEngine::StableIdAnchor(spec) => stable_id_anchor(root, source, spec),
            BuiltinEngine::ForbiddenDecorators(spec) => {
                forbidden_decorators(root, source, spec)
            }
            BuiltinEngine::ForbiddenPrimitives(spec) => {
                forbidden_primitives(root, source, &module.domain, spec)
            }
            BuiltinEngine::RequiredDecoratorIfMutating(spec) => {
                required_decorator_if_mutating(root, source, &module.path_str(), spec)
            }
            BuiltinEngine::DirectWriteBypass(spec) => direct_write_bypass(root, source, spec),
            BuiltinEngine::DecoratorArgs(spec) => {
                decorator_argument_completeness(root, source, spec)
            }
        }
    }
}

impl EnforcementMethod for BuiltinMatcherMethod {
    fn check_id(&self) -> &str {
        &self.check_id
    }

    fn verify(&self, ctx: &CheckContext, rule: &Rule) -> Result<Vec<Finding>, CheckError> {
        let mut findings = Vec::new();
        for module in ctx.modules_in_scope(&rule.scope, &[]) {
            for violation in self.run_matcher(module) {
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

fn build_engine(check: &CheckSpec, config: &RulesConfig) -> Option<BuiltinEngine> {
    match check.engine.as_str() {
        "stable_id_anchor" => {
            let window = check
                .params
                .get("window")
                .and_then(Value::as_u64)
                .map(|w| w as usize)
                .unwrap_or_else(|| config.effective_id_window());
            Some(BuiltinEngine::StableIdAnchor(AnchorSpec { window }))
        }
        "forbidden_decorators" => {
            let forbidden = params_or_config(check, "decorators", &config.forbidden_decorators)?;
            Some(BuiltinEngine::ForbiddenDecorators(ForbiddenDecoratorSpec {
                forbidden,
            }))
        }
        "forbidden_primitives" => {
            let primitives = params_or_config(
                check,
                "primitives",
                &config.effective_forbidden_primitives(),
            )?;
            let trusted_domains = params_list(check, "trusted_domains")
                .unwrap_or_else(|| config.trusted_domains.clone());
            Some(BuiltinEngine::ForbiddenPrimitives(ForbiddenPrimitiveSpec {
                primitives,
                trusted_domains,
            }))
        }
        "required_decorator_if_mutating" => {
            let decorator = check
                .params
                .get("decorator")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| config.effective_governance_decorator());
            Some(BuiltinEngine::RequiredDecoratorIfMutating(
                MutatingDecoratorSpec {
                    mutating_params: config.effective_mutating_params().into_iter().collect(),
                    mutating_verbs: config.effective_mutating_verbs().into_iter().collect(),
                    decorator,
                    exempt_prefixes: config.exempt_prefixes.clone(),
                },
            ))
        }
        "direct_write_bypass" => Some(BuiltinEngine::DirectWriteBypass(WriteBypassSpec {
            write_methods: config.effective_write_methods().into_iter().collect(),
        })),
        "decorator_args" => {
            let decorator = check.params.get("decorator").and_then(Value::as_str)?;
            let required_args = params_list(check, "required_args")?;
            Some(BuiltinEngine::DecoratorArgs(DecoratorArgsSpec {
                decorator: decorator.to_string(),
                required_args,
            }))
        }
        _ => None,
    }
}

/// Parameter list from the check spec, falling back to the config value;
/// `None` when both are empty (nothing to check means not implementable).
fn params_or_config(check: &CheckSpec, key: &str, fallback: &[String]) -> Option<Vec<String>> {
    let list = params_list(check, key).unwrap_or_else(|| fallback.to_vec());
    if list.is_empty() {
        None
    } else {
        Some(list)
    }
}

fn params_list(check: &CheckSpec, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = check
        .params
        .get(key)?
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

/// Build the runnable method for a rule's declared check, if any engine
/// recognizes it.
pub fn build_method(
    rule: &Rule,
    rules_config: &RulesConfig,
    coverage_config: &CoverageConfig,
) -> Option<CheckMethod> {
    let check = rule.check.as_ref()?;
    if check.engine == "evidence_lookup" {
        let path = check
            .params
            .get("path")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| coverage_config.effective_execution_evidence_path());
        return Some(CheckMethod::Async(Box::new(ExecutionLogMethod::new(path))));
    }
    if let Some(method) = BuiltinMatcherMethod::from_rule(rule, rules_config) {
        return Some(CheckMethod::Sync(Box::new(method)));
    }
    GenericRequirementMethod::from_rule(rule)
        .map(|m| CheckMethod::Sync(Box::new(m) as Box<dyn EnforcementMethod>))
}

/// The implementability predicate: does a known engine exist that could
/// run this check spec, regardless of whether it did this run.
pub fn is_implementable(check: &CheckSpec, rules_config: &RulesConfig) -> bool {
    check.engine == "evidence_lookup"
        || build_engine(check, rules_config).is_some()
        || parse_requirement(check).is_some()
}
