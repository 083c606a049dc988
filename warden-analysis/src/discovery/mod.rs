//! Rule discovery — a validating extraction pass over policy documents.
//! Anything rule-shaped becomes a typed `Rule`; anything with an id but an
//! unclassifiable shape still surfaces (as a rule with `Unknown` severity
//! and no check), never a silent drop.

pub mod engine;
pub mod types;

pub use engine::RuleDiscoveryEngine;
pub use types::{CheckSpec, Rule, Severity};
