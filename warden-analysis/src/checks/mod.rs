//! Enforcement checks — the strategy/orchestration contract binding a
//! policy document and its rule ids to an ordered set of enforcement
//! methods.

pub mod builtin;
pub mod check;
pub mod context;
pub mod evidence;
pub mod generic;
pub mod method;
pub mod types;

pub use builtin::{build_method, is_implementable, BuiltinMatcherMethod};
pub use check::{RuleCheckBuilder, RuleEnforcementCheck};
pub use context::CheckContext;
pub use evidence::ExecutionLogMethod;
pub use generic::GenericRequirementMethod;
pub use method::{AsyncEnforcementMethod, CheckMethod, EnforcementMethod};
pub use types::Finding;
