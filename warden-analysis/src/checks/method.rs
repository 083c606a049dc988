//! EnforcementMethod contracts.

use async_trait::async_trait;

use warden_core::errors::CheckError;

use crate::discovery::Rule;

use super::context::CheckContext;
use super::types::Finding;

/// A synchronous enforcement method. Stateless; safe to run against any
/// rule bound to its check.
pub trait EnforcementMethod: Send + Sync {
    /// Identifier attached to the findings this method produces.
    fn check_id(&self) -> &str;

    /// Verify one rule against the run context.
    ///
    /// An `Err` means the method could not evaluate at all — the check
    /// converts it into an ERROR finding rather than reporting a silent
    /// pass.
    fn verify(&self, ctx: &CheckContext, rule: &Rule) -> Result<Vec<Finding>, CheckError>;
}

/// The asynchronous variant, for checks that need external evidence
/// lookups. Identical contract; no ordering dependency on other methods,
/// safe to run concurrently with any other method — each invocation
/// operates on an independent rule id and returns an order-insensitive
/// finding list.
#[async_trait]
pub trait AsyncEnforcementMethod: Send + Sync {
    fn check_id(&self) -> &str;

    async fn verify(&self, ctx: &CheckContext, rule: &Rule) -> Result<Vec<Finding>, CheckError>;
}

/// A method slot in a check's ordered method list.
pub enum CheckMethod {
    Sync(Box<dyn EnforcementMethod>),
    Async(Box<dyn AsyncEnforcementMethod>),
}

impl CheckMethod {
    pub fn check_id(&self) -> &str {
        match self {
            CheckMethod::Sync(m) => m.check_id(),
            CheckMethod::Async(m) => m.check_id(),
        }
    }
}

impl std::fmt::Debug for CheckMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let variant = match self {
            CheckMethod::Sync(_) => "Sync",
            CheckMethod::Async(_) => "Async",
        };
        f.debug_tuple(variant).field(&self.check_id()).finish()
    }
}
