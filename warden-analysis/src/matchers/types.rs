//! Statically declared parameter structs, one per matcher. A check spec
//! either parses into one of these or the rule is not implementable —
//! there is no call-time signature introspection.

use rustc_hash::FxHashSet;

use warden_core::constants::DEFAULT_ID_WINDOW;

/// One violation reported by a matcher. The matcher knows the line; the
/// caller attaches the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchViolation {
    pub message: String,
    pub line: Option<u32>,
}

impl MatchViolation {
    pub fn new(message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }

    pub fn file_scoped(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }
}

/// Spec for the stable-id-anchor matcher.
#[derive(Debug, Clone)]
pub struct AnchorSpec {
    /// Lines scanned immediately above a definition for an id marker.
    pub window: usize,
}

impl Default for AnchorSpec {
    fn default() -> Self {
        Self {
            window: DEFAULT_ID_WINDOW,
        }
    }
}

/// Spec for the forbidden-decorator matcher.
#[derive(Debug, Clone, Default)]
pub struct ForbiddenDecoratorSpec {
    pub forbidden: Vec<String>,
}

/// Spec for the forbidden-primitive matcher with its trust-zone exemption.
#[derive(Debug, Clone, Default)]
pub struct ForbiddenPrimitiveSpec {
    pub primitives: Vec<String>,
    /// Domains allowed to use the primitives; not a blanket rule.
    pub trusted_domains: Vec<String>,
}

/// Spec for the required-decorator-if-mutating matcher.
#[derive(Debug, Clone, Default)]
pub struct MutatingDecoratorSpec {
    /// Parameter names that mark a function as holding a mutating handle.
    pub mutating_params: FxHashSet<String>,
    /// Method names that mark a call as a mutation.
    pub mutating_verbs: FxHashSet<String>,
    /// The governance decorator the function must carry.
    pub decorator: String,
    /// Path prefixes skipped entirely.
    pub exempt_prefixes: Vec<String>,
}

/// Spec for decorator-argument-completeness.
#[derive(Debug, Clone, Default)]
pub struct DecoratorArgsSpec {
    pub decorator: String,
    pub required_args: Vec<String>,
}

/// Spec for the direct-write-bypass matcher.
#[derive(Debug, Clone, Default)]
pub struct WriteBypassSpec {
    /// Raw write method names (e.g. `write`, `writelines`).
    pub write_methods: FxHashSet<String>,
}

/// The generic requirement validator's check types.
#[derive(Debug, Clone)]
pub enum RequirementSpec {
    /// Declared return annotation must equal `expected`; functions without
    /// an annotation are skipped silently.
    ReturnsType { expected: String },
    /// No call may match any of these names.
    ForbiddenCalls { calls: Vec<String> },
    /// Every one of these names must be called somewhere in the module;
    /// all missing names are reported, sorted.
    RequiredCalls { calls: Vec<String> },
    /// No plain or from-style import of these modules.
    ForbiddenImports { modules: Vec<String> },
    /// A named decorator invoked as a call must carry all required kwargs.
    DecoratorArgs(DecoratorArgsSpec),
}
