//! Rule matchers — stateless predicate functions evaluated against a
//! parsed syntax tree plus a statically typed spec, each returning zero or
//! more violations. The caller attaches the file path when it wraps a
//! violation into a `Finding`.
//!
//! Every matcher degrades to zero violations when a node shape is
//! unexpected; whole-module parse failures are handled by the pipeline,
//! not here.

pub mod anchor;
pub mod decorators;
pub mod mutation;
pub mod primitives;
pub mod requirement;
pub mod types;

pub use anchor::stable_id_anchor;
pub use decorators::{decorator_argument_completeness, forbidden_decorators};
pub use mutation::required_decorator_if_mutating;
pub use primitives::{direct_write_bypass, forbidden_primitives};
pub use requirement::requirement_violations;
pub use types::{
    AnchorSpec, DecoratorArgsSpec, ForbiddenDecoratorSpec, ForbiddenPrimitiveSpec,
    MatchViolation, MutatingDecoratorSpec, RequirementSpec, WriteBypassSpec,
};
