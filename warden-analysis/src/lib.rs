//! Analysis engine for Warden: discovers governed source modules, parses
//! them with tree-sitter, evaluates syntax-tree rule matchers, and binds
//! policy rules to enforcement checks.
//!
//! Subsystems:
//! - `scanner` — gitignore-aware source discovery with content hashing
//! - `parsers` — tree-sitter Python parsing into `ParsedModule`
//! - `syntax` — dotted-name resolution and node helpers shared by matchers
//! - `matchers` — stateless predicate functions over parsed trees
//! - `discovery` — validating extraction of rule records from policy documents
//! - `checks` — `EnforcementMethod` contracts and `RuleEnforcementCheck`

pub mod checks;
pub mod discovery;
pub mod matchers;
pub mod parsers;
pub mod scanner;
pub mod syntax;
