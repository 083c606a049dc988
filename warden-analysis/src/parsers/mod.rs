//! Tree-sitter parser subsystem. Governed source is Python; the parser is
//! error-tolerant, so a module with syntax errors still yields a tree and
//! the error is surfaced as a file-scoped finding one level up.

pub mod python;
pub mod types;

pub use python::PythonParser;
pub use types::ParsedModule;
