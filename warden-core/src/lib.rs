//! Core crate for the Warden governance engine: errors, configuration,
//! tracing setup, and shared constants. Everything downstream (analysis,
//! audit, CLI) builds on this crate and nothing here depends on a parser
//! or the filesystem layout of a governed project.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing_setup;
