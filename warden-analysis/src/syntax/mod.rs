//! Syntax-tree helpers shared by every rule matcher: dotted-name
//! resolution, boundary-safe call matching, domain extraction, and
//! guard recognition.

pub mod helpers;

pub use helpers::{
    descendants, domain_matches, extract_domain, is_conditional_debug_guard,
    matches_disallowed, node_text, resolve_dotted_name,
};
