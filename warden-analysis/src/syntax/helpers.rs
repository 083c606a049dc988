//! Node-level helpers over tree-sitter Python trees.

use std::path::Path;

use tree_sitter::Node;

/// Sentinel recognized by `is_conditional_debug_guard`. Code imported
/// under this guard never executes at runtime, so later checks exempt it.
const GUARD_SENTINEL: &str = "TYPE_CHECKING";

/// The text of a node within its source.
pub fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Walk a chain of identifier/attribute-access nodes into a single dotted
/// string (e.g. `a.b.c`). Returns `None` for unsupported node shapes.
pub fn resolve_dotted_name(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "identifier" => Some(node_text(node, source).to_string()),
        "attribute" => {
            let object = node.child_by_field_name("object")?;
            let attribute = node.child_by_field_name("attribute")?;
            let base = resolve_dotted_name(object, source)?;
            Some(format!("{}.{}", base, node_text(attribute, source)))
        }
        _ => None,
    }
}

/// True when `call_name` matches one of `patterns` exactly, or as a
/// dot-boundary suffix.
///
/// `foo.asyncio.run` matches the pattern `asyncio.run`; `subprocess.run`
/// does not, even though both end in `.run`. The boundary requirement
/// prevents bare-leaf false positives.
pub fn matches_disallowed(call_name: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        call_name == pattern
            || call_name
                .strip_suffix(pattern.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Extract the dotted domain of a file path: strip the first matching
/// source-root prefix, drop the file name, and join the remaining
/// directory segments with `.`. Empty string when no directory segments
/// remain.
pub fn extract_domain(path: &Path, source_roots: &[String]) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let mut remainder = normalized.as_str();
    for root in source_roots {
        let root = root.trim_end_matches('/');
        if let Some(stripped) = remainder.strip_prefix(root) {
            if let Some(stripped) = stripped.strip_prefix('/') {
                remainder = stripped;
                break;
            }
            if stripped.is_empty() {
                remainder = stripped;
                break;
            }
        }
    }

    let segments: Vec<&str> = remainder.split('/').collect();
    if segments.len() <= 1 {
        return String::new();
    }
    segments[..segments.len() - 1].join(".")
}

/// True when `file_domain` equals one of `allowed`, or sits below one of
/// them (`allowed + "."` prefix).
pub fn domain_matches(file_domain: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|a| {
        file_domain == a || file_domain.starts_with(&format!("{a}."))
    })
}

/// Recognize a `TYPE_CHECKING`-style guard condition: a bare or
/// attribute-qualified sentinel name (`TYPE_CHECKING`,
/// `typing.TYPE_CHECKING`).
pub fn is_conditional_debug_guard(condition: Node, source: &str) -> bool {
    match resolve_dotted_name(condition, source) {
        Some(name) => {
            name == GUARD_SENTINEL || name.ends_with(&format!(".{GUARD_SENTINEL}"))
        }
        None => false,
    }
}

/// All nodes of a subtree, depth-first. Matchers scan this flat list for
/// the node kinds they care about.
pub fn descendants(node: Node) -> Vec<Node> {
    let mut out = Vec::new();
    let mut stack = vec![node];
    while let Some(n) = stack.pop() {
        out.push(n);
        let mut cursor = n.walk();
        let children: Vec<_> = n.children(&mut cursor).collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
    out
}
