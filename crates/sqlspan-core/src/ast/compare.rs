//! Structural AST comparison ignoring source positions.

use super::walk::NodeRef;

/// Compares two trees ignoring their position markers. Returns the
/// empty string when they are structurally equal, otherwise a
/// human-readable description of the first difference, with the path
/// from the root.
#[must_use]
pub fn compare_without_marker(a: NodeRef<'_>, b: NodeRef<'_>) -> String {
    diff(a, b, a.kind_name()).unwrap_or_default()
}

fn diff(a: NodeRef<'_>, b: NodeRef<'_>, path: &str) -> Option<String> {
    if a.kind_name() != b.kind_name() {
        return Some(format!(
            "{path}: kind mismatch: {} vs {}",
            a.kind_name(),
            b.kind_name()
        ));
    }

    let a_children = a.children();
    let b_children = b.children();
    if a_children.len() != b_children.len() {
        return Some(format!(
            "{path}: child count mismatch: {} vs {}",
            a_children.len(),
            b_children.len()
        ));
    }

    for (i, (a_child, b_child)) in a_children.iter().zip(&b_children).enumerate() {
        let child_path = format!("{path} > {}[{i}]", a_child.kind_name());
        if let Some(found) = diff(*a_child, *b_child, &child_path) {
            return Some(found);
        }
    }

    // Children match; any remaining difference lives in this node's own
    // content (operator, quote style, literal value, flags).
    let a_text = a.to_sql_string();
    let b_text = b.to_sql_string();
    if a_text != b_text {
        return Some(format!("{path}: {a_text:?} vs {b_text:?}"));
    }
    None
}
