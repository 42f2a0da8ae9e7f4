//! Comments and the comment-to-node association map.

use std::collections::HashMap;

use core::fmt;

use crate::lexer::Span;

use super::statement::File;
use super::walk::{inspect, NodeRef};
use super::AstNode;

/// A single comment with its source span (delimiters included in the
/// span, excluded from the text).
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// The comment text, without `--` / `/*` delimiters.
    pub text: String,
    /// Source span including the delimiters.
    pub span: Span,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/*{}*/", self.text)
    }
}

impl AstNode for Comment {
    fn span(&self) -> Span {
        self.span
    }
}

/// A maximal run of comments the parser considers adjacent: comments
/// on the same line always merge, and a comment that starts its line
/// also absorbs a comment on the immediately following line.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentGroup {
    /// The comments of the group, in source order. Never empty.
    pub list: Vec<Comment>,
}

impl CommentGroup {
    /// Returns the combined span of the group.
    #[must_use]
    pub fn span(&self) -> Span {
        let first = self.list.first().expect("comment group is never empty");
        let last = self.list.last().expect("comment group is never empty");
        Span::new(first.span.from, last.span.to)
    }
}

impl fmt::Display for CommentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, comment) in self.list.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{comment}")?;
        }
        Ok(())
    }
}

/// Associates each comment group of a [`File`] with exactly one AST
/// node, keyed by the node's kind and span.
///
/// For every group, in order of preference:
/// 1. the first pre-order node that ends on the group's first line, at
///    or before the group's start column (a trailing comment — this
///    also covers a comment on the line of a statement's `;`);
/// 2. the first pre-order node starting on the line after the group's
///    last line (a leading comment);
/// 3. the first pre-order node starting later on the group's last line
///    (a leading comment on the same line);
/// 4. the enclosing statement, the nearest preceding statement, or the
///    first statement.
#[derive(Debug, Default)]
pub struct CommentMap {
    map: HashMap<(&'static str, Span), Vec<CommentGroup>>,
}

impl CommentMap {
    /// Builds the comment map for a parsed file.
    #[must_use]
    pub fn build(file: &File) -> Self {
        // Pre-order node list over all statements, in source order.
        let mut nodes: Vec<(&'static str, Span)> = Vec::new();
        for stmt in &file.stmts {
            inspect(NodeRef::Stmt(stmt), &mut |node| {
                if let Some(node) = node {
                    nodes.push((node.kind_name(), node.span()));
                }
                true
            });
        }

        let stmt_spans: Vec<Span> = file.stmts.iter().map(|s| s.span()).collect();

        let mut map: HashMap<(&'static str, Span), Vec<CommentGroup>> = HashMap::new();
        for group in &file.comments {
            let gspan = group.span();

            let trailing = nodes
                .iter()
                .find(|(_, s)| s.to.line == gspan.from.line && s.to.col <= gspan.from.col);
            let leading_line_before = || {
                nodes
                    .iter()
                    .find(|(_, s)| s.from.line == gspan.to.line + 1)
            };
            let leading_same_line = || {
                nodes
                    .iter()
                    .find(|(_, s)| s.from.line == gspan.to.line && gspan.to.col <= s.from.col)
            };

            let fallback = || {
                let idx = stmt_spans
                    .iter()
                    .position(|s| s.contains(gspan.from))
                    .or_else(|| stmt_spans.iter().rposition(|s| s.to <= gspan.from))
                    .or(if stmt_spans.is_empty() { None } else { Some(0) })?;
                let node = NodeRef::Stmt(&file.stmts[idx]);
                Some((node.kind_name(), node.span()))
            };

            let key = trailing
                .or_else(leading_line_before)
                .or_else(leading_same_line)
                .copied()
                .or_else(fallback);

            if let Some(key) = key {
                map.entry(key).or_default().push(group.clone());
            }
        }

        Self { map }
    }

    /// Returns the comment groups attached to `node`, in source order.
    #[must_use]
    pub fn get(&self, node: NodeRef<'_>) -> Option<&[CommentGroup]> {
        self.map
            .get(&(node.kind_name(), node.span()))
            .map(Vec::as_slice)
    }

    /// Returns the number of nodes that have comments attached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no comments were attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates over every attached group (for totality checks).
    pub fn groups(&self) -> impl Iterator<Item = &CommentGroup> {
        self.map.values().flatten()
    }
}
