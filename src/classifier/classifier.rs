use std::{borrow::Cow, fmt::Display};

use crate::errors::errors::ErrorImpl;

use super::patterns::{CLOSES_SCOPE, LINE_PATTERNS, OPENS_SCOPE, STRING_LITERAL, VOID_PREFIX};

/// The syntactic category of a single source line.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum LineKind {
    MethodDeclaration,
    Condition,
    Return,
    MethodCall,
    VariableDeclaration,
    VariableAssignment,
    ScopeEnd,
}

impl Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Classifies one trimmed, non-empty, non-comment line.
///
/// The line must end in `;`, `{` or `}`. Lines starting with `void` that are not a
/// well formed method header are reported as such instead of as a generic bad line.
pub fn classify(line: &str) -> Result<LineKind, ErrorImpl> {
    check_terminator(line)?;

    // The method header leads the table.
    if VOID_PREFIX.is_match(line) && !LINE_PATTERNS[0].matches(line) {
        return Err(ErrorImpl::InvalidMethodDeclaration);
    }

    LINE_PATTERNS
        .iter()
        .find(|pattern| pattern.matches(line))
        .map(|pattern| pattern.kind)
        .ok_or(ErrorImpl::InvalidLineFormat)
}

fn check_terminator(line: &str) -> Result<(), ErrorImpl> {
    if line.ends_with(';') || line.ends_with('{') || line.ends_with('}') {
        Ok(())
    } else {
        Err(ErrorImpl::MissingTerminator)
    }
}

/// Removes the contents of every `"..."` literal so braces inside strings are ignored.
pub fn strip_string_literals(line: &str) -> Cow<'_, str> {
    STRING_LITERAL.replace_all(line, "")
}

/// True when the line opens a block: it ends in `{` outside of any string literal.
pub fn enters_scope(line: &str) -> bool {
    OPENS_SCOPE.is_match(&strip_string_literals(line))
}

/// True when the line is a lone `}`.
pub fn exits_scope(line: &str) -> bool {
    CLOSES_SCOPE.is_match(line)
}

/// Net `{` minus `}` count of a line, ignoring string literal contents.
pub fn brace_balance(line: &str) -> i64 {
    strip_string_literals(line)
        .chars()
        .map(|c| match c {
            '{' => 1,
            '}' => -1,
            _ => 0,
        })
        .sum()
}
