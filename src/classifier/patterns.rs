use lazy_static::lazy_static;
use regex::Regex;

use crate::{MK_ANCHORED, MK_PATTERN};

use super::classifier::LineKind;

/// One entry of the classifier's precedence table.
pub struct LinePattern {
    pub kind: LineKind,
    pub regex: Regex,
    /// Match each `,` separated piece of the line rather than the line as a whole.
    pub per_clause: bool,
}

impl LinePattern {
    pub fn matches(&self, line: &str) -> bool {
        if self.per_clause {
            line.split(',').all(|clause| self.regex.is_match(clause))
        } else {
            self.regex.is_match(line)
        }
    }
}

lazy_static! {
    /// Evaluated top to bottom; the first match wins.
    pub static ref LINE_PATTERNS: Vec<LinePattern> = vec![
        MK_PATTERN!(LineKind::MethodDeclaration, r"\s*void\s+[A-Za-z][A-Za-z0-9_]*\s*\([A-Za-z0-9_\s,]*\)\s*\{\s*"),
        MK_PATTERN!(LineKind::Condition, r"\s*(if|while)\s*\(.*\)\s*\{\s*"),
        MK_PATTERN!(LineKind::Return, r"\s*return\s*;\s*"),
        MK_PATTERN!(LineKind::MethodCall, r"\s*[A-Za-z][A-Za-z0-9_]*\s*\(.*\)\s*;\s*"),
        MK_PATTERN!(LineKind::VariableDeclaration, r"\s*(final\s+)?(int|double|String|boolean|char)\s+.+;"),
        MK_PATTERN!(LineKind::VariableAssignment, r"\s*[A-Za-z_][A-Za-z0-9_]*\s*=\s*\S+", per_clause),
        MK_PATTERN!(LineKind::ScopeEnd, r"\s*\}\s*"),
    ];

    pub static ref VOID_PREFIX: Regex = Regex::new(r"^\s*void\s+").unwrap();
    pub static ref FINAL_PREFIX: Regex = Regex::new(r"^\s*final\s+").unwrap();
    pub static ref STRING_LITERAL: Regex = Regex::new(r#""[^"]*""#).unwrap();
    pub static ref OPENS_SCOPE: Regex = Regex::new(r"\{\s*$").unwrap();
    pub static ref CLOSES_SCOPE: Regex = MK_ANCHORED!(r"\s*\}\s*");
}
