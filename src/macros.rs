//! Utility macros for the verifier.
//!
//! This module defines helper macros used throughout the verifier:
//!
//! - `MK_ANCHORED!` - Compiles a regex that must match a whole string
//! - `MK_PATTERN!` - Creates a LinePattern entry for the classifier table
//!
//! These macros reduce boilerplate in the pattern tables.

/// Compiles a regex anchored at both ends, so `is_match` behaves as a full match.
///
/// # Example
///
/// ```ignore
/// let int = MK_ANCHORED!(r"[+-]?[0-9]+");
/// assert!(int.is_match("-12"));
/// ```
#[macro_export]
macro_rules! MK_ANCHORED {
    ($regex:literal) => {
        regex::Regex::new(concat!("^(?:", $regex, ")$")).unwrap()
    };
}

/// Creates a LinePattern for the classifier's precedence table.
///
/// # Arguments
///
/// * `$kind` - The LineKind produced when the pattern matches
/// * `$regex` - The full-line pattern
/// * `per_clause` - Optional; the pattern must match every comma separated clause instead
///
/// # Example
///
/// ```ignore
/// MK_PATTERN!(LineKind::Return, r"return\s*;")
/// ```
#[macro_export]
macro_rules! MK_PATTERN {
    ($kind:expr, $regex:literal) => {
        LinePattern {
            kind: $kind,
            regex: $crate::MK_ANCHORED!($regex),
            per_clause: false,
        }
    };
    ($kind:expr, $regex:literal, per_clause) => {
        LinePattern {
            kind: $kind,
            regex: $crate::MK_ANCHORED!($regex),
            per_clause: true,
        }
    };
}
