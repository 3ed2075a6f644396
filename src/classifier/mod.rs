//! Line classification module for the verifier.
//!
//! Source text is never tokenized; every physical line is matched as a whole
//! against an ordered table of regex patterns. It handles:
//!
//! - Statement terminator checks (`;`, `{`, `}`)
//! - Line categories: method headers, if/while headers, returns, calls,
//!   declarations, assignments and scope closes
//! - Scope enter/exit predicates that ignore braces inside string literals
//! - Pure extraction of names, types and raw values from classified lines

pub mod classifier;
pub mod extract;
pub mod patterns;
