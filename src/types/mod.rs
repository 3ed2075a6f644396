//! Type model of the verified language.
//!
//! Defines the variable, method and value abstractions:
//!
//! - `VariableType`, the closed set of primitive types
//! - Literal grammars per type and the one-directional widening rules
//! - Identifier rules and reserved words
//! - `Variable` and `Method`, including call-site argument checking

pub mod method;
pub mod types;
pub mod variable;
