//! Scope management module.
//!
//! Tracks which variables are visible on the current line:
//!
//! - A stack of scopes with the global scope at the bottom
//! - Declaration into the innermost scope, lookup from the innermost outward
//! - Method entry (parameters become initialized locals) and exit
//! - Snapshot and restore of the global scope around a method body

pub mod scope_manager;
