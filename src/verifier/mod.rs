//! Verification engine.
//!
//! Drives the classifier, type model and scope stack over a whole source:
//!
//! - A pre-pass checking that `{` and `}` balance
//! - Pass 1, which classifies every line, registers methods and declares globals
//! - Pass 2, which checks each method body against the state pass 1 built
//! - Line sources for files on disk and in-memory text

pub mod source;
pub mod verifier;

#[cfg(test)]
mod tests;
