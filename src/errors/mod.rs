//! Error types and error handling for the verifier.
//!
//! This module defines the single error type every stage reports. It includes:
//!
//! - `ErrorImpl`, one variant per concrete failure
//! - `ErrorKind`, the syntax / structure / name / type / value / io taxonomy
//! - Error structures with source position information
//! - Helpful error messages and suggestions

pub mod errors;
