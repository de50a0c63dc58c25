//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns. Authentication is not a
//! middleware here; handlers opt in through the bearer identity extractor.

pub mod trace;

pub use trace::Trace;
