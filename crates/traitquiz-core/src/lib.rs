//! Trait catalog, session selection, and feedback evaluation.
//!
//! This crate defines the validated catalog model, the per-session state,
//! and the assessment engine that the rest of traitquiz builds on.

pub mod builtin;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;
