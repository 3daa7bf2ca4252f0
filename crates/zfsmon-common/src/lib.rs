//! Shared types for the zfsmon agent.
//!
//! The data model ([`types::PropertyRecord`], [`types::ResourceKind`]),
//! byte-size parsing ([`size::parse_size`]), and the diagnostic sink
//! ([`diag::DiagnosticSink`]) used by both the collection layer and the
//! reporting layer.

pub mod diag;
pub mod size;
pub mod types;
