//! Data model, diagnostics, and pretty-printer for KDL 2.0 documents.
//!
//! This crate holds everything that does not involve parser control
//! flow: the character classifier (§4.1), the document tree (§3), the
//! diagnostic engine (§4.7), and the canonical renderer (§4.8). The
//! `lexer` and `parser` crates build on top of these types.

pub mod classifier;
pub mod pretty;

mod diagnostic;
mod diagnostic_kind;
mod document;
mod entry;
mod identifier;
mod node;
mod span;
mod value;

pub use crate::{
    diagnostic::{Diagnostic, DiagnosticSeverity},
    diagnostic_kind::DiagnosticKind,
    document::Document,
    entry::Entry,
    identifier::Identifier,
    node::Node,
    span::Span,
    value::{IntWidth, NarrowInt, Value, ValueData},
};

pub use num_bigint::BigInt;
