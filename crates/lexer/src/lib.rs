//! Cursor, lexical recognizers, and value decoders for KDL 2.0 (§4.2–§4.4).
//!
//! This crate has no parsing control flow: it exposes a [`Cursor`] plus
//! free functions that each recognize or decode one lexical construct,
//! pushing diagnostics onto the cursor they were given. The `parser`
//! crate drives these to build a document.

pub mod cursor;
pub mod identifier;
pub mod keyword;
pub mod number;
pub mod string;
pub mod trivia;

pub use crate::cursor::Cursor;
