use crate::{Identifier, Span, Value};

/// A value plus an optional name (§3). An unnamed entry is an
/// **argument**; a named entry is a **property**.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: Option<Identifier>,
    pub value: Value,
    pub span: Span,
}

impl Entry {
    pub fn argument(value: Value, span: Span) -> Self {
        Self { name: None, value, span }
    }

    pub fn property(name: Identifier, value: Value, span: Span) -> Self {
        Self { name: Some(name), value, span }
    }

    pub fn is_argument(&self) -> bool {
        self.name.is_none()
    }

    pub fn is_property(&self) -> bool {
        self.name.is_some()
    }
}
