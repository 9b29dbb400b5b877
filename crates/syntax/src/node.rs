use rustc_hash::FxHashMap;

use crate::{Entry, Identifier, Span, Value};

/// A named tree vertex with arguments, properties, and children (§3).
///
/// `children: None` distinguishes "no `{}` present" from `children:
/// Some(vec![])`, "`{}` present but empty" — needed for format
/// preservation per §3 and §4.6.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: Identifier,
    pub ty: Option<String>,
    pub entries: Vec<Entry>,
    pub children: Option<Vec<Node>>,
    pub span: Span,
}

impl Node {
    pub fn new(name: Identifier, span: Span) -> Self {
        Self { name, ty: None, entries: Vec::new(), children: None, span }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Positional arguments, in source order.
    pub fn arguments(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().filter(|e| e.is_argument()).map(|e| &e.value)
    }

    /// Looks up a property by name, honoring last-write-wins: if the same
    /// key appears more than once, the value of the last textual
    /// occurrence is returned (§3).
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.entries.iter().rev().find(|e| e.name.as_deref_str() == Some(key)).map(|e| &e.value)
    }

    /// All properties, deduplicated to their last-write-wins value. The
    /// returned map has no defined iteration order; callers needing
    /// deterministic output should sort by key (the pretty-printer does).
    pub fn properties(&self) -> FxHashMap<&str, &Value> {
        let mut map = FxHashMap::default();
        for entry in self.entries.iter().filter(|e| e.is_property()) {
            map.insert(entry.name.as_deref_str().unwrap(), &entry.value);
        }
        map
    }

    /// `true` once a (possibly empty) children block was present in source.
    pub fn has_children_block(&self) -> bool {
        self.children.is_some()
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flatten()
    }
}

trait OptIdentExt {
    fn as_deref_str(&self) -> Option<&str>;
}

impl OptIdentExt for Option<Identifier> {
    fn as_deref_str(&self) -> Option<&str> {
        self.as_ref().map(|i| i.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ValueData};

    fn ident(s: &str) -> Identifier {
        Identifier::bare(s, Span::default())
    }

    #[test]
    fn property_is_last_write_wins() {
        let mut node = Node::new(ident("n"), Span::default());
        node.entries.push(Entry::property(ident("k"), Value::int(1, Span::default()), Span::default()));
        node.entries.push(Entry::property(ident("k"), Value::int(2, Span::default()), Span::default()));
        assert_eq!(node.property("k").unwrap().data, ValueData::Int(2));
    }

    #[test]
    fn arguments_preserve_source_order() {
        let mut node = Node::new(ident("n"), Span::default());
        node.entries.push(Entry::argument(Value::int(1, Span::default()), Span::default()));
        node.entries.push(Entry::property(ident("k"), Value::int(9, Span::default()), Span::default()));
        node.entries.push(Entry::argument(Value::int(2, Span::default()), Span::default()));
        let args: Vec<i64> = node.arguments().map(|v| v.as_int().unwrap()).collect();
        assert_eq!(args, vec![1, 2]);
    }

    #[test]
    fn missing_vs_empty_children_block() {
        let no_block = Node::new(ident("n"), Span::default());
        let mut empty_block = Node::new(ident("n"), Span::default());
        empty_block.children = Some(vec![]);
        assert!(!no_block.has_children_block());
        assert!(empty_block.has_children_block());
    }
}
