use std::fmt;

use crate::condition::Condition;

/// The kind of step a [`Selector`] describes, with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorKind {
    /// The document root (`.`). Only valid as the first node of a chain.
    Root,

    /// Mapping lookup (`.name`)
    Property(String),

    /// Sequence lookup (`.[3]`)
    Index(usize),

    /// Append to a sequence (`.[]`)
    NextAvailableIndex,

    /// First element matching every condition (`.(name=x)(age=3)`)
    Dynamic(Vec<Condition>),

    /// Size of a sequence, mapping or string (`.[#]`)
    Length,

    /// Name of the value's classification (`.[@]`)
    Type,
}

impl SelectorKind {
    pub fn name(&self) -> &'static str {
        match self {
            SelectorKind::Root => "ROOT",
            SelectorKind::Property(_) => "PROPERTY",
            SelectorKind::Index(_) => "INDEX",
            SelectorKind::NextAvailableIndex => "NEXT_AVAILABLE_INDEX",
            SelectorKind::Dynamic(_) => "DYNAMIC",
            SelectorKind::Length => "LENGTH",
            SelectorKind::Type => "TYPE",
        }
    }
}

/// One step of a parsed path.
///
/// A selector is immutable once parsed with a single exception: a dynamic
/// selector that found no match in create mode becomes a
/// [`SelectorKind::NextAvailableIndex`] (see [`Selector::defer_to_append`]).
/// No other transition exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Text of this step as written, e.g. `.(name=x)`
    pub raw: String,
    /// Text naming this step in error messages
    pub current: String,
    kind: SelectorKind,
}

impl Selector {
    pub fn new(raw: impl Into<String>, kind: SelectorKind) -> Self {
        let raw = raw.into();
        Selector {
            current: raw.clone(),
            raw,
            kind,
        }
    }

    pub fn root() -> Self {
        Selector::new(".", SelectorKind::Root)
    }

    pub fn kind(&self) -> &SelectorKind {
        &self.kind
    }

    /// Move a dynamic selector into the append state.
    ///
    /// Returns false and leaves the selector untouched for any other kind.
    pub(crate) fn defer_to_append(&mut self) -> bool {
        if !matches!(self.kind, SelectorKind::Dynamic(_)) {
            return false;
        }
        self.kind = SelectorKind::NextAvailableIndex;
        true
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current, self.kind.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defer_only_from_dynamic() {
        let mut sel = Selector::new(
            ".(a=b)",
            SelectorKind::Dynamic(vec![Condition::equal("a", "b")]),
        );
        assert!(sel.defer_to_append());
        assert_eq!(sel.kind(), &SelectorKind::NextAvailableIndex);

        // NextAvailableIndex is terminal
        assert!(!sel.defer_to_append());
        assert_eq!(sel.kind(), &SelectorKind::NextAvailableIndex);

        let mut prop = Selector::new(".a", SelectorKind::Property("a".into()));
        assert!(!prop.defer_to_append());
        assert_eq!(prop.kind(), &SelectorKind::Property("a".into()));
    }

    #[test]
    fn test_display() {
        let sel = Selector::new(".[0]", SelectorKind::Index(0));
        assert_eq!(sel.to_string(), ".[0] (INDEX)");
    }
}
