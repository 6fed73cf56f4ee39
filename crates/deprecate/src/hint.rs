//! Replacement hint classification
//!
//! A hint is classified once, from its shape:
//!
//! 1. Whitespace anywhere, or a trailing `.`, `!` or `?` → [`HintKind::Sentence`]
//! 2. A `\` namespace separator, or a name the [`TypeCatalog`] knows → [`HintKind::TypeReference`]
//! 3. Anything else → [`HintKind::BareSymbol`]
//!
//! Whitespace wins over the namespace rule, so `Use Foo\Bar instead` is a
//! sentence. `::` is a member separator, not a type one.

use std::collections::HashSet;

/// Namespace separator for type references
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Shape of a replacement hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    /// Complete statement, used verbatim
    Sentence,
    /// Qualified type name, rendered without `()`
    TypeReference,
    /// Function or method name, rendered with `()`
    BareSymbol,
}

/// Lookup of type names the host knows about
pub trait TypeCatalog {
    fn contains(&self, name: &str) -> bool;
}

/// Fixed set of known type names
#[derive(Debug, Clone, Default)]
pub struct KnownTypes {
    names: HashSet<String>,
}

impl KnownTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }
}

impl<S: Into<String>> FromIterator<S> for KnownTypes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl TypeCatalog for KnownTypes {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(name.trim_start_matches(NAMESPACE_SEPARATOR))
    }
}

/// Suggested replacement with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementHint {
    text: String,
    kind: HintKind,
}

impl ReplacementHint {
    /// Classify `text` using only its shape
    pub fn new(text: impl Into<String>) -> Self {
        Self::classify_with(text, None)
    }

    /// Classify `text`, also treating names in `catalog` as types
    pub fn classify_with(text: impl Into<String>, catalog: Option<&dyn TypeCatalog>) -> Self {
        let text = text.into();
        let kind = classify(&text, catalog);
        Self { text, kind }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> HintKind {
        self.kind
    }

    /// Text appended after the "is deprecated" sentence
    pub fn render(&self) -> String {
        match self.kind {
            HintKind::Sentence => self.text.clone(),
            HintKind::TypeReference => format!("Use {} instead.", self.text),
            HintKind::BareSymbol => format!("Use {}() instead.", self.text),
        }
    }
}

fn classify(text: &str, catalog: Option<&dyn TypeCatalog>) -> HintKind {
    if text.chars().any(char::is_whitespace) || text.ends_with(['.', '!', '?']) {
        return HintKind::Sentence;
    }
    if text.contains(NAMESPACE_SEPARATOR) || catalog.is_some_and(|c| c.contains(text)) {
        return HintKind::TypeReference;
    }
    HintKind::BareSymbol
}
