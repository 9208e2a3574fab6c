//! Token and language primitives.
//!
//! All offsets and lengths are expressed in **character offsets** (Unicode scalar values), the
//! same unit the rest of the editor kernel uses.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Opaque language identifier (e.g. `"java"`, `"template"`).
///
/// Cheap to clone; two languages are equal when their names are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Language(Arc<str>);

impl Language {
    /// Create a language identifier from its name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The language name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Coarse token classification needed by caret navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    /// An identifier; camel-case stops are computed inside it.
    Identifier,
    /// Whitespace (including newlines); skipped when moving backward.
    Whitespace,
    /// Anything else (keywords, operators, literals, comments, ...).
    Other,
}

/// A token-kind tag that can classify itself for navigation.
///
/// The balance tracker only needs `Clone + Eq + Hash`; caret navigation additionally needs
/// [`TokenId::category`].
pub trait TokenId: Clone + Eq + Hash + fmt::Debug {
    /// Classify this token kind.
    fn category(&self) -> TokenCategory;

    /// Returns `true` for identifier tokens.
    fn is_identifier(&self) -> bool {
        self.category() == TokenCategory::Identifier
    }

    /// Returns `true` for whitespace tokens.
    fn is_whitespace(&self) -> bool {
        self.category() == TokenCategory::Whitespace
    }
}

/// A single token: kind tag, absolute offset, and text.
///
/// Tokens are values owned by the sequence that contains them. A token obtained from a
/// sequence view describes the document at the time it was read; after the hierarchy is edited,
/// read it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<I> {
    id: I,
    offset: usize,
    length: usize,
    text: Arc<str>,
}

impl<I> Token<I> {
    /// Create a token at `offset`.
    pub fn new(id: I, offset: usize, text: impl AsRef<str>) -> Self {
        let text: Arc<str> = Arc::from(text.as_ref());
        Self {
            id,
            offset,
            length: text.chars().count(),
            text,
        }
    }

    /// The token kind.
    pub fn id(&self) -> &I {
        &self.id
    }

    /// Absolute start offset (chars).
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length in chars.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Exclusive end offset (chars).
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// The token text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if `offset` lies in `start..end`.
    pub fn contains(&self, offset: usize) -> bool {
        self.offset <= offset && offset < self.end()
    }

    pub(crate) fn shifted(&mut self, delta: isize) {
        self.offset = self.offset.saturating_add_signed(delta);
    }

    pub(crate) fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.length = text.chars().count();
        self.text = Arc::from(text);
    }
}

/// Lay out `(id, text)` pairs contiguously starting at `start`.
pub fn layout_tokens<I, S>(start: usize, parts: impl IntoIterator<Item = (I, S)>) -> Vec<Token<I>>
where
    S: AsRef<str>,
{
    let mut offset = start;
    parts
        .into_iter()
        .map(|(id, text)| {
            let token = Token::new(id, offset, text);
            offset = token.end();
            token
        })
        .collect()
}
