//! Token hierarchy change events.
//!
//! A [`TokenHierarchyEvent`] is delivered to every subscribed listener after the hierarchy has
//! been mutated. Content edits carry a [`TokenChange`] tree: one node per affected sequence,
//! each listing the tokens that were removed and the tokens that were added, with nested
//! [`TokenChange`]s for affected embedded sequences.

use crate::token::{Language, Token};

/// Category of a hierarchy change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenChangeKind {
    /// Tokens were added and/or removed; the event carries an exact [`TokenChange`] tree.
    Modification,
    /// Lexing activity changed (e.g. lexing was switched off and on again). Derived state
    /// cannot be patched from a delta.
    Activity,
    /// The hierarchy was rebuilt (e.g. the root language changed).
    Rebuild,
}

impl TokenChangeKind {
    /// Returns `true` if consumers must drop incremental state and rescan.
    pub fn invalidates(self) -> bool {
        matches!(self, Self::Activity | Self::Rebuild)
    }
}

/// Token delta for one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenChange<I> {
    language: Language,
    removed: Vec<Token<I>>,
    added: Vec<Token<I>>,
    embedded: Vec<TokenChange<I>>,
}

impl<I> TokenChange<I> {
    /// Create a change for a sequence of `language`.
    pub fn new(language: Language, removed: Vec<Token<I>>, added: Vec<Token<I>>) -> Self {
        Self {
            language,
            removed,
            added,
            embedded: Vec::new(),
        }
    }

    /// Attach a nested change for an embedded sequence.
    pub fn with_embedded(mut self, change: TokenChange<I>) -> Self {
        self.embedded.push(change);
        self
    }

    pub(crate) fn push_embedded(&mut self, change: TokenChange<I>) {
        self.embedded.push(change);
    }

    /// Language of the changed sequence.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Number of removed tokens.
    pub fn removed_token_count(&self) -> usize {
        self.removed.len()
    }

    /// Removed tokens, as they were before the edit.
    pub fn removed_tokens(&self) -> impl Iterator<Item = &Token<I>> {
        self.removed.iter()
    }

    /// Number of added tokens.
    pub fn added_token_count(&self) -> usize {
        self.added.len()
    }

    /// Added tokens, as they are after the edit.
    pub fn added_tokens(&self) -> impl Iterator<Item = &Token<I>> {
        self.added.iter()
    }

    /// Changes of embedded sequences.
    pub fn embedded_changes(&self) -> &[TokenChange<I>] {
        &self.embedded
    }

    /// Returns `true` if nothing was added or removed in this whole subtree.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.added.is_empty()
            && self.embedded.iter().all(TokenChange::is_empty)
    }
}

/// An event delivered to hierarchy listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenHierarchyEvent<I> {
    kind: TokenChangeKind,
    change: Option<TokenChange<I>>,
}

impl<I> TokenHierarchyEvent<I> {
    /// A content modification.
    pub fn modification(change: TokenChange<I>) -> Self {
        Self {
            kind: TokenChangeKind::Modification,
            change: Some(change),
        }
    }

    /// An activity change.
    pub fn activity() -> Self {
        Self {
            kind: TokenChangeKind::Activity,
            change: None,
        }
    }

    /// A full rebuild.
    pub fn rebuild() -> Self {
        Self {
            kind: TokenChangeKind::Rebuild,
            change: None,
        }
    }

    /// Event category.
    pub fn kind(&self) -> TokenChangeKind {
        self.kind
    }

    /// Root of the change tree (only for [`TokenChangeKind::Modification`]).
    pub fn change(&self) -> Option<&TokenChange<I>> {
        self.change.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::layout_tokens;

    #[test]
    fn test_change_counts_and_emptiness() {
        let removed = layout_tokens(0, [(1u8, "{")]);
        let added = layout_tokens(0, [(1u8, "{"), (2, "}")]);
        let change = TokenChange::new(Language::new("c"), removed, added);
        assert_eq!(change.removed_token_count(), 1);
        assert_eq!(change.added_token_count(), 2);
        assert!(!change.is_empty());

        let empty = TokenChange::<u8>::new(Language::new("c"), Vec::new(), Vec::new())
            .with_embedded(TokenChange::new(Language::new("t"), Vec::new(), Vec::new()));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_invalidating_kinds() {
        assert!(!TokenChangeKind::Modification.invalidates());
        assert!(TokenChangeKind::Activity.invalidates());
        assert!(TokenChangeKind::Rebuild.invalidates());
        assert!(TokenHierarchyEvent::<u8>::rebuild().change().is_none());
    }
}
