//! Token hierarchy: a tree of token sequences.
//!
//! The hierarchy owns one root [`TokenSequence`] per document. Any token may own an embedded
//! sequence in another language (e.g. the `${...}` region of a string template); the embedded
//! sequence re-spells exactly the text of its owner token. Sequences are stored in an arena and
//! linked by [`SequenceId`], so the structure is a tree without reference cycles.
//!
//! Every mutation is reported to subscribed listeners as a [`TokenHierarchyEvent`]. Listener
//! registration is explicit: [`TokenHierarchy::subscribe`] hands out a [`ListenerId`] that must
//! be passed to [`TokenHierarchy::unsubscribe`] when the consumer goes away.

use crate::event::{TokenChange, TokenHierarchyEvent};
use crate::token::{Language, Token};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Arena index of a token sequence.
///
/// Ids are never reused within one hierarchy, so a stale id simply stops resolving. Slots of
/// removed sequences are reclaimed by [`TokenHierarchy::rebuild`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(usize);

impl SequenceId {
    /// Get the underlying arena index.
    pub fn get(self) -> usize {
        self.0
    }
}

/// Handle returned by [`TokenHierarchy::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Hierarchy change callback.
pub type HierarchyListener<I> = Box<dyn FnMut(&TokenHierarchyEvent<I>) + Send + Sync>;

/// Errors returned by hierarchy edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("unknown token sequence {0:?}")]
    /// The sequence id does not resolve (never existed or was removed with its owner token).
    UnknownSequence(SequenceId),

    #[error("token range {range:?} out of bounds for sequence {sequence:?} with {len} tokens")]
    /// A token range does not fit the sequence.
    RangeOutOfBounds {
        /// Target sequence.
        sequence: SequenceId,
        /// Requested token index range.
        range: Range<usize>,
        /// Number of tokens in the sequence.
        len: usize,
    },

    #[error("token {index} of sequence {sequence:?} already owns an embedded sequence")]
    /// The owner token already has an embedded sequence.
    AlreadyEmbedded {
        /// Owner sequence.
        sequence: SequenceId,
        /// Owner token index.
        index: usize,
    },

    #[error("embedded tokens spell {found:?} but the owner token is {expected:?}")]
    /// Embedded tokens must re-spell the owner token text.
    EmbeddingTextMismatch {
        /// Owner token text.
        expected: String,
        /// Concatenated embedded token text.
        found: String,
    },
}

#[derive(Debug)]
struct SequenceNode<I> {
    language: Language,
    tokens: Vec<Token<I>>,
    /// Owner sequence and owner token index.
    parent: Option<(SequenceId, usize)>,
    /// Owner token index -> embedded sequence.
    embedded: BTreeMap<usize, SequenceId>,
}

impl<I> SequenceNode<I> {
    fn new(language: Language, tokens: Vec<Token<I>>, parent: Option<(SequenceId, usize)>) -> Self {
        Self {
            language,
            tokens,
            parent,
            embedded: BTreeMap::new(),
        }
    }

    fn text(&self) -> String {
        self.tokens.iter().map(Token::text).collect()
    }
}

/// A tree of token sequences for one document.
pub struct TokenHierarchy<I> {
    /// Slot `n` holds sequence `first_id + n`.
    nodes: Vec<Option<SequenceNode<I>>>,
    first_id: usize,
    root: SequenceId,
    listeners: Vec<(ListenerId, HierarchyListener<I>)>,
    next_listener_id: u64,
}

impl<I: fmt::Debug> fmt::Debug for TokenHierarchy<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenHierarchy")
            .field("root", &self.root)
            .field("sequences", &self.nodes.iter().flatten().count())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<I> TokenHierarchy<I> {
    /// Register a change listener.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&TokenHierarchyEvent<I>) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn slot(&self, id: SequenceId) -> Option<usize> {
        id.0.checked_sub(self.first_id)
    }

    fn next_sequence_id(&self) -> SequenceId {
        SequenceId(self.first_id + self.nodes.len())
    }

    fn node(&self, id: SequenceId) -> Option<&SequenceNode<I>> {
        self.nodes.get(self.slot(id)?)?.as_ref()
    }
}

impl<I: Clone> TokenHierarchy<I> {
    /// Create a hierarchy whose root sequence holds `tokens`.
    ///
    /// Token offsets are re-laid contiguously from offset 0.
    pub fn new(language: Language, tokens: Vec<Token<I>>) -> Self {
        let tokens = relayout(0, tokens);
        Self {
            nodes: vec![Some(SequenceNode::new(language, tokens, None))],
            first_id: 0,
            root: SequenceId(0),
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Id of the root sequence.
    pub fn root_id(&self) -> SequenceId {
        self.root
    }

    /// Language of the root sequence.
    pub fn language(&self) -> &Language {
        &self.root_node().language
    }

    /// Document length in chars.
    pub fn len(&self) -> usize {
        self.root_node().tokens.last().map_or(0, Token::end)
    }

    /// Returns `true` if the document has no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Document text, reassembled from the root tokens.
    pub fn text(&self) -> String {
        self.root_node().text()
    }

    /// Number of live sequences (root included).
    pub fn sequence_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// View of the root sequence, positioned before its first token.
    pub fn root(&self) -> TokenSequence<'_, I> {
        TokenSequence::new(self, self.root, self.root_node())
    }

    /// View of sequence `id`.
    pub fn sequence(&self, id: SequenceId) -> Option<TokenSequence<'_, I>> {
        self.node(id).map(|node| TokenSequence::new(self, id, node))
    }

    /// Embedded sequence owned by token `index` of sequence `id`.
    pub fn embedded_sequence(&self, id: SequenceId, index: usize) -> Option<SequenceId> {
        self.node(id)?.embedded.get(&index).copied()
    }

    /// Innermost sequence whose token contains `offset`, positioned on that token.
    ///
    /// At the document end the root is positioned on its last token.
    pub fn sequence_at(&self, offset: usize) -> TokenSequence<'_, I> {
        let mut view = self.root();
        loop {
            view.move_to(offset);
            if !view.token().is_some_and(|token| token.contains(offset)) {
                return view;
            }
            let Some(mut child) = view.embedded() else {
                return view;
            };
            if child.move_to(offset).is_none() {
                return view;
            }
            view = child;
        }
    }

    /// Innermost sequence for a caret that looks backward: the sequence whose token contains
    /// `offset - 1`.
    pub fn sequence_at_backward(&self, offset: usize) -> TokenSequence<'_, I> {
        self.sequence_at(offset.saturating_sub(1))
    }

    /// Iterate over every live sequence, root first, children in document order.
    pub fn walk(&self) -> impl Iterator<Item = TokenSequence<'_, I>> {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            loop {
                let id = stack.pop()?;
                if let Some(node) = self.node(id) {
                    stack.extend(node.embedded.values().rev().copied());
                    return Some(TokenSequence::new(self, id, node));
                }
            }
        })
    }

    /// Attach an embedded sequence of `language` to token `index` of sequence `id`.
    ///
    /// `tokens` must re-spell the owner token text; they are laid out from the owner offset.
    pub fn embed(
        &mut self,
        id: SequenceId,
        index: usize,
        language: Language,
        tokens: Vec<Token<I>>,
    ) -> Result<SequenceId, HierarchyError> {
        let node = self.node(id).ok_or(HierarchyError::UnknownSequence(id))?;
        let owner = node
            .tokens
            .get(index)
            .ok_or_else(|| HierarchyError::RangeOutOfBounds {
                sequence: id,
                range: index..index + 1,
                len: node.tokens.len(),
            })?;
        if node.embedded.contains_key(&index) {
            return Err(HierarchyError::AlreadyEmbedded { sequence: id, index });
        }
        let found: String = tokens.iter().map(Token::text).collect();
        if found != owner.text() {
            return Err(HierarchyError::EmbeddingTextMismatch {
                expected: owner.text().to_string(),
                found,
            });
        }

        let tokens = relayout(owner.offset(), tokens);
        let child = self.next_sequence_id();
        let added = tokens.clone();
        self.nodes.push(Some(SequenceNode::new(
            language.clone(),
            tokens,
            Some((id, index)),
        )));
        if let Some(node) = self.node_mut(id) {
            node.embedded.insert(index, child);
        }

        let change = TokenChange::new(language, Vec::new(), added);
        self.emit_change(id, change, true);
        Ok(child)
    }

    /// Replace tokens `range` of sequence `id` with `tokens`.
    ///
    /// New tokens are laid out from the start of the replaced run; every token after the run,
    /// in this sequence and in all ancestors, is shifted by the length difference, and owner
    /// tokens of the edited sequence are re-spelled. Embedded sequences owned by removed tokens
    /// are dropped and reported as removed.
    pub fn replace_tokens(
        &mut self,
        id: SequenceId,
        range: Range<usize>,
        tokens: Vec<Token<I>>,
    ) -> Result<(), HierarchyError> {
        let start_offset = {
            let node = self.node(id).ok_or(HierarchyError::UnknownSequence(id))?;
            if range.start > range.end || range.end > node.tokens.len() {
                return Err(HierarchyError::RangeOutOfBounds {
                    sequence: id,
                    range,
                    len: node.tokens.len(),
                });
            }
            match node.tokens.get(range.start) {
                Some(token) => token.offset(),
                None => self.sequence_end(id),
            }
        };

        let added = relayout(start_offset, tokens);
        let added_len: usize = added.iter().map(Token::length).sum();
        let added_count = added.len();

        let Some(node) = self.node_mut(id) else {
            return Err(HierarchyError::UnknownSequence(id));
        };
        let language = node.language.clone();
        let removed: Vec<Token<I>> = node.tokens.splice(range.clone(), added.clone()).collect();
        let removed_len: usize = removed.iter().map(Token::length).sum();

        // Re-key embeddings: drop the ones owned by removed tokens, shift the ones after.
        let old_embedded = std::mem::take(&mut node.embedded);
        let mut dropped = Vec::new();
        let mut moved = Vec::new();
        for (index, child) in old_embedded {
            if index < range.start {
                node.embedded.insert(index, child);
            } else if index < range.end {
                dropped.push(child);
            } else {
                let new_index = index - range.len() + added_count;
                node.embedded.insert(new_index, child);
                moved.push((child, new_index));
            }
        }
        for (child, new_index) in moved {
            if let Some(child_node) = self.node_mut(child) {
                child_node.parent = Some((id, new_index));
            }
        }

        let mut change = TokenChange::new(language, removed, added);
        for child in dropped {
            if let Some(removed_subtree) = self.detach_subtree(child) {
                change.push_embedded(removed_subtree);
            }
        }

        let delta = added_len as isize - removed_len as isize;
        self.shift_from(id, range.start + added_count, delta);
        self.propagate_upward(id, delta);
        self.emit_change(id, change, false);
        Ok(())
    }

    /// Insert `tokens` before token `index` of sequence `id`.
    pub fn insert_tokens(
        &mut self,
        id: SequenceId,
        index: usize,
        tokens: Vec<Token<I>>,
    ) -> Result<(), HierarchyError> {
        self.replace_tokens(id, index..index, tokens)
    }

    /// Remove tokens `range` of sequence `id`.
    pub fn remove_tokens(&mut self, id: SequenceId, range: Range<usize>) -> Result<(), HierarchyError> {
        self.replace_tokens(id, range, Vec::new())
    }

    /// Replace the whole hierarchy with a fresh root sequence and report a rebuild.
    ///
    /// Sequence ids handed out before the rebuild stop resolving.
    pub fn rebuild(&mut self, language: Language, tokens: Vec<Token<I>>) {
        let root = self.next_sequence_id();
        self.first_id = root.0;
        self.nodes.clear();
        self.nodes
            .push(Some(SequenceNode::new(language, relayout(0, tokens), None)));
        self.root = root;
        self.fire(&TokenHierarchyEvent::rebuild());
    }

    /// Report a lexing-activity change to listeners without touching the tokens.
    pub fn notify_activity(&mut self) {
        self.fire(&TokenHierarchyEvent::activity());
    }

    fn root_node(&self) -> &SequenceNode<I> {
        match self.slot(self.root).and_then(|slot| self.nodes.get(slot)) {
            Some(Some(node)) => node,
            _ => unreachable!("root sequence is never removed"),
        }
    }

    fn node_mut(&mut self, id: SequenceId) -> Option<&mut SequenceNode<I>> {
        let slot = self.slot(id)?;
        self.nodes.get_mut(slot)?.as_mut()
    }

    fn sequence_start(&self, id: SequenceId) -> usize {
        let Some(node) = self.node(id) else {
            return 0;
        };
        if let Some(first) = node.tokens.first() {
            return first.offset();
        }
        node.parent
            .and_then(|(parent, index)| self.node(parent)?.tokens.get(index).map(Token::offset))
            .unwrap_or(0)
    }

    fn sequence_end(&self, id: SequenceId) -> usize {
        match self.node(id).and_then(|node| node.tokens.last()) {
            Some(last) => last.end(),
            None => self.sequence_start(id),
        }
    }

    /// Shift tokens `from..` of `id` and every sequence embedded under them.
    fn shift_from(&mut self, id: SequenceId, from: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        let mut stack = Vec::new();
        if let Some(node) = self.node_mut(id) {
            for token in node.tokens.iter_mut().skip(from) {
                token.shifted(delta);
            }
            stack.extend(node.embedded.range(from..).map(|(_, child)| *child));
        }
        while let Some(child) = stack.pop() {
            if let Some(node) = self.node_mut(child) {
                for token in &mut node.tokens {
                    token.shifted(delta);
                }
                stack.extend(node.embedded.values().copied());
            }
        }
    }

    /// Re-spell owner tokens from `id` up to the root and shift what follows them.
    fn propagate_upward(&mut self, mut id: SequenceId, delta: isize) {
        while let Some((parent, index)) = self.node(id).and_then(|node| node.parent) {
            let text = self.node(id).map(SequenceNode::text).unwrap_or_default();
            if let Some(owner) = self
                .node_mut(parent)
                .and_then(|node| node.tokens.get_mut(index))
            {
                owner.set_text(text);
            }
            self.shift_from(parent, index + 1, delta);
            id = parent;
        }
    }

    fn detach_subtree(&mut self, id: SequenceId) -> Option<TokenChange<I>> {
        let slot = self.slot(id)?;
        let node = self.nodes.get_mut(slot)?.take()?;
        let mut change = TokenChange::new(node.language, node.tokens, Vec::new());
        for child in node.embedded.into_values() {
            if let Some(nested) = self.detach_subtree(child) {
                change.push_embedded(nested);
            }
        }
        Some(change)
    }

    /// Wrap `change` into empty changes of every ancestor so the event tree starts at the root.
    ///
    /// With `nested` set, `change` describes a sequence embedded directly in `id`.
    fn emit_change(&mut self, id: SequenceId, change: TokenChange<I>, nested: bool) {
        let mut change = change;
        if nested {
            if let Some(node) = self.node(id) {
                change = TokenChange::new(node.language.clone(), Vec::new(), Vec::new())
                    .with_embedded(change);
            }
        }
        let mut current = id;
        while let Some((parent, _)) = self.node(current).and_then(|node| node.parent) {
            let Some(node) = self.node(parent) else {
                break;
            };
            change = TokenChange::new(node.language.clone(), Vec::new(), Vec::new())
                .with_embedded(change);
            current = parent;
        }
        self.fire(&TokenHierarchyEvent::modification(change));
    }

    fn fire(&mut self, event: &TokenHierarchyEvent<I>) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

fn relayout<I>(start: usize, mut tokens: Vec<Token<I>>) -> Vec<Token<I>> {
    let mut offset = start;
    for token in &mut tokens {
        token.set_offset(offset);
        offset = token.end();
    }
    tokens
}

/// A positioned view over one sequence of a [`TokenHierarchy`].
///
/// The view borrows the hierarchy, so the tokens cannot change while it is being walked.
pub struct TokenSequence<'a, I> {
    hierarchy: &'a TokenHierarchy<I>,
    id: SequenceId,
    node: &'a SequenceNode<I>,
    index: Option<usize>,
}

impl<I> Clone for TokenSequence<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for TokenSequence<'_, I> {}

impl<I: fmt::Debug> fmt::Debug for TokenSequence<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSequence")
            .field("id", &self.id)
            .field("language", &self.node.language)
            .field("index", &self.index)
            .finish()
    }
}

impl<'a, I> TokenSequence<'a, I> {
    fn new(hierarchy: &'a TokenHierarchy<I>, id: SequenceId, node: &'a SequenceNode<I>) -> Self {
        Self {
            hierarchy,
            id,
            node,
            index: None,
        }
    }

    /// Arena id of this sequence.
    pub fn id(&self) -> SequenceId {
        self.id
    }

    /// Language of this sequence.
    pub fn language(&self) -> &'a Language {
        &self.node.language
    }

    /// All tokens of this sequence.
    pub fn tokens(&self) -> &'a [Token<I>] {
        &self.node.tokens
    }

    /// Number of tokens.
    pub fn token_count(&self) -> usize {
        self.node.tokens.len()
    }

    /// Index of the current token, if positioned.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// The current token.
    pub fn token(&self) -> Option<&'a Token<I>> {
        self.node.tokens.get(self.index?)
    }

    /// Owner sequence and owner token index, for embedded sequences.
    pub fn parent(&self) -> Option<(SequenceId, usize)> {
        self.node.parent
    }

    /// Position on the token containing `offset` and return `offset - token.offset()`.
    ///
    /// Offsets before the first token position on the first token; offsets at or past the end
    /// position on the last token. Returns `None` for an empty sequence.
    pub fn move_to(&mut self, offset: usize) -> Option<isize> {
        let tokens = &self.node.tokens;
        if tokens.is_empty() {
            self.index = None;
            return None;
        }
        let index = tokens
            .partition_point(|token| token.end() <= offset)
            .min(tokens.len() - 1);
        self.index = Some(index);
        Some(offset as isize - tokens[index].offset() as isize)
    }

    /// Position on token `index`.
    pub fn move_index(&mut self, index: usize) -> bool {
        if index < self.node.tokens.len() {
            self.index = Some(index);
            true
        } else {
            false
        }
    }

    /// Move to the next token. An unpositioned view moves to the first token.
    pub fn move_next(&mut self) -> bool {
        let next = self.index.map_or(0, |index| index + 1);
        self.move_index(next)
    }

    /// Move to the previous token. An unpositioned view moves to the last token.
    pub fn move_previous(&mut self) -> bool {
        match self.index {
            Some(0) => false,
            Some(index) => self.move_index(index - 1),
            None => match self.node.tokens.len() {
                0 => false,
                len => self.move_index(len - 1),
            },
        }
    }

    /// Embedded sequence owned by the current token, unpositioned.
    pub fn embedded(&self) -> Option<TokenSequence<'a, I>> {
        let child = *self.node.embedded.get(&self.index?)?;
        let node = self.hierarchy.node(child)?;
        Some(TokenSequence::new(self.hierarchy, child, node))
    }

    /// Start offset of this sequence.
    pub fn start_offset(&self) -> usize
    where
        I: Clone,
    {
        self.hierarchy.sequence_start(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::layout_tokens;
    use std::sync::{Arc, Mutex};

    fn c_hierarchy() -> TokenHierarchy<&'static str> {
        TokenHierarchy::new(
            Language::new("c"),
            layout_tokens(0, [("id", "foo"), ("ws", " "), ("str", "\"a${x}\""), ("ws", " ")]),
        )
    }

    #[test]
    fn test_move_to_and_navigation() {
        let hierarchy = c_hierarchy();
        let mut ts = hierarchy.root();
        assert_eq!(ts.index(), None);
        assert_eq!(ts.move_to(4), Some(0));
        assert_eq!(ts.token().map(Token::text), Some("\"a${x}\""));
        assert_eq!(ts.move_to(6), Some(2));
        assert!(ts.move_previous());
        assert_eq!(ts.token().map(Token::text), Some(" "));
        assert_eq!(ts.move_to(100), Some(100 - 11));
        assert!(!ts.move_next());
    }

    #[test]
    fn test_replace_shifts_following_tokens() {
        let mut hierarchy = c_hierarchy();
        let root = hierarchy.root_id();
        hierarchy
            .replace_tokens(root, 0..1, layout_tokens(0, [("id", "foobar")]))
            .unwrap();
        let offsets: Vec<_> = hierarchy.root().tokens().iter().map(Token::offset).collect();
        assert_eq!(offsets, vec![0, 6, 7, 14]);
        assert_eq!(hierarchy.text(), "foobar \"a${x}\" ");
    }

    #[test]
    fn test_embedded_edit_respells_owner() {
        let mut hierarchy = c_hierarchy();
        let root = hierarchy.root_id();
        let child = hierarchy
            .embed(
                root,
                2,
                Language::new("tpl"),
                layout_tokens(0, [("q", "\"a"), ("open", "${"), ("id", "x"), ("close", "}\"")]),
            )
            .unwrap();
        hierarchy
            .replace_tokens(child, 2..3, layout_tokens(0, [("id", "xyz")]))
            .unwrap();
        assert_eq!(hierarchy.text(), "foo \"a${xyz}\" ");
        assert_eq!(hierarchy.root().tokens()[3].offset(), 13);

        let ts = hierarchy.sequence_at(9);
        assert_eq!(ts.id(), child);
        assert_eq!(ts.token().map(Token::text), Some("xyz"));
    }

    #[test]
    fn test_embed_rejects_mismatched_text() {
        let mut hierarchy = c_hierarchy();
        let root = hierarchy.root_id();
        let err = hierarchy
            .embed(root, 0, Language::new("x"), layout_tokens(0, [("id", "bar")]))
            .unwrap_err();
        assert!(matches!(err, HierarchyError::EmbeddingTextMismatch { .. }));
    }

    #[test]
    fn test_removing_owner_reports_embedded_tokens() {
        let mut hierarchy = c_hierarchy();
        let root = hierarchy.root_id();
        let child = hierarchy
            .embed(
                root,
                2,
                Language::new("tpl"),
                layout_tokens(0, [("q", "\"a${x}\"")]),
            )
            .unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let listener = hierarchy.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        hierarchy.remove_tokens(root, 2..3).unwrap();
        assert!(hierarchy.sequence(child).is_none());
        assert_eq!(hierarchy.sequence_count(), 1);

        let events = events.lock().unwrap();
        let change = events[0].change().unwrap();
        assert_eq!(change.removed_token_count(), 1);
        assert_eq!(change.embedded_changes().len(), 1);
        assert_eq!(change.embedded_changes()[0].language(), &Language::new("tpl"));
        assert_eq!(change.embedded_changes()[0].removed_token_count(), 1);

        assert!(hierarchy.unsubscribe(listener));
        assert!(!hierarchy.unsubscribe(listener));
    }

    #[test]
    fn test_rebuild_reclaims_slots_and_keeps_ids_fresh() {
        let mut hierarchy = c_hierarchy();
        let root = hierarchy.root_id();
        let child = hierarchy
            .embed(root, 2, Language::new("tpl"), layout_tokens(0, [("q", "\"a${x}\"")]))
            .unwrap();
        hierarchy.remove_tokens(root, 2..3).unwrap();
        assert_eq!(hierarchy.nodes.len(), 2);

        hierarchy.rebuild(Language::new("c"), layout_tokens(0, [("id", "bar")]));
        assert_eq!(hierarchy.nodes.len(), 1);
        assert!(hierarchy.sequence(root).is_none());
        assert!(hierarchy.sequence(child).is_none());
        assert_eq!(hierarchy.root_id().get(), 2);
        assert_eq!(hierarchy.text(), "bar");

        let new_root = hierarchy.root_id();
        let embedded = hierarchy
            .embed(new_root, 0, Language::new("inner"), layout_tokens(0, [("id", "bar")]))
            .unwrap();
        assert_eq!(embedded.get(), 3);
        assert_eq!(hierarchy.sequence(embedded).map(|ts| ts.token_count()), Some(1));
        assert_eq!(hierarchy.sequence_count(), 2);
    }

    #[test]
    fn test_walk_visits_embedded_sequences() {
        let mut hierarchy = c_hierarchy();
        let root = hierarchy.root_id();
        hierarchy
            .embed(root, 0, Language::new("inner"), layout_tokens(0, [("id", "foo")]))
            .unwrap();
        let languages: Vec<_> = hierarchy.walk().map(|ts| ts.language().to_string()).collect();
        assert_eq!(languages, vec!["c", "inner"]);
    }
}
