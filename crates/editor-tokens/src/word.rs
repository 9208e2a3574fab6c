//! Generic word-boundary rule.
//!
//! Camel-case navigation only knows how to move inside identifiers. Everywhere else it hands the
//! caret to a [`WordBoundaries`] implementation; [`UnicodeWordBoundaries`] is the default and
//! uses UAX #29 word segmentation over the text of the token under the caret.

use crate::hierarchy::TokenSequence;
use crate::token::Token;
use unicode_segmentation::UnicodeSegmentation;

/// A word-movement rule for carets outside identifiers.
pub trait WordBoundaries {
    /// Offset of the next word stop after `offset`.
    fn next_word<I>(&self, sequence: TokenSequence<'_, I>, offset: usize) -> usize;

    /// Offset of the previous word stop before `offset`.
    fn previous_word<I>(&self, sequence: TokenSequence<'_, I>, offset: usize) -> usize;
}

/// Unicode word segmentation restricted to the token under the caret.
///
/// Stops are the starts of non-whitespace word segments; when none remains in the token the
/// caret moves to the token edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnicodeWordBoundaries;

impl WordBoundaries for UnicodeWordBoundaries {
    fn next_word<I>(&self, mut sequence: TokenSequence<'_, I>, offset: usize) -> usize {
        sequence.move_to(offset);
        let Some(token) = sequence.token() else {
            return offset;
        };
        if offset >= token.end() {
            return offset;
        }
        let in_token = offset.saturating_sub(token.offset());
        word_starts(token)
            .find(|start| *start > in_token)
            .map_or(token.end(), |start| token.offset() + start)
    }

    fn previous_word<I>(&self, mut sequence: TokenSequence<'_, I>, offset: usize) -> usize {
        if offset == 0 {
            return 0;
        }
        sequence.move_to(offset - 1);
        let Some(token) = sequence.token() else {
            return offset;
        };
        let in_token = offset.saturating_sub(token.offset());
        word_starts(token)
            .filter(|start| *start < in_token)
            .last()
            .map_or(token.offset(), |start| token.offset() + start)
    }
}

/// Char indices (within the token) where non-whitespace word segments start.
fn word_starts<I>(token: &Token<I>) -> impl Iterator<Item = usize> + '_ {
    let mut chars_seen = 0;
    token.text().split_word_bounds().filter_map(move |segment| {
        let start = chars_seen;
        chars_seen += segment.chars().count();
        (!segment.chars().all(char::is_whitespace)).then_some(start)
    })
}
