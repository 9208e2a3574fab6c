//! Camel-case caret stops inside identifiers.
//!
//! A camel-case stop is the start of a capitalized sub-word: `fooBarBaz` has stops at `B`(ar)
//! and `B`(az), plus the token edges. Runs of capitals such as acronyms are treated as one unit.
//!
//! Both directions are pure functions of a [`TokenSequence`] and an offset. When the caret is not
//! in (or, backward, right after) an identifier, the decision is handed to a
//! [`WordBoundaries`] rule.
//!
//! # Example
//!
//! ```rust
//! use editor_tokens::{Language, Token, TokenCategory, TokenHierarchy, TokenId};
//! use editor_tokens::{next_camel_case_position, previous_camel_case_position};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! struct Ident;
//!
//! impl TokenId for Ident {
//!     fn category(&self) -> TokenCategory {
//!         TokenCategory::Identifier
//!     }
//! }
//!
//! let hierarchy = TokenHierarchy::new(Language::new("java"), vec![Token::new(Ident, 0, "fooBar")]);
//! assert_eq!(next_camel_case_position(hierarchy.sequence_at(0), 0), 3);
//! assert_eq!(previous_camel_case_position(hierarchy.sequence_at_backward(6), 6), 3);
//! ```

use crate::hierarchy::TokenSequence;
use crate::token::{Token, TokenId};
use crate::word::{UnicodeWordBoundaries, WordBoundaries};

/// Next camel-case stop after `offset`, using [`UnicodeWordBoundaries`] outside identifiers.
pub fn next_camel_case_position<I: TokenId>(sequence: TokenSequence<'_, I>, offset: usize) -> usize {
    CamelCaseNavigator::new(UnicodeWordBoundaries).next_position(sequence, offset)
}

/// Previous camel-case stop before `offset`, using [`UnicodeWordBoundaries`] outside
/// identifiers.
pub fn previous_camel_case_position<I: TokenId>(
    sequence: TokenSequence<'_, I>,
    offset: usize,
) -> usize {
    CamelCaseNavigator::new(UnicodeWordBoundaries).previous_position(sequence, offset)
}

/// Camel-case stop finder with a pluggable fallback word rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CamelCaseNavigator<W = UnicodeWordBoundaries> {
    words: W,
}

impl<W: WordBoundaries> CamelCaseNavigator<W> {
    /// Create a navigator that falls back to `words` outside identifiers.
    pub fn new(words: W) -> Self {
        Self { words }
    }

    /// The fallback rule.
    pub fn words(&self) -> &W {
        &self.words
    }

    /// Next stop after `offset`.
    ///
    /// - At the end of the last token the end offset is returned unchanged.
    /// - Inside an identifier the caret moves to the next capital; if the caret sits on a
    ///   capital, the rest of that capital run is skipped first. Without a further capital the
    ///   caret moves to the identifier end.
    pub fn next_position<I: TokenId>(&self, mut sequence: TokenSequence<'_, I>, offset: usize) -> usize {
        if sequence.move_to(offset).is_none() {
            return self.words.next_word(sequence, offset);
        }
        let Some(token) = sequence.token() else {
            return offset;
        };
        if offset >= token.end() {
            return token.end();
        }
        if !token.id().is_identifier() {
            return self.words.next_word(sequence, offset);
        }

        let chars: Vec<char> = token.text().chars().collect();
        let in_token = offset.saturating_sub(token.offset());
        token.offset() + next_stop(&chars, in_token)
    }

    /// Previous stop before `offset`.
    ///
    /// Whitespace tokens before the caret are skipped; running out of tokens while skipping
    /// lands on the sequence start (offset 0 for the document). The skip never leaves the
    /// sequence: in an embedded sequence that starts with whitespace the caret stops at the
    /// start of the embedded sequence, not in the owner's sequence. Inside an identifier the caret
    /// moves to the start of the capital run that precedes it.
    pub fn previous_position<I: TokenId>(
        &self,
        mut sequence: TokenSequence<'_, I>,
        offset: usize,
    ) -> usize {
        if offset == 0 {
            return 0;
        }
        if sequence.move_to(offset - 1).is_none() {
            return self.words.previous_word(sequence, offset);
        }

        let mut caret = offset;
        let token = loop {
            let Some(token) = sequence.token() else {
                return caret;
            };
            if !token.id().is_whitespace() {
                break token;
            }
            if !sequence.move_previous() {
                return token.offset();
            }
            caret = sequence.token().map_or(caret, Token::end);
        };

        if !token.id().is_identifier() || caret <= token.offset() {
            return self.words.previous_word(sequence, caret);
        }

        let chars: Vec<char> = token.text().chars().collect();
        let before_caret = (caret - 1 - token.offset()).min(chars.len().saturating_sub(1));
        token.offset() + previous_stop(&chars, before_caret)
    }
}

/// Char index of the next stop after `from` (`from < chars.len()`).
fn next_stop(chars: &[char], from: usize) -> usize {
    let mut start = from + 1;
    if chars[from].is_uppercase() {
        while start < chars.len() && chars[start].is_uppercase() {
            start += 1;
        }
    }
    chars[start..]
        .iter()
        .position(|c| c.is_uppercase())
        .map_or(chars.len(), |found| start + found)
}

/// Char index of the previous stop, given the index of the char right before the caret.
fn previous_stop(chars: &[char], before_caret: usize) -> usize {
    if chars[before_caret].is_uppercase() {
        return capital_run_start(chars, before_caret);
    }
    match chars[..before_caret].iter().rposition(|c| c.is_uppercase()) {
        Some(capital) => capital_run_start(chars, capital),
        None => 0,
    }
}

/// Start of the capital run that ends at `capital` (inclusive).
fn capital_run_start(chars: &[char], capital: usize) -> usize {
    chars[..capital]
        .iter()
        .rposition(|c| !c.is_uppercase())
        .map_or(0, |lower| lower + 1)
}
