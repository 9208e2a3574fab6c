//! Word-movement commands built on camel-case stops.
//!
//! These are the editor actions that consume [`CamelCaseNavigator`]: move, extend the selection,
//! or delete up to the next/previous stop. Commands do not touch any buffer; they compute a
//! [`CamelCaseEdit`] that the host applies.

use crate::camel_case::CamelCaseNavigator;
use crate::hierarchy::TokenHierarchy;
use crate::token::TokenId;
use crate::word::{UnicodeWordBoundaries, WordBoundaries};
use editor_tokens_lang::NavigationConfig;
use std::ops::Range;

/// A word-movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CamelCaseCommand {
    /// Move the caret to the next stop, dropping any selection.
    MoveNext,
    /// Move the caret to the previous stop, dropping any selection.
    MovePrevious,
    /// Extend the selection to the next stop.
    SelectNext,
    /// Extend the selection to the previous stop.
    SelectPrevious,
    /// Delete up to the next stop (or the selection, if any).
    DeleteNext,
    /// Delete back to the previous stop (or the selection, if any).
    DeletePrevious,
}

/// Caret and optional selection anchor, in char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretState {
    /// Caret offset (the active end of a selection).
    pub caret: usize,
    /// Fixed end of the selection, if a selection exists.
    pub anchor: Option<usize>,
}

impl CaretState {
    /// A caret without selection.
    pub fn at(caret: usize) -> Self {
        Self {
            caret,
            anchor: None,
        }
    }

    /// A selection from `anchor` to `caret`.
    pub fn selecting(anchor: usize, caret: usize) -> Self {
        Self {
            caret,
            anchor: Some(anchor),
        }
    }

    /// The selected range, if non-empty.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        (anchor != self.caret).then(|| anchor.min(self.caret)..anchor.max(self.caret))
    }
}

/// Result of a [`CamelCaseCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CamelCaseEdit {
    /// Place the caret at `offset` with no selection.
    MoveCaret {
        /// New caret offset.
        offset: usize,
    },
    /// Select from `anchor` to `caret`.
    Select {
        /// Fixed end.
        anchor: usize,
        /// Active end.
        caret: usize,
    },
    /// Delete `range`; the caret ends up at `range.start`.
    Delete {
        /// Half-open char range to delete (may be empty).
        range: Range<usize>,
    },
}

impl CamelCaseCommand {
    /// Run the command with the default word rule.
    pub fn execute<I: TokenId>(
        self,
        hierarchy: &TokenHierarchy<I>,
        state: CaretState,
        config: &NavigationConfig,
    ) -> CamelCaseEdit {
        self.execute_with(
            &CamelCaseNavigator::new(UnicodeWordBoundaries),
            hierarchy,
            state,
            config,
        )
    }

    /// Run the command with a custom navigator.
    pub fn execute_with<I: TokenId, W: WordBoundaries>(
        self,
        navigator: &CamelCaseNavigator<W>,
        hierarchy: &TokenHierarchy<I>,
        state: CaretState,
        config: &NavigationConfig,
    ) -> CamelCaseEdit {
        let caret = state.caret.min(hierarchy.len());
        match self {
            Self::MoveNext => CamelCaseEdit::MoveCaret {
                offset: next_stop(navigator, hierarchy, caret, config),
            },
            Self::MovePrevious => CamelCaseEdit::MoveCaret {
                offset: previous_stop(navigator, hierarchy, caret, config),
            },
            Self::SelectNext => CamelCaseEdit::Select {
                anchor: state.anchor.unwrap_or(caret),
                caret: next_stop(navigator, hierarchy, caret, config),
            },
            Self::SelectPrevious => CamelCaseEdit::Select {
                anchor: state.anchor.unwrap_or(caret),
                caret: previous_stop(navigator, hierarchy, caret, config),
            },
            Self::DeleteNext => CamelCaseEdit::Delete {
                range: state
                    .selection()
                    .unwrap_or_else(|| caret..next_stop(navigator, hierarchy, caret, config)),
            },
            Self::DeletePrevious => CamelCaseEdit::Delete {
                range: state
                    .selection()
                    .unwrap_or_else(|| previous_stop(navigator, hierarchy, caret, config)..caret),
            },
        }
    }
}

fn next_stop<I: TokenId, W: WordBoundaries>(
    navigator: &CamelCaseNavigator<W>,
    hierarchy: &TokenHierarchy<I>,
    caret: usize,
    config: &NavigationConfig,
) -> usize {
    let sequence = hierarchy.sequence_at(caret);
    if config.camel_case {
        navigator.next_position(sequence, caret)
    } else {
        navigator.words().next_word(sequence, caret)
    }
}

fn previous_stop<I: TokenId, W: WordBoundaries>(
    navigator: &CamelCaseNavigator<W>,
    hierarchy: &TokenHierarchy<I>,
    caret: usize,
    config: &NavigationConfig,
) -> usize {
    let sequence = hierarchy.sequence_at_backward(caret);
    if config.camel_case {
        navigator.previous_position(sequence, caret)
    } else {
        navigator.words().previous_word(sequence, caret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_range_is_ordered() {
        assert_eq!(CaretState::selecting(7, 3).selection(), Some(3..7));
        assert_eq!(CaretState::selecting(3, 3).selection(), None);
        assert_eq!(CaretState::at(3).selection(), None);
    }
}
