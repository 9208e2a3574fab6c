#![warn(missing_docs)]
//! Editor Tokens - camel-case navigation and token-balance tracking over live token streams
//!
//! # Overview
//!
//! `editor-tokens` is a headless kernel component for code editors. It works directly on the
//! token stream a host tokenizer maintains for each open document and answers two questions
//! that are asked on every caret move and every keystroke:
//!
//! - **Where is the next/previous word stop?** Camel-case aware: inside `fooBarBAZqux` the
//!   caret stops before `Bar`, before `BAZqux` and at the identifier edges.
//! - **Are the braces balanced?** For every registered `(left, right)` token pair, the signed
//!   count `#left - #right` over the whole document, kept current incrementally as the token
//!   stream is edited.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  DocumentRegistry (per-document lifecycle)  │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  CamelCaseCommand    │  TokenBalance        │  ← Editor actions / queries
//! │  CamelCaseNavigator  │  (Dirty ⇄ Scanned)   │
//! ├──────────────────────┴──────────────────────┤
//! │  TokenHierarchy (sequence arena + events)   │  ← Token model
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_tokens::{DocumentRegistry, Language, TokenCategory, TokenHierarchy, TokenId};
//! use editor_tokens::next_camel_case_position;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     Ident,
//!     Space,
//!     LBrace,
//!     RBrace,
//! }
//!
//! impl TokenId for Kind {
//!     fn category(&self) -> TokenCategory {
//!         match self {
//!             Kind::Ident => TokenCategory::Identifier,
//!             Kind::Space => TokenCategory::Whitespace,
//!             _ => TokenCategory::Other,
//!         }
//!     }
//! }
//!
//! let java = Language::new("java");
//! let tokens = editor_tokens::layout_tokens(
//!     0,
//!     [(Kind::Ident, "fooBar"), (Kind::Space, " "), (Kind::LBrace, "{")],
//! );
//!
//! let mut registry = DocumentRegistry::new();
//! let doc = registry.open_document(TokenHierarchy::new(java.clone(), tokens));
//!
//! let hierarchy = registry.hierarchy(doc).unwrap();
//! assert_eq!(next_camel_case_position(hierarchy.read().unwrap().sequence_at(0), 0), 3);
//!
//! let balance = registry.token_balance(doc).unwrap();
//! balance.add_token_pair(java.clone(), Kind::LBrace, Kind::RBrace);
//! assert_eq!(balance.balance(&java, &Kind::LBrace), 1);
//!
//! registry.close_document(doc).unwrap();
//! ```
//!
//! # Module Description
//!
//! - [`token`] - tokens, token-kind classification and languages
//! - [`hierarchy`] - arena of embedded token sequences, sequence views, edits, listeners
//! - [`event`] - hierarchy change events
//! - [`camel_case`] - camel-case stop finder
//! - [`word`] - generic word-boundary fallback
//! - [`commands`] - move/select/delete word commands
//! - [`balance`] - incremental balance tracker
//! - [`registry`] - per-document lifecycle
//!
//! # Units
//!
//! Offsets and lengths are character offsets (Unicode scalar values).

pub mod balance;
pub mod camel_case;
pub mod commands;
pub mod event;
pub mod hierarchy;
pub mod registry;
pub mod token;
pub mod word;

pub use balance::{NOT_TRACKED, SharedHierarchy, TokenBalance, TokenIdPair};
pub use camel_case::{CamelCaseNavigator, next_camel_case_position, previous_camel_case_position};
pub use commands::{CamelCaseCommand, CamelCaseEdit, CaretState};
pub use event::{TokenChange, TokenChangeKind, TokenHierarchyEvent};
pub use hierarchy::{
    HierarchyError, HierarchyListener, ListenerId, SequenceId, TokenHierarchy, TokenSequence,
};
pub use registry::{DocumentId, DocumentRegistry, RegistryError};
pub use token::{Language, Token, TokenCategory, TokenId, layout_tokens};
pub use word::{UnicodeWordBoundaries, WordBoundaries};

pub use editor_tokens_lang::{BracketPair, LanguageConfig, NavigationConfig};
