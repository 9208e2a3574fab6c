//! Incremental token-balance tracking.
//!
//! A [`TokenBalance`] keeps, for every registered `(left, right)` token pair of every tracked
//! language, the signed count `#left - #right` over the whole document, embedded sequences
//! included. It is kept current by listening to the document's [`TokenHierarchy`] events:
//!
//! - while **Scanned**, a modification event is applied incrementally: removed tokens count
//!   `-1`, added tokens `+1`, so the cost is proportional to the edit, not the document;
//! - an activity or rebuild event, and any new pair registration, turns the tracker **Dirty**;
//!   events are then ignored and the next query performs one full rescan.
//!
//! # Locking
//!
//! Registration, event handling, rescans and queries all run under one `Mutex` owned by the
//! tracker. A rescan also reads the hierarchy; the hierarchy lock is always taken *before* the
//! tracker lock (edits hold the hierarchy write lock while listeners run), so queries from other
//! threads never deadlock against edits. Do not query a tracker while holding the write guard of
//! its own hierarchy.
//!
//! # Example
//!
//! ```rust
//! use editor_tokens::{Language, TokenBalance, TokenHierarchy, layout_tokens, NOT_TRACKED};
//! use std::sync::{Arc, RwLock};
//!
//! let java = Language::new("java");
//! let tokens = layout_tokens(0, [('{', "{"), ('{', "{"), ('}', "}")]);
//! let hierarchy = Arc::new(RwLock::new(TokenHierarchy::new(java.clone(), tokens)));
//!
//! let balance = TokenBalance::attach(Arc::clone(&hierarchy));
//! balance.add_token_pair(java.clone(), '{', '}');
//! assert_eq!(balance.balance(&java, &'{'), 1);
//! assert_eq!(balance.balance(&java, &'}'), NOT_TRACKED);
//! balance.detach();
//! ```

use crate::event::{TokenChange, TokenHierarchyEvent};
use crate::hierarchy::{ListenerId, TokenHierarchy};
use crate::token::{Language, Token};
use editor_tokens_lang::LanguageConfig;
use log::{debug, trace, warn};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Balance returned for ids that are not registered as the left member of a pair.
pub const NOT_TRACKED: i32 = i32::MAX;

/// A token hierarchy shared between its editor and the trackers listening to it.
pub type SharedHierarchy<I> = Arc<RwLock<TokenHierarchy<I>>>;

/// A tracked `(left, right)` pair and its current balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdPair<I> {
    left: I,
    right: I,
    balance: i32,
}

impl<I: PartialEq> TokenIdPair<I> {
    fn new(left: I, right: I) -> Self {
        Self {
            left,
            right,
            balance: 0,
        }
    }

    /// Opening id.
    pub fn left(&self) -> &I {
        &self.left
    }

    /// Closing id.
    pub fn right(&self) -> &I {
        &self.right
    }

    /// `#left - #right`.
    pub fn balance(&self) -> i32 {
        self.balance
    }

    /// `diff` counts occurrences of `id`: positive when tokens appear, negative when they go.
    fn update_balance(&mut self, id: &I, diff: i32) {
        if *id == self.left {
            self.balance += diff;
        } else {
            self.balance -= diff;
        }
    }
}

/// Id-to-pair mapping of one language.
#[derive(Debug)]
struct LanguageHandler<I> {
    pairs: Vec<TokenIdPair<I>>,
    index: HashMap<I, usize>,
}

impl<I: Clone + Eq + Hash> LanguageHandler<I> {
    fn new() -> Self {
        Self {
            pairs: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Install a pair; returns the pairs it displaced.
    fn add_pair(&mut self, left: I, right: I) -> Vec<TokenIdPair<I>> {
        let mut displaced = Vec::new();
        if self.index.contains_key(&left) || self.index.contains_key(&right) {
            let (kept, dropped): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pairs)
                .into_iter()
                .partition(|pair| {
                    ![&pair.left, &pair.right].contains(&&left)
                        && ![&pair.left, &pair.right].contains(&&right)
                });
            self.pairs = kept;
            displaced = dropped;
        }
        self.pairs.push(TokenIdPair::new(left, right));
        self.reindex();
        displaced
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (position, pair) in self.pairs.iter().enumerate() {
            self.index.insert(pair.left.clone(), position);
            self.index.insert(pair.right.clone(), position);
        }
    }

    fn update(&mut self, id: &I, diff: i32) {
        if let Some(&position) = self.index.get(id) {
            self.pairs[position].update_balance(id, diff);
        }
    }

    fn update_all<'t>(&mut self, tokens: impl Iterator<Item = &'t Token<I>>, diff: i32)
    where
        I: 't,
    {
        for token in tokens {
            self.update(token.id(), diff);
        }
    }

    fn balance(&self, left: &I) -> Option<i32> {
        let pair = &self.pairs[*self.index.get(left)?];
        (pair.left == *left).then_some(pair.balance)
    }

    fn reset(&mut self) {
        for pair in &mut self.pairs {
            pair.balance = 0;
        }
    }
}

#[derive(Debug)]
struct BalanceState<I> {
    handlers: HashMap<Language, LanguageHandler<I>>,
    scan_done: bool,
    scan_count: u64,
}

impl<I: Clone + Eq + Hash> BalanceState<I> {
    fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            scan_done: false,
            scan_count: 0,
        }
    }

    fn rescan(&mut self, hierarchy: &TokenHierarchy<I>) {
        for handler in self.handlers.values_mut() {
            handler.reset();
        }
        for sequence in hierarchy.walk() {
            if let Some(handler) = self.handlers.get_mut(sequence.language()) {
                handler.update_all(sequence.tokens().iter(), 1);
            }
        }
        self.scan_done = true;
        self.scan_count += 1;
        debug!(
            "token balance rescan #{} over {} sequences",
            self.scan_count,
            hierarchy.sequence_count()
        );
    }

    fn handle_event(&mut self, event: &TokenHierarchyEvent<I>) {
        if event.kind().invalidates() {
            if self.scan_done {
                debug!("token balance invalidated by {:?} event", event.kind());
            }
            self.scan_done = false;
            return;
        }
        // A dirty tracker rescans on the next query anyway.
        if !self.scan_done {
            return;
        }
        if let Some(change) = event.change() {
            self.apply_change(change);
        }
    }

    fn apply_change(&mut self, change: &TokenChange<I>) {
        if let Some(handler) = self.handlers.get_mut(change.language()) {
            trace!(
                "token balance update for {}: -{} +{}",
                change.language(),
                change.removed_token_count(),
                change.added_token_count()
            );
            handler.update_all(change.removed_tokens(), -1);
            handler.update_all(change.added_tokens(), 1);
        }
        for embedded in change.embedded_changes() {
            self.apply_change(embedded);
        }
    }
}

/// Per-document balance tracker.
///
/// Obtain one per document from [`DocumentRegistry::token_balance`](crate::DocumentRegistry::token_balance),
/// or attach one manually with [`TokenBalance::attach`]. The subscription ends with
/// [`TokenBalance::detach`] or when the tracker is dropped, whichever comes first. Dropping
/// takes the hierarchy write lock, so do not drop a tracker while holding its hierarchy's guard.
pub struct TokenBalance<I> {
    hierarchy: SharedHierarchy<I>,
    state: Arc<Mutex<BalanceState<I>>>,
    listener: Mutex<Option<ListenerId>>,
}

impl<I: std::fmt::Debug> std::fmt::Debug for TokenBalance<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBalance")
            .field("state", &self.state)
            .field("listener", &self.listener)
            .finish()
    }
}

impl<I> Drop for TokenBalance<I> {
    fn drop(&mut self) {
        let listener = self
            .listener
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(listener) = listener {
            write(&self.hierarchy).unsubscribe(listener);
        }
    }
}

impl<I> TokenBalance<I>
where
    I: Clone + Eq + Hash + Send + Sync + 'static,
{
    /// Create a tracker and subscribe it to `hierarchy`. The tracker starts Dirty.
    pub fn attach(hierarchy: SharedHierarchy<I>) -> Self {
        let state = Arc::new(Mutex::new(BalanceState::new()));
        let listener_state = Arc::clone(&state);
        let listener = write(&hierarchy).subscribe(move |event| {
            lock(&listener_state).handle_event(event);
        });
        Self {
            hierarchy,
            state,
            listener: Mutex::new(Some(listener)),
        }
    }

    /// Unsubscribe from the hierarchy. Returns `false` if already detached.
    ///
    /// A detached tracker still answers queries, but only from full rescans: every query
    /// rescans, since no events arrive to keep it current.
    pub fn detach(&self) -> bool {
        let Some(listener) = lock(&self.listener).take() else {
            return false;
        };
        let removed = write(&self.hierarchy).unsubscribe(listener);
        lock(&self.state).scan_done = false;
        removed
    }

    /// Returns `true` while subscribed to the hierarchy.
    pub fn is_attached(&self) -> bool {
        lock(&self.listener).is_some()
    }

    /// The hierarchy this tracker reads.
    pub fn hierarchy(&self) -> &SharedHierarchy<I> {
        &self.hierarchy
    }

    /// Track `left`/`right` in `language`.
    ///
    /// Ids already paired in that language lose their old pair. The tracker turns Dirty, since
    /// the new ids were never counted.
    pub fn add_token_pair(&self, language: Language, left: I, right: I)
    where
        I: std::fmt::Debug,
    {
        let mut state = lock(&self.state);
        debug!("tracking {left:?}/{right:?} in {language}");
        let displaced = state
            .handlers
            .entry(language.clone())
            .or_insert_with(LanguageHandler::new)
            .add_pair(left, right);
        for pair in displaced {
            warn!(
                "{language}: pair {:?}/{:?} replaced by a new registration",
                pair.left, pair.right
            );
        }
        state.scan_done = false;
    }

    /// Register every bracket pair of `config`, resolving token names with `resolve`.
    ///
    /// Pairs with an unresolvable name are skipped. Returns the number of registered pairs.
    pub fn register_config<F>(&self, config: &LanguageConfig, resolve: F) -> usize
    where
        F: Fn(&str) -> Option<I>,
        I: std::fmt::Debug,
    {
        let language = Language::new(&config.name);
        let mut registered = 0;
        for pair in &config.brackets {
            match (resolve(&pair.left), resolve(&pair.right)) {
                (Some(left), Some(right)) => {
                    self.add_token_pair(language.clone(), left, right);
                    registered += 1;
                }
                _ => warn!(
                    "{language}: cannot resolve bracket pair {}/{}",
                    pair.left, pair.right
                ),
            }
        }
        registered
    }

    /// Balance of the pair whose left id is `left`, or [`NOT_TRACKED`].
    ///
    /// Rescans first if the tracker is Dirty.
    pub fn balance(&self, language: &Language, left: &I) -> i32 {
        self.try_balance(language, left).unwrap_or(NOT_TRACKED)
    }

    /// Like [`TokenBalance::balance`], with `None` instead of the sentinel.
    pub fn try_balance(&self, language: &Language, left: &I) -> Option<i32> {
        self.scanned_state()
            .handlers
            .get(language)
            .and_then(|handler| handler.balance(left))
    }

    /// `Some(true)` if every `left` has a matching right token.
    pub fn is_balanced(&self, language: &Language, left: &I) -> Option<bool> {
        self.try_balance(language, left).map(|balance| balance == 0)
    }

    /// Snapshot of the pairs tracked in `language`, with current balances.
    pub fn pairs(&self, language: &Language) -> Vec<TokenIdPair<I>> {
        self.scanned_state()
            .handlers
            .get(language)
            .map(|handler| handler.pairs.clone())
            .unwrap_or_default()
    }

    /// Languages with at least one registered pair.
    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<_> = lock(&self.state).handlers.keys().cloned().collect();
        languages.sort();
        languages
    }

    /// `true` when balances are current (Scanned), `false` when a rescan is pending (Dirty).
    pub fn is_scanned(&self) -> bool {
        lock(&self.state).scan_done
    }

    /// Number of full rescans performed so far.
    pub fn scan_count(&self) -> u64 {
        lock(&self.state).scan_count
    }

    fn scanned_state(&self) -> MutexGuard<'_, BalanceState<I>> {
        {
            let state = lock(&self.state);
            if state.scan_done && self.is_attached() {
                return state;
            }
        }
        let hierarchy = read(&self.hierarchy);
        let mut state = lock(&self.state);
        if !state.scan_done || !self.is_attached() {
            state.rescan(&hierarchy);
        }
        state
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
