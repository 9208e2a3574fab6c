//! Document registry.
//!
//! The registry owns the token hierarchy of every open document together with the document's
//! lazily created [`TokenBalance`]. The tracker lives exactly as long as the document entry:
//! [`DocumentRegistry::close_document`] detaches it from the hierarchy before dropping both.

use crate::balance::{SharedHierarchy, TokenBalance};
use crate::hierarchy::TokenHierarchy;
use log::debug;
use std::collections::BTreeMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Opaque identifier for a document in a [`DocumentRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Registry-level errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown document {0:?}")]
    /// The document id is not open.
    UnknownDocument(DocumentId),
}

struct DocumentEntry<I> {
    hierarchy: SharedHierarchy<I>,
    balance: Option<Arc<TokenBalance<I>>>,
}

/// Open documents and their per-document trackers.
pub struct DocumentRegistry<I> {
    documents: BTreeMap<DocumentId, DocumentEntry<I>>,
    next_id: u64,
}

impl<I> std::fmt::Debug for DocumentRegistry<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentRegistry")
            .field("documents", &self.documents.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<I> Default for DocumentRegistry<I> {
    fn default() -> Self {
        Self {
            documents: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<I> DocumentRegistry<I>
where
    I: Clone + Eq + Hash + Send + Sync + 'static,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no document is open.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns `true` if `id` is open.
    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Ids of all open documents, in opening order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys().copied()
    }

    /// Take ownership of a document's token hierarchy.
    pub fn open_document(&mut self, hierarchy: TokenHierarchy<I>) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        self.documents.insert(
            id,
            DocumentEntry {
                hierarchy: Arc::new(RwLock::new(hierarchy)),
                balance: None,
            },
        );
        debug!("opened document {id:?}");
        id
    }

    /// Shared handle to the document's hierarchy, for editing and navigation.
    pub fn hierarchy(&self, id: DocumentId) -> Result<SharedHierarchy<I>, RegistryError> {
        self.entry(id).map(|entry| Arc::clone(&entry.hierarchy))
    }

    /// The document's tracker, created and subscribed on first use.
    pub fn token_balance(&mut self, id: DocumentId) -> Result<Arc<TokenBalance<I>>, RegistryError> {
        let entry = self
            .documents
            .get_mut(&id)
            .ok_or(RegistryError::UnknownDocument(id))?;
        let balance = entry.balance.get_or_insert_with(|| {
            debug!("attaching token balance to document {id:?}");
            Arc::new(TokenBalance::attach(Arc::clone(&entry.hierarchy)))
        });
        Ok(Arc::clone(balance))
    }

    /// Returns `true` if the tracker of `id` has been created.
    pub fn has_token_balance(&self, id: DocumentId) -> bool {
        self.entry(id).is_ok_and(|entry| entry.balance.is_some())
    }

    /// Close a document: detach its tracker and drop the registry's handles.
    ///
    /// Clones of the hierarchy or tracker handles held elsewhere stay usable, but the tracker no
    /// longer receives events.
    pub fn close_document(&mut self, id: DocumentId) -> Result<(), RegistryError> {
        let entry = self
            .documents
            .remove(&id)
            .ok_or(RegistryError::UnknownDocument(id))?;
        if let Some(balance) = entry.balance {
            balance.detach();
        }
        debug!("closed document {id:?}");
        Ok(())
    }

    fn entry(&self, id: DocumentId) -> Result<&DocumentEntry<I>, RegistryError> {
        self.documents
            .get(&id)
            .ok_or(RegistryError::UnknownDocument(id))
    }
}
