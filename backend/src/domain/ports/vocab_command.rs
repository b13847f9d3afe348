//! Driving port for vocabulary mutations.
//!
//! Every successful call writes exactly one audit row alongside the entry.

use async_trait::async_trait;

use crate::domain::{DomainError, NewVocab, Vocab, VocabChanges};

/// Driving port for creating and updating vocabulary entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VocabCommand: Send + Sync {
    /// Create an entry.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when a field fails validation.
    /// - `Conflict` when `learning_lang` is already taken.
    async fn create_vocab(&self, vocab: NewVocab) -> Result<Vocab, DomainError>;

    /// Replace the mutable fields of an existing entry.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when a field fails validation.
    /// - `NotFound` when no entry has the given id.
    /// - `Conflict` when nothing would change.
    async fn update_vocab(&self, changes: VocabChanges) -> Result<Vocab, DomainError>;
}
