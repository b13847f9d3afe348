//! Driving port for vocabulary reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Vocab};

/// Request for listing entries of one learning language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListVocabsRequest {
    /// Two-letter code of the language being learned.
    pub learning_lang_code: String,
    /// Select translated (`true`) or untranslated (`false`) entries.
    pub has_first: bool,
    /// Row cap; must lie in `1..=500`.
    pub limit: i64,
}

/// Driving port for reading vocabulary entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VocabQuery: Send + Sync {
    /// Fetch an entry by id, failing with `NotFound` when absent.
    async fn find_vocab_by_id(&self, id: i32) -> Result<Vocab, DomainError>;

    /// List entries matching the request.
    async fn find_vocabs(&self, request: ListVocabsRequest) -> Result<Vec<Vocab>, DomainError>;
}
