//! Vocabulary domain service.
//!
//! Guards the create and update transitions of [`Vocab`] and records one
//! audit row per committed mutation. The entity write and the audit write are
//! separate statements: when the audit write fails the entity change stands
//! and the caller receives the audit error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::audit_service::AuditService;
use crate::domain::ports::{
    AuditRepository, ListVocabsRequest, VocabCommand, VocabQuery, VocabRepository,
    VocabRepositoryError,
};
use crate::domain::{DomainError, NewVocab, QueryLimit, Vocab, VocabChanges, VocabFilter};

fn map_repository_error(error: VocabRepositoryError) -> DomainError {
    match error {
        VocabRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("vocab repository unavailable: {message}"))
        }
        VocabRepositoryError::Query { message } => {
            DomainError::internal(format!("vocab repository error: {message}"))
        }
        VocabRepositoryError::DuplicateLearningLang { learning_lang } => {
            DomainError::conflict(format!(
                "vocab with learning lang {learning_lang} already exists"
            ))
        }
    }
}

/// Vocabulary service implementing [`VocabCommand`] and [`VocabQuery`].
pub struct VocabService<V, A> {
    vocab_repo: Arc<V>,
    audits: AuditService<A>,
    actor: String,
}

impl<V, A> VocabService<V, A> {
    /// Create a service; `actor` is stamped on every audit row it writes.
    pub fn new(vocab_repo: Arc<V>, audits: AuditService<A>, actor: impl Into<String>) -> Self {
        Self {
            vocab_repo,
            audits,
            actor: actor.into(),
        }
    }
}

impl<V, A> VocabService<V, A>
where
    V: VocabRepository,
{
    async fn load(&self, id: i32) -> Result<Vocab, DomainError> {
        self.vocab_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("vocab {id} not found")))
    }
}

#[async_trait]
impl<V, A> VocabCommand for VocabService<V, A>
where
    V: VocabRepository,
    A: AuditRepository,
{
    async fn create_vocab(&self, vocab: NewVocab) -> Result<Vocab, DomainError> {
        vocab.validate()?;

        let existing = self
            .vocab_repo
            .find_by_learning_lang(&vocab.learning_lang)
            .await
            .map_err(map_repository_error)?;
        if let Some(existing) = existing {
            debug!(
                learning_lang = %vocab.learning_lang,
                existing_id = existing.id,
                "duplicate vocab rejected"
            );
            return Err(DomainError::conflict(format!(
                "vocab with learning lang {} and id {} already exists",
                existing.learning_lang, existing.id
            )));
        }

        let created = self
            .vocab_repo
            .create(&vocab)
            .await
            .map_err(map_repository_error)?;
        info!(vocab_id = created.id, "created vocab");

        self.audits
            .record("created vocab", &self.actor, None, Some(&created))
            .await?;
        Ok(created)
    }

    async fn update_vocab(&self, changes: VocabChanges) -> Result<Vocab, DomainError> {
        changes.content.validate()?;

        let current = self.load(changes.id).await?;
        if !changes.differs_from(&current) {
            return Err(DomainError::conflict(format!(
                "update for vocab {} has no changes",
                current.id
            )));
        }

        let mut updated = current.clone();
        updated.apply_content(changes.content);
        self.vocab_repo
            .update(&updated)
            .await
            .map_err(map_repository_error)?;
        info!(vocab_id = updated.id, "updated vocab");

        self.audits
            .record("updated vocab", &self.actor, Some(&current), Some(&updated))
            .await?;
        Ok(updated)
    }
}

#[async_trait]
impl<V, A> VocabQuery for VocabService<V, A>
where
    V: VocabRepository,
    A: Send + Sync,
{
    async fn find_vocab_by_id(&self, id: i32) -> Result<Vocab, DomainError> {
        self.load(id).await
    }

    async fn find_vocabs(&self, request: ListVocabsRequest) -> Result<Vec<Vocab>, DomainError> {
        let filter = VocabFilter {
            learning_lang_code: request.learning_lang_code,
            has_first: request.has_first,
            limit: QueryLimit::new(request.limit)?,
        };
        self.vocab_repo
            .find(&filter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "vocab_service_tests.rs"]
mod tests;
