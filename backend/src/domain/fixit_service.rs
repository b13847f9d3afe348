//! Fixit domain service.
//!
//! Mirrors the vocabulary guards for correction proposals: validated create,
//! no-op-rejecting update, one audit row per committed write.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::audit_service::AuditService;
use crate::domain::ports::{
    AuditRepository, FixitCommand, FixitQuery, FixitRepository, FixitRepositoryError,
    ListFixitsRequest,
};
use crate::domain::{
    Duration, DomainError, Fixit, FixitChanges, FixitFilter, NewFixit, QueryLimit,
};

fn map_repository_error(error: FixitRepositoryError) -> DomainError {
    match error {
        FixitRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("fixit repository unavailable: {message}"))
        }
        FixitRepositoryError::Query { message } => {
            DomainError::internal(format!("fixit repository error: {message}"))
        }
    }
}

/// Fixit service implementing [`FixitCommand`] and [`FixitQuery`].
pub struct FixitService<F, A> {
    fixit_repo: Arc<F>,
    audits: AuditService<A>,
    actor: String,
    clock: Arc<dyn Clock>,
}

impl<F, A> FixitService<F, A> {
    /// Create a service; `clock` supplies default listing windows.
    pub fn new(
        fixit_repo: Arc<F>,
        audits: AuditService<A>,
        actor: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fixit_repo,
            audits,
            actor: actor.into(),
            clock,
        }
    }
}

impl<F, A> FixitService<F, A>
where
    F: FixitRepository,
{
    async fn load(&self, id: i32) -> Result<Fixit, DomainError> {
        self.fixit_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("fixit {id} not found")))
    }
}

#[async_trait]
impl<F, A> FixitCommand for FixitService<F, A>
where
    F: FixitRepository,
    A: AuditRepository,
{
    async fn create_fixit(&self, fixit: NewFixit) -> Result<Fixit, DomainError> {
        fixit.validate()?;

        let created = self
            .fixit_repo
            .create(&fixit)
            .await
            .map_err(map_repository_error)?;
        info!(fixit_id = created.id, vocab_id = created.vocab_id, "created fixit");

        self.audits
            .record("created fixit", &self.actor, None, Some(&created))
            .await?;
        Ok(created)
    }

    async fn update_fixit(&self, changes: FixitChanges) -> Result<Fixit, DomainError> {
        changes.validate()?;

        let current = self.load(changes.id).await?;
        if !changes.differs_from(&current) {
            return Err(DomainError::conflict(format!(
                "update for fixit {} has no changes",
                current.id
            )));
        }

        let mut updated = current.clone();
        updated.apply(changes);
        self.fixit_repo
            .update(&updated)
            .await
            .map_err(map_repository_error)?;
        info!(fixit_id = updated.id, status = %updated.status, "updated fixit");

        self.audits
            .record("updated fixit", &self.actor, Some(&current), Some(&updated))
            .await?;
        Ok(updated)
    }
}

#[async_trait]
impl<F, A> FixitQuery for FixitService<F, A>
where
    F: FixitRepository,
    A: Send + Sync,
{
    async fn find_fixit_by_id(&self, id: i32) -> Result<Fixit, DomainError> {
        self.load(id).await
    }

    async fn find_fixits(&self, request: ListFixitsRequest) -> Result<Vec<Fixit>, DomainError> {
        let limit = QueryLimit::new(request.limit)?;
        let window = Duration::from_iso_bounds(
            request.start.as_deref(),
            request.end.as_deref(),
            self.clock.utc(),
        )?;
        let filter = FixitFilter {
            status: request.status,
            vocab_id: request.vocab_id,
            window,
            limit,
        };
        self.fixit_repo
            .find(&filter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "fixit_service_tests.rs"]
mod tests;
