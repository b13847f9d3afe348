//! Audit log service.
//!
//! Persists audit rows built by [`crate::domain::build_audit`] and implements
//! the [`AuditQuery`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::error;

use crate::domain::ports::{AuditQuery, AuditRepository, AuditRepositoryError, ListAuditsRequest};
use crate::domain::{
    Audit, AuditFilter, AuditTable, Auditable, Duration, DomainError, QueryLimit, build_audit,
    build_entity_audit,
};

fn map_repository_error(error: AuditRepositoryError) -> DomainError {
    match error {
        AuditRepositoryError::Connection { message } => {
            DomainError::service_unavailable(format!("audit repository unavailable: {message}"))
        }
        AuditRepositoryError::Query { message } => {
            DomainError::internal(format!("audit repository error: {message}"))
        }
    }
}

/// Writes and reads the audit log.
pub struct AuditService<R> {
    audit_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for AuditService<R> {
    fn clone(&self) -> Self {
        Self {
            audit_repo: Arc::clone(&self.audit_repo),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> AuditService<R> {
    /// Create a service over `audit_repo`; `clock` supplies default query windows.
    pub fn new(audit_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { audit_repo, clock }
    }
}

impl<R> AuditService<R>
where
    R: AuditRepository,
{
    /// Build and persist an audit row from raw JSON snapshots.
    pub async fn create_audit(
        &self,
        table: AuditTable,
        object_id: i32,
        comments: &str,
        created_by: &str,
        before_json: &str,
        after_json: &str,
    ) -> Result<Audit, DomainError> {
        let audit = build_audit(table, object_id, comments, created_by, before_json, after_json)?;
        self.audit_repo
            .create(&audit)
            .await
            .map_err(map_repository_error)
    }

    /// Build and persist an audit row for an entity transition.
    ///
    /// Called after the entity write has committed, so a failure here is
    /// logged as well as returned.
    pub async fn record<T>(
        &self,
        comments: &str,
        created_by: &str,
        before: Option<&T>,
        after: Option<&T>,
    ) -> Result<Audit, DomainError>
    where
        T: Auditable + Sync,
    {
        let audit = build_entity_audit(comments, created_by, before, after)?;
        self.audit_repo.create(&audit).await.map_err(|err| {
            error!(
                table = %audit.table_name,
                object_id = audit.object_id,
                error = %err,
                "audit write failed after entity write committed"
            );
            map_repository_error(err)
        })
    }
}

#[async_trait]
impl<R> AuditQuery for AuditService<R>
where
    R: AuditRepository,
{
    async fn find_audit_by_id(&self, id: i32) -> Result<Audit, DomainError> {
        self.audit_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| DomainError::not_found(format!("audit {id} not found")))
    }

    async fn find_audits(&self, request: ListAuditsRequest) -> Result<Vec<Audit>, DomainError> {
        let limit = QueryLimit::new(request.limit)?;
        let window = Duration::from_iso_bounds(
            request.start.as_deref(),
            request.end.as_deref(),
            self.clock.utc(),
        )?;
        let filter = AuditFilter::new(request.table_name, request.object_id, window, limit)?;

        self.audit_repo
            .find(&filter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "audit_service_tests.rs"]
mod tests;
