//! Port for the append-only audit log.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Audit, AuditFilter, NewAudit};

use super::define_port_error;

define_port_error! {
    /// Errors raised by audit repository adapters.
    pub enum AuditRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "audit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "audit repository query failed: {message}",
    }
}

/// Port for reading and appending audit rows. Rows are never updated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Find an audit row by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Audit>, AuditRepositoryError>;

    /// List audit rows matching `filter`.
    async fn find(&self, filter: &AuditFilter) -> Result<Vec<Audit>, AuditRepositoryError>;

    /// Append a row; storage assigns `id` and `created`.
    async fn create(&self, audit: &NewAudit) -> Result<Audit, AuditRepositoryError>;
}

/// Fixture implementation that accepts every write.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuditRepository;

#[async_trait]
impl AuditRepository for FixtureAuditRepository {
    async fn find_by_id(&self, _id: i32) -> Result<Option<Audit>, AuditRepositoryError> {
        Ok(None)
    }

    async fn find(&self, _filter: &AuditFilter) -> Result<Vec<Audit>, AuditRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, audit: &NewAudit) -> Result<Audit, AuditRepositoryError> {
        let NewAudit {
            object_id,
            table_name,
            diff,
            before,
            after,
            comments,
            created_by,
        } = audit.clone();
        Ok(Audit {
            id: 1,
            object_id,
            table_name,
            diff,
            before,
            after,
            comments,
            created_by,
            created: Utc::now(),
        })
    }
}
