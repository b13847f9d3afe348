//! Driving port for audit log reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Audit, AuditTable, DomainError};

/// Request for listing audit rows.
///
/// `object_id` is only meaningful together with `table_name`; supplying it
/// alone is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAuditsRequest {
    pub table_name: Option<AuditTable>,
    pub object_id: Option<i32>,
    /// RFC 3339 lower bound on `created`.
    pub start: Option<String>,
    /// RFC 3339 upper bound on `created`.
    pub end: Option<String>,
    pub limit: i64,
}

/// Driving port for reading the audit log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditQuery: Send + Sync {
    /// Fetch an audit row by id, failing with `NotFound` when absent.
    async fn find_audit_by_id(&self, id: i32) -> Result<Audit, DomainError>;

    /// List audit rows matching the request.
    async fn find_audits(&self, request: ListAuditsRequest) -> Result<Vec<Audit>, DomainError>;
}
