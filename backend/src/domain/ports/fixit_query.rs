//! Driving port for fixit reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Fixit, FixitStatus};

/// Request for listing fixits.
///
/// Missing time bounds default to the hour before the service clock's now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFixitsRequest {
    pub status: FixitStatus,
    pub vocab_id: Option<i32>,
    /// RFC 3339 lower bound on `created`.
    pub start: Option<String>,
    /// RFC 3339 upper bound on `created`.
    pub end: Option<String>,
    pub limit: i64,
}

/// Driving port for reading fixits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FixitQuery: Send + Sync {
    /// Fetch a fixit by id, failing with `NotFound` when absent.
    async fn find_fixit_by_id(&self, id: i32) -> Result<Fixit, DomainError>;

    /// List fixits matching the request.
    async fn find_fixits(&self, request: ListFixitsRequest) -> Result<Vec<Fixit>, DomainError>;
}
