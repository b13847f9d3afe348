//! Port for fixit persistence.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Fixit, FixitFilter, NewFixit};

use super::define_port_error;

define_port_error! {
    /// Errors raised by fixit repository adapters.
    pub enum FixitRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "fixit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "fixit repository query failed: {message}",
    }
}

/// Port for reading and writing fixits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FixitRepository: Send + Sync {
    /// Find a fixit by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Fixit>, FixitRepositoryError>;

    /// List fixits matching `filter`.
    async fn find(&self, filter: &FixitFilter) -> Result<Vec<Fixit>, FixitRepositoryError>;

    /// Insert a new fixit; storage assigns `id` and `created`.
    async fn create(&self, fixit: &NewFixit) -> Result<Fixit, FixitRepositoryError>;

    /// Persist the mutable fields of an existing fixit.
    async fn update(&self, fixit: &Fixit) -> Result<(), FixitRepositoryError>;
}

/// Fixture implementation for tests that do not exercise fixit persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFixitRepository;

#[async_trait]
impl FixitRepository for FixtureFixitRepository {
    async fn find_by_id(&self, _id: i32) -> Result<Option<Fixit>, FixitRepositoryError> {
        Ok(None)
    }

    async fn find(&self, _filter: &FixitFilter) -> Result<Vec<Fixit>, FixitRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, fixit: &NewFixit) -> Result<Fixit, FixitRepositoryError> {
        Ok(Fixit {
            id: 1,
            vocab_id: fixit.vocab_id,
            status: fixit.status,
            field_name: fixit.field_name.clone(),
            comments: fixit.comments.clone(),
            created_by: fixit.created_by.clone(),
            created: Utc::now(),
        })
    }

    async fn update(&self, _fixit: &Fixit) -> Result<(), FixitRepositoryError> {
        Ok(())
    }
}
