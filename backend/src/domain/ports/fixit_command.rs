//! Driving port for fixit mutations.

use async_trait::async_trait;

use crate::domain::{DomainError, Fixit, FixitChanges, NewFixit};

/// Driving port for raising and progressing fixits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FixitCommand: Send + Sync {
    /// Raise a fixit and audit the creation.
    async fn create_fixit(&self, fixit: NewFixit) -> Result<Fixit, DomainError>;

    /// Change status, field name or comments of an existing fixit.
    ///
    /// # Errors
    ///
    /// - `NotFound` when no fixit has the given id.
    /// - `Conflict` when nothing would change.
    async fn update_fixit(&self, changes: FixitChanges) -> Result<Fixit, DomainError>;
}
