//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by the Diesel adapters in
//! `outbound::persistence`. Driving ports (`*Command`, `*Query`) are
//! implemented by the domain services and called by the admin CLI.

mod macros;
pub(crate) use macros::define_port_error;

mod audit_query;
mod audit_repository;
mod fixit_command;
mod fixit_query;
mod fixit_repository;
mod vocab_command;
mod vocab_query;
mod vocab_repository;

#[cfg(test)]
pub use audit_query::MockAuditQuery;
pub use audit_query::{AuditQuery, ListAuditsRequest};
#[cfg(test)]
pub use audit_repository::MockAuditRepository;
pub use audit_repository::{AuditRepository, AuditRepositoryError, FixtureAuditRepository};
pub use fixit_command::FixitCommand;
#[cfg(test)]
pub use fixit_command::MockFixitCommand;
pub use fixit_query::{FixitQuery, ListFixitsRequest};
#[cfg(test)]
pub use fixit_query::MockFixitQuery;
#[cfg(test)]
pub use fixit_repository::MockFixitRepository;
pub use fixit_repository::{FixitRepository, FixitRepositoryError, FixtureFixitRepository};
#[cfg(test)]
pub use vocab_command::MockVocabCommand;
pub use vocab_command::VocabCommand;
#[cfg(test)]
pub use vocab_query::MockVocabQuery;
pub use vocab_query::{ListVocabsRequest, VocabQuery};
#[cfg(test)]
pub use vocab_repository::MockVocabRepository;
pub use vocab_repository::{FixtureVocabRepository, VocabRepository, VocabRepositoryError};
