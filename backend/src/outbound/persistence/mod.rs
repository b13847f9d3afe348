//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel row structs and domain types and
//! map storage failures onto the port error enums. No business rules live
//! here; validation and audit assembly stay in the domain services.
//!
//! # Example
//!
//! ```ignore
//! use verdure_admin::outbound::persistence::{DbPool, DieselVocabRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/palabras")).await?;
//! let repo = DieselVocabRepository::new(pool);
//! ```

mod diesel_audit_repository;
mod diesel_error_mapping;
mod diesel_fixit_repository;
mod diesel_vocab_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_audit_repository::DieselAuditRepository;
pub use diesel_fixit_repository::DieselFixitRepository;
pub use diesel_vocab_repository::DieselVocabRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
