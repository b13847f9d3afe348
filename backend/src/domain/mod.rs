//! Domain entities, audit machinery and services.
//!
//! Public surface:
//! - [`DomainError`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`Vocab`], [`Fixit`], [`Audit`]: stored entities and their inputs.
//! - [`compare`] / [`compare_to_string`]: structural JSON diff.
//! - [`build_audit`] / [`build_entity_audit`]: audit record assembly.
//! - [`VocabService`], [`FixitService`], [`AuditService`]: driving port
//!   implementations over the driven ports in [`ports`].

pub mod audit;
pub mod audit_service;
pub mod duration;
pub mod error;
pub mod fixit;
pub mod fixit_service;
pub mod json_diff;
pub mod limit;
pub mod ports;
pub mod validation;
pub mod vocab;
pub mod vocab_service;

pub use self::audit::{
    Audit, AuditFilter, AuditTable, Auditable, MAX_COMMENTS_LEN, NewAudit, UnknownAuditTable,
    build_audit, build_entity_audit,
};
pub use self::audit_service::AuditService;
pub use self::duration::Duration;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::fixit::{
    Fixit, FixitChanges, FixitFilter, FixitStatus, NewFixit, UnknownFixitStatus,
};
pub use self::fixit_service::FixitService;
pub use self::json_diff::{FieldChange, FieldDiff, compare, compare_to_string};
pub use self::limit::QueryLimit;
pub use self::vocab::{NewVocab, Vocab, VocabChanges, VocabContent, VocabFilter};
pub use self::vocab_service::VocabService;
