//! Vocabulary administration backend.
//!
//! The domain layer owns the entities, the structural JSON diff and the audit
//! trail; `outbound::persistence` stores them in PostgreSQL through Diesel and
//! `cli` exposes the driving ports to the admin binary.

pub mod cli;
pub mod config;
pub mod domain;
pub mod outbound;

#[cfg(test)]
pub mod test_support;
