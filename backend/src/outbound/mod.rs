//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories over Diesel, the connection
//!   pool and embedded migrations.

pub mod persistence;
