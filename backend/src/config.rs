//! Admin settings loaded via OrthoConfig.
//!
//! Values come from `VERDURE_*` environment variables or a configuration
//! file; every field is optional and resolved through an accessor.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_AUDIT_ACTOR: &str = "sys";
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Raised when required settings are absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database url is not configured; set VERDURE_DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Settings for the admin binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VERDURE")]
pub struct AdminSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Value written to `created_by` on audit rows.
    pub audit_actor: Option<String>,
}

impl AdminSettings {
    /// The configured database URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// The audit actor, falling back to `sys`.
    pub fn audit_actor(&self) -> &str {
        self.audit_actor
            .as_deref()
            .filter(|actor| !actor.trim().is_empty())
            .unwrap_or(DEFAULT_AUDIT_ACTOR)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS))
    }

    /// Pool configuration derived from these settings.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size())
            .with_connection_timeout(self.pool_timeout()))
    }
}
