//! Correction proposals raised against a single vocabulary field.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::audit::{AuditTable, Auditable};
use crate::domain::duration::Duration;
use crate::domain::limit::QueryLimit;
use crate::domain::validation::{FieldValidationError, validate_field_content};

/// Maximum length of `field_name`.
pub const MAX_FIELD_NAME_LEN: usize = 40;
/// Maximum length of fixit `comments`.
pub const MAX_FIXIT_COMMENTS_LEN: usize = 2000;

/// Workflow state of a fixit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixitStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl FixitStatus {
    /// Value stored in the `status` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for FixitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string is not one of the known states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fixit status: {0}")]
pub struct UnknownFixitStatus(pub String);

impl FromStr for FixitStatus {
    type Err = UnknownFixitStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownFixitStatus(other.to_owned())),
        }
    }
}

/// A stored fixit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixit {
    pub id: i32,
    pub vocab_id: i32,
    pub status: FixitStatus,
    pub field_name: String,
    pub comments: String,
    pub created_by: String,
    pub created: DateTime<Utc>,
}

impl Fixit {
    /// Overwrite the mutable fields from `changes`.
    pub fn apply(&mut self, changes: FixitChanges) {
        self.status = changes.status;
        self.field_name = changes.field_name;
        self.comments = changes.comments;
    }
}

impl Auditable for Fixit {
    const TABLE: AuditTable = AuditTable::Fixit;

    fn object_id(&self) -> i32 {
        self.id
    }
}

fn validate_text(field_name: &str, comments: &str) -> Result<(), FieldValidationError> {
    validate_field_content(field_name, "field_name", MAX_FIELD_NAME_LEN)?;
    validate_field_content(comments, "comments", MAX_FIXIT_COMMENTS_LEN)
}

/// Input for raising a fixit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFixit {
    pub vocab_id: i32,
    #[serde(default)]
    pub status: FixitStatus,
    pub field_name: String,
    pub comments: String,
    pub created_by: String,
}

impl NewFixit {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validate_text(&self.field_name, &self.comments)
    }
}

/// Desired state for an existing fixit's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixitChanges {
    pub id: i32,
    pub status: FixitStatus,
    pub field_name: String,
    pub comments: String,
}

impl FixitChanges {
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validate_text(&self.field_name, &self.comments)
    }

    /// Whether applying these changes would alter `current`.
    pub fn differs_from(&self, current: &Fixit) -> bool {
        self.status != current.status
            || self.field_name != current.field_name
            || self.comments != current.comments
    }
}

/// Listing filter for fixits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixitFilter {
    pub status: FixitStatus,
    pub vocab_id: Option<i32>,
    pub window: Duration,
    pub limit: QueryLimit,
}
