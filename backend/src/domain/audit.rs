//! Audit records and the builder that derives them from entity snapshots.
//!
//! Every successful create or update of an auditable entity produces one
//! audit row. The row keeps the JSON projection of the entity before and
//! after the mutation plus the structural diff between the two, rendered by
//! [`crate::domain::compare_to_string`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::duration::Duration;
use crate::domain::json_diff::compare_to_string;
use crate::domain::limit::QueryLimit;
use crate::domain::validation::validate_field_content;

/// Maximum length of an audit comment, in characters.
pub const MAX_COMMENTS_LEN: usize = 1000;

/// Logical entity type an audit row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditTable {
    Vocab,
    Fixit,
}

impl AuditTable {
    /// Name stored in the `table_name` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vocab => "vocab",
            Self::Fixit => "fixit",
        }
    }
}

impl fmt::Display for AuditTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or supplied table name is not auditable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown audit table: {0}")]
pub struct UnknownAuditTable(pub String);

impl FromStr for AuditTable {
    type Err = UnknownAuditTable;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "vocab" => Ok(Self::Vocab),
            "fixit" => Ok(Self::Fixit),
            other => Err(UnknownAuditTable(other.to_owned())),
        }
    }
}

/// Capability of entities whose mutations are audited.
///
/// The JSON projection is the entity's serde representation, so the same
/// field names appear in `before`, `after` and the diff keys.
pub trait Auditable: Serialize {
    /// Table the audit rows are filed under.
    const TABLE: AuditTable;

    /// Identifier of the audited row.
    fn object_id(&self) -> i32;

    /// JSON projection stored in `before`/`after`.
    fn to_json(&self) -> String {
        // Plain structs with string keys cannot fail to serialise.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// A persisted audit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub id: i32,
    pub object_id: i32,
    pub table_name: AuditTable,
    pub diff: String,
    pub before: String,
    pub after: String,
    pub comments: String,
    pub created_by: String,
    pub created: DateTime<Utc>,
}

/// An audit row ready to be inserted; storage assigns `id` and `created`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAudit {
    pub object_id: i32,
    pub table_name: AuditTable,
    pub diff: String,
    pub before: String,
    pub after: String,
    pub comments: String,
    pub created_by: String,
}

/// Listing filter for audit rows.
///
/// ## Invariants
/// - `object_id` is only set together with `table`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditFilter {
    table: Option<AuditTable>,
    object_id: Option<i32>,
    window: Duration,
    limit: QueryLimit,
}

impl AuditFilter {
    /// Build a filter, rejecting an object id without a table.
    pub fn new(
        table: Option<AuditTable>,
        object_id: Option<i32>,
        window: Duration,
        limit: QueryLimit,
    ) -> Result<Self, DomainError> {
        if table.is_none() && object_id.is_some() {
            return Err(DomainError::invalid_request(
                "objectId requires table name filter",
            ));
        }
        Ok(Self {
            table,
            object_id,
            window,
            limit,
        })
    }

    pub fn table(&self) -> Option<AuditTable> {
        self.table
    }

    pub fn object_id(&self) -> Option<i32> {
        self.object_id
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn limit(&self) -> QueryLimit {
        self.limit
    }
}

/// Assemble an audit row from raw JSON snapshots.
///
/// `diff` is computed only when `before_json` is non-empty; a creation has no
/// prior state and keeps an empty diff.
///
/// # Examples
/// ```
/// use verdure_admin::domain::{build_audit, AuditTable};
///
/// let audit = build_audit(
///     AuditTable::Vocab,
///     4,
///     "updated vocab",
///     "sys",
///     r#"{"hint":"A hint"}"#,
///     r#"{"hint":""}"#,
/// )
/// .unwrap();
/// assert_eq!(audit.diff, r#"[{"key":"'hint'","before":"A hint","after":""}]"#);
/// ```
pub fn build_audit(
    table: AuditTable,
    object_id: i32,
    comments: &str,
    created_by: &str,
    before_json: &str,
    after_json: &str,
) -> Result<NewAudit, DomainError> {
    validate_field_content(comments, "comments", MAX_COMMENTS_LEN)
        .map_err(|err| DomainError::invalid_request(err.to_string()))?;

    let diff = if before_json.is_empty() {
        String::new()
    } else {
        compare_to_string(before_json, after_json)
    };

    Ok(NewAudit {
        object_id,
        table_name: table,
        diff,
        before: before_json.to_owned(),
        after: after_json.to_owned(),
        comments: comments.to_owned(),
        created_by: created_by.to_owned(),
    })
}

/// Assemble an audit row from typed entity snapshots.
///
/// `after` is required. When both snapshots are present they must describe
/// the same row.
pub fn build_entity_audit<T: Auditable>(
    comments: &str,
    created_by: &str,
    before: Option<&T>,
    after: Option<&T>,
) -> Result<NewAudit, DomainError> {
    let table = T::TABLE;
    let Some(after) = after else {
        return Err(DomainError::invalid_request(format!(
            "after value for {table} is required"
        )));
    };

    if let Some(before) = before.filter(|before| before.object_id() != after.object_id()) {
        return Err(DomainError::invalid_request(format!(
            "{table} before id {} and after id {} mismatch",
            before.object_id(),
            after.object_id()
        )));
    }

    let before_json = before.map(Auditable::to_json).unwrap_or_default();
    build_audit(
        table,
        after.object_id(),
        comments,
        created_by,
        &before_json,
        &after.to_json(),
    )
}
