//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! to and from domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{audit, fixit, vocab};

/// Row struct for reading from the vocab table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vocab)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VocabRow {
    pub id: i32,
    pub learning_lang: String,
    pub first_lang: String,
    pub created: DateTime<Utc>,
    pub alternatives: String,
    pub skill: String,
    pub infinitive: String,
    pub pos: String,
    pub hint: String,
    pub num_learning_words: i32,
    pub known_lang_code: String,
    pub learning_lang_code: String,
}

/// Insertable struct for new vocab rows; `id` and `created` use defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = vocab)]
pub(crate) struct NewVocabRow<'a> {
    pub learning_lang: &'a str,
    pub first_lang: &'a str,
    pub alternatives: &'a str,
    pub skill: &'a str,
    pub infinitive: &'a str,
    pub pos: &'a str,
    pub hint: &'a str,
    pub num_learning_words: i32,
    pub known_lang_code: &'a str,
    pub learning_lang_code: &'a str,
}

/// Changeset over the mutable vocab columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = vocab)]
pub(crate) struct VocabUpdate<'a> {
    pub first_lang: &'a str,
    pub alternatives: &'a str,
    pub skill: &'a str,
    pub infinitive: &'a str,
    pub pos: &'a str,
    pub hint: &'a str,
    pub num_learning_words: i32,
}

// ---------------------------------------------------------------------------
// Fixit models
// ---------------------------------------------------------------------------

/// Row struct for reading from the fixit table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = fixit)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FixitRow {
    pub id: i32,
    pub vocab_id: i32,
    pub status: String,
    pub field_name: String,
    pub comments: String,
    pub created_by: String,
    pub created: DateTime<Utc>,
}

/// Insertable struct for new fixit rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = fixit)]
pub(crate) struct NewFixitRow<'a> {
    pub vocab_id: i32,
    pub status: &'a str,
    pub field_name: &'a str,
    pub comments: &'a str,
    pub created_by: &'a str,
}

/// Changeset over the mutable fixit columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = fixit)]
pub(crate) struct FixitUpdate<'a> {
    pub status: &'a str,
    pub field_name: &'a str,
    pub comments: &'a str,
}

// ---------------------------------------------------------------------------
// Audit models
// ---------------------------------------------------------------------------

/// Row struct for reading from the audit table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AuditRow {
    pub id: i32,
    pub object_id: i32,
    pub table_name: String,
    pub diff: String,
    pub before: String,
    pub after: String,
    pub comments: String,
    pub created_by: String,
    pub created: DateTime<Utc>,
}

/// Insertable struct for new audit rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit)]
pub(crate) struct NewAuditRow<'a> {
    pub object_id: i32,
    pub table_name: &'a str,
    pub diff: &'a str,
    pub before: &'a str,
    pub after: &'a str,
    pub comments: &'a str,
    pub created_by: &'a str,
}
