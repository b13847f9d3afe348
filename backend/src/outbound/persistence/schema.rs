//! Diesel table definitions for the `palabras` schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Vocabulary entries. `learning_lang` carries a unique constraint.
    palabras.vocab (id) {
        id -> Int4,
        learning_lang -> Varchar,
        first_lang -> Varchar,
        created -> Timestamptz,
        alternatives -> Varchar,
        skill -> Varchar,
        infinitive -> Varchar,
        pos -> Varchar,
        hint -> Varchar,
        num_learning_words -> Int4,
        known_lang_code -> Varchar,
        learning_lang_code -> Varchar,
    }
}

diesel::table! {
    /// Correction proposals. `status` is checked against the known states.
    palabras.fixit (id) {
        id -> Int4,
        vocab_id -> Int4,
        status -> Varchar,
        field_name -> Varchar,
        comments -> Varchar,
        created_by -> Varchar,
        created -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit log.
    palabras.audit (id) {
        id -> Int4,
        object_id -> Int4,
        table_name -> Varchar,
        diff -> Text,
        before -> Text,
        after -> Text,
        comments -> Varchar,
        created_by -> Varchar,
        created -> Timestamptz,
    }
}
