//! Vocabulary entries and the inputs that create or change them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::audit::{AuditTable, Auditable};
use crate::domain::limit::QueryLimit;
use crate::domain::validation::{
    FieldValidationError, require_non_empty, validate_field_content, validate_language_code,
    validate_minimum,
};

/// Maximum length of `learning_lang`.
pub const MAX_LEARNING_LANG_LEN: usize = 40;
/// Maximum length of `first_lang`.
pub const MAX_FIRST_LANG_LEN: usize = 40;
/// Maximum length of `alternatives`.
pub const MAX_ALTERNATIVES_LEN: usize = 255;
/// Maximum length of `skill`.
pub const MAX_SKILL_LEN: usize = 100;
/// Maximum length of `infinitive`.
pub const MAX_INFINITIVE_LEN: usize = 40;
/// Maximum length of `pos`.
pub const MAX_POS_LEN: usize = 40;
/// Maximum length of `hint`.
pub const MAX_HINT_LEN: usize = 255;
/// Smallest permitted `num_learning_words`.
pub const MIN_LEARNING_WORDS: i32 = 1;

/// Language code assumed for the learner's own language.
pub const DEFAULT_KNOWN_LANG_CODE: &str = "en";
/// Language code assumed for the language being learned.
pub const DEFAULT_LEARNING_LANG_CODE: &str = "es";

/// A stored vocabulary entry.
///
/// ## Invariants
/// - `id` and `created` are assigned by storage and never change.
/// - `learning_lang` is unique across all entries and never changes.
///
/// The serde projection of this type is what audit records store in their
/// `before`/`after` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocab {
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

/// The fields of a [`Vocab`] that an update is allowed to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabContent {
    pub first_lang: String,
    pub alternatives: String,
    pub skill: String,
    pub infinitive: String,
    pub pos: String,
    pub hint: String,
    pub num_learning_words: i32,
}

impl Default for VocabContent {
    fn default() -> Self {
        Self {
            first_lang: String::new(),
            alternatives: String::new(),
            skill: String::new(),
            infinitive: String::new(),
            pos: String::new(),
            hint: String::new(),
            num_learning_words: MIN_LEARNING_WORDS,
        }
    }
}

impl VocabContent {
    /// Validate lengths, markup and the word-count floor.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validate_field_content(&self.first_lang, "first_lang", MAX_FIRST_LANG_LEN)?;
        validate_field_content(&self.alternatives, "alternatives", MAX_ALTERNATIVES_LEN)?;
        validate_field_content(&self.skill, "skill", MAX_SKILL_LEN)?;
        validate_field_content(&self.infinitive, "infinitive", MAX_INFINITIVE_LEN)?;
        validate_field_content(&self.pos, "pos", MAX_POS_LEN)?;
        validate_field_content(&self.hint, "hint", MAX_HINT_LEN)?;
        validate_minimum(
            self.num_learning_words,
            "num_learning_words",
            MIN_LEARNING_WORDS,
        )
    }
}

impl Vocab {
    /// Snapshot of the mutable fields.
    pub fn content(&self) -> VocabContent {
        VocabContent {
            first_lang: self.first_lang.clone(),
            alternatives: self.alternatives.clone(),
            skill: self.skill.clone(),
            infinitive: self.infinitive.clone(),
            pos: self.pos.clone(),
            hint: self.hint.clone(),
            num_learning_words: self.num_learning_words,
        }
    }

    /// Overwrite the mutable fields, leaving identity and timestamps intact.
    pub fn apply_content(&mut self, content: VocabContent) {
        let VocabContent {
            first_lang,
            alternatives,
            skill,
            infinitive,
            pos,
            hint,
            num_learning_words,
        } = content;
        self.first_lang = first_lang;
        self.alternatives = alternatives;
        self.skill = skill;
        self.infinitive = infinitive;
        self.pos = pos;
        self.hint = hint;
        self.num_learning_words = num_learning_words;
    }
}

impl Auditable for Vocab {
    const TABLE: AuditTable = AuditTable::Vocab;

    fn object_id(&self) -> i32 {
        self.id
    }
}

/// Input for creating a vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVocab {
    pub learning_lang: String,
    pub known_lang_code: String,
    pub learning_lang_code: String,
    #[serde(flatten)]
    pub content: VocabContent,
}

impl NewVocab {
    /// Start an entry with default language codes and empty content.
    pub fn new(learning_lang: impl Into<String>) -> Self {
        Self {
            learning_lang: learning_lang.into(),
            known_lang_code: DEFAULT_KNOWN_LANG_CODE.to_owned(),
            learning_lang_code: DEFAULT_LEARNING_LANG_CODE.to_owned(),
            content: VocabContent::default(),
        }
    }

    /// Validate every field of a new entry.
    pub fn validate(&self) -> Result<(), FieldValidationError> {
        validate_field_content(&self.learning_lang, "learning_lang", MAX_LEARNING_LANG_LEN)?;
        require_non_empty(&self.learning_lang, "learning_lang")?;
        self.content.validate()?;
        validate_language_code(&self.known_lang_code, "known_lang_code")?;
        validate_language_code(&self.learning_lang_code, "learning_lang_code")
    }
}

/// Desired state for an existing entry's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabChanges {
    pub id: i32,
    #[serde(flatten)]
    pub content: VocabContent,
}

impl VocabChanges {
    /// Whether applying these changes would alter `current`.
    pub fn differs_from(&self, current: &Vocab) -> bool {
        self.content != current.content()
    }
}

/// Listing filter for vocabulary entries.
///
/// `has_first` selects entries with a non-empty `first_lang` when true and
/// untranslated entries when false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabFilter {
    pub learning_lang_code: String,
    pub has_first: bool,
    pub limit: QueryLimit,
}
