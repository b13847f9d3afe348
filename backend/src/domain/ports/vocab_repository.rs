//! Port for vocabulary persistence.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{NewVocab, Vocab, VocabFilter};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vocabulary repository adapters.
    pub enum VocabRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "vocab repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "vocab repository query failed: {message}",
        /// The unique index on `learning_lang` rejected an insert.
        DuplicateLearningLang { learning_lang: String } =>
            "vocab with learning lang {learning_lang} already exists",
    }
}

/// Port for reading and writing vocabulary entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VocabRepository: Send + Sync {
    /// Find an entry by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<Vocab>, VocabRepositoryError>;

    /// Find the entry holding `learning_lang`, if any.
    async fn find_by_learning_lang(
        &self,
        learning_lang: &str,
    ) -> Result<Option<Vocab>, VocabRepositoryError>;

    /// List entries matching `filter`.
    async fn find(&self, filter: &VocabFilter) -> Result<Vec<Vocab>, VocabRepositoryError>;

    /// Insert a new entry; storage assigns `id` and `created`.
    async fn create(&self, vocab: &NewVocab) -> Result<Vocab, VocabRepositoryError>;

    /// Persist the mutable fields of an existing entry.
    async fn update(&self, vocab: &Vocab) -> Result<(), VocabRepositoryError>;
}

/// Fixture implementation for tests that do not exercise vocab persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVocabRepository;

#[async_trait]
impl VocabRepository for FixtureVocabRepository {
    async fn find_by_id(&self, _id: i32) -> Result<Option<Vocab>, VocabRepositoryError> {
        Ok(None)
    }

    async fn find_by_learning_lang(
        &self,
        _learning_lang: &str,
    ) -> Result<Option<Vocab>, VocabRepositoryError> {
        Ok(None)
    }

    async fn find(&self, _filter: &VocabFilter) -> Result<Vec<Vocab>, VocabRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, vocab: &NewVocab) -> Result<Vocab, VocabRepositoryError> {
        let content = vocab.content.clone();
        Ok(Vocab {
            id: 1,
            learning_lang: vocab.learning_lang.clone(),
            first_lang: content.first_lang,
            created: Utc::now(),
            alternatives: content.alternatives,
            skill: content.skill,
            infinitive: content.infinitive,
            pos: content.pos,
            hint: content.hint,
            num_learning_words: content.num_learning_words,
            known_lang_code: vocab.known_lang_code.clone(),
            learning_lang_code: vocab.learning_lang_code.clone(),
        })
    }

    async fn update(&self, _vocab: &Vocab) -> Result<(), VocabRepositoryError> {
        Ok(())
    }
}
