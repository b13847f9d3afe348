//! PostgreSQL-backed `VocabRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VocabRepository, VocabRepositoryError};
use crate::domain::{NewVocab, Vocab, VocabFilter};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewVocabRow, VocabRow, VocabUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::vocab;

/// Diesel-backed implementation of the vocabulary repository port.
#[derive(Clone)]
pub struct DieselVocabRepository {
    pool: DbPool,
}

impl DieselVocabRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> VocabRepositoryError {
    VocabRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> VocabRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => VocabRepositoryError::connection(message),
        DieselFailure::Query(message) => VocabRepositoryError::query(message),
        DieselFailure::UniqueViolation => VocabRepositoryError::query("unique constraint violated"),
    }
}

/// Insert failures additionally surface the `learning_lang` unique index.
fn map_insert_error(error: diesel::result::Error, learning_lang: &str) -> VocabRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation => {
            VocabRepositoryError::duplicate_learning_lang(learning_lang)
        }
        DieselFailure::Connection(message) => VocabRepositoryError::connection(message),
        DieselFailure::Query(message) => VocabRepositoryError::query(message),
    }
}

impl From<VocabRow> for Vocab {
    fn from(row: VocabRow) -> Self {
        let VocabRow {
            id,
            learning_lang,
            first_lang,
            created,
            alternatives,
            skill,
            infinitive,
            pos,
            hint,
            num_learning_words,
            known_lang_code,
            learning_lang_code,
        } = row;
        Self {
            id,
            learning_lang,
            first_lang,
            created,
            alternatives,
            skill,
            infinitive,
            pos,
            hint,
            num_learning_words,
            known_lang_code,
            learning_lang_code,
        }
    }
}

fn new_row(vocab: &NewVocab) -> NewVocabRow<'_> {
    NewVocabRow {
        learning_lang: &vocab.learning_lang,
        first_lang: &vocab.content.first_lang,
        alternatives: &vocab.content.alternatives,
        skill: &vocab.content.skill,
        infinitive: &vocab.content.infinitive,
        pos: &vocab.content.pos,
        hint: &vocab.content.hint,
        num_learning_words: vocab.content.num_learning_words,
        known_lang_code: &vocab.known_lang_code,
        learning_lang_code: &vocab.learning_lang_code,
    }
}

fn update_row(vocab: &Vocab) -> VocabUpdate<'_> {
    VocabUpdate {
        first_lang: &vocab.first_lang,
        alternatives: &vocab.alternatives,
        skill: &vocab.skill,
        infinitive: &vocab.infinitive,
        pos: &vocab.pos,
        hint: &vocab.hint,
        num_learning_words: vocab.num_learning_words,
    }
}

#[async_trait]
impl VocabRepository for DieselVocabRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Vocab>, VocabRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        vocab::table
            .find(id)
            .select(VocabRow::as_select())
            .first::<VocabRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Vocab::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_learning_lang(
        &self,
        learning_lang: &str,
    ) -> Result<Option<Vocab>, VocabRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        vocab::table
            .filter(vocab::learning_lang.eq(learning_lang))
            .select(VocabRow::as_select())
            .first::<VocabRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Vocab::from))
            .map_err(map_diesel_error)
    }

    async fn find(&self, filter: &VocabFilter) -> Result<Vec<Vocab>, VocabRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = vocab::table
            .select(VocabRow::as_select())
            .filter(vocab::learning_lang_code.eq(filter.learning_lang_code.as_str()))
            .order(vocab::id.asc())
            .into_boxed();

        query = if filter.has_first {
            query.filter(vocab::first_lang.ne(""))
        } else {
            query.filter(vocab::first_lang.eq(""))
        };

        let rows = query
            .limit(filter.limit.get())
            .load::<VocabRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Vocab::from).collect())
    }

    async fn create(&self, draft: &NewVocab) -> Result<Vocab, VocabRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(vocab::table)
            .values(&new_row(draft))
            .returning(VocabRow::as_returning())
            .get_result::<VocabRow>(&mut conn)
            .await
            .map(Vocab::from)
            .map_err(|err| map_insert_error(err, &draft.learning_lang))
    }

    async fn update(&self, entry: &Vocab) -> Result<(), VocabRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(vocab::table.find(entry.id))
            .set(&update_row(entry))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(VocabRepositoryError::query(format!(
                "vocab {} disappeared before update",
                entry.id
            )));
        }
        Ok(())
    }
}
