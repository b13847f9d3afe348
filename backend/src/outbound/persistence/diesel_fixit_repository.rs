//! PostgreSQL-backed `FixitRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FixitRepository, FixitRepositoryError};
use crate::domain::{Fixit, FixitFilter, NewFixit};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{FixitRow, FixitUpdate, NewFixitRow};
use super::pool::{DbPool, PoolError};
use super::schema::fixit;

/// Diesel-backed implementation of the fixit repository port.
#[derive(Clone)]
pub struct DieselFixitRepository {
    pool: DbPool,
}

impl DieselFixitRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FixitRepositoryError {
    FixitRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> FixitRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => FixitRepositoryError::connection(message),
        DieselFailure::Query(message) => FixitRepositoryError::query(message),
        DieselFailure::UniqueViolation => FixitRepositoryError::query("unique constraint violated"),
    }
}

/// Convert a row, rejecting statuses the check constraint should have blocked.
fn row_to_fixit(row: FixitRow) -> Result<Fixit, FixitRepositoryError> {
    let status = row.status.parse().map_err(|err| {
        FixitRepositoryError::query(format!("invalid fixit status in database: {err}"))
    })?;
    Ok(Fixit {
        id: row.id,
        vocab_id: row.vocab_id,
        status,
        field_name: row.field_name,
        comments: row.comments,
        created_by: row.created_by,
        created: row.created,
    })
}

#[async_trait]
impl FixitRepository for DieselFixitRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Fixit>, FixitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = fixit::table
            .find(id)
            .select(FixitRow::as_select())
            .first::<FixitRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_fixit).transpose()
    }

    async fn find(&self, filter: &FixitFilter) -> Result<Vec<Fixit>, FixitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = fixit::table
            .select(FixitRow::as_select())
            .filter(fixit::status.eq(filter.status.as_str()))
            .filter(fixit::created.ge(filter.window.start()))
            .filter(fixit::created.le(filter.window.end()))
            .order(fixit::created.desc())
            .into_boxed();

        if let Some(vocab_id) = filter.vocab_id {
            query = query.filter(fixit::vocab_id.eq(vocab_id));
        }

        query
            .limit(filter.limit.get())
            .load::<FixitRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_fixit)
            .collect()
    }

    async fn create(&self, draft: &NewFixit) -> Result<Fixit, FixitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewFixitRow {
            vocab_id: draft.vocab_id,
            status: draft.status.as_str(),
            field_name: &draft.field_name,
            comments: &draft.comments,
            created_by: &draft.created_by,
        };
        let stored = diesel::insert_into(fixit::table)
            .values(&row)
            .returning(FixitRow::as_returning())
            .get_result::<FixitRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_fixit(stored)
    }

    async fn update(&self, entry: &Fixit) -> Result<(), FixitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = FixitUpdate {
            status: entry.status.as_str(),
            field_name: &entry.field_name,
            comments: &entry.comments,
        };
        let updated = diesel::update(fixit::table.find(entry.id))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(FixitRepositoryError::query(format!(
                "fixit {} disappeared before update",
                entry.id
            )));
        }
        Ok(())
    }
}
