//! PostgreSQL-backed `AuditRepository` implementation using Diesel ORM.
//!
//! Rows are only ever inserted; there is no update path.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AuditRepository, AuditRepositoryError};
use crate::domain::{Audit, AuditFilter, NewAudit};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{AuditRow, NewAuditRow};
use super::pool::{DbPool, PoolError};
use super::schema::audit;

/// Diesel-backed implementation of the audit repository port.
#[derive(Clone)]
pub struct DieselAuditRepository {
    pool: DbPool,
}

impl DieselAuditRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AuditRepositoryError {
    AuditRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> AuditRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AuditRepositoryError::connection(message),
        DieselFailure::Query(message) => AuditRepositoryError::query(message),
        DieselFailure::UniqueViolation => AuditRepositoryError::query("unique constraint violated"),
    }
}

fn row_to_audit(row: AuditRow) -> Result<Audit, AuditRepositoryError> {
    let table_name = row.table_name.parse().map_err(|err| {
        AuditRepositoryError::query(format!("invalid audit table in database: {err}"))
    })?;
    Ok(Audit {
        id: row.id,
        object_id: row.object_id,
        table_name,
        diff: row.diff,
        before: row.before,
        after: row.after,
        comments: row.comments,
        created_by: row.created_by,
        created: row.created,
    })
}

#[async_trait]
impl AuditRepository for DieselAuditRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Audit>, AuditRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = audit::table
            .find(id)
            .select(AuditRow::as_select())
            .first::<AuditRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_audit).transpose()
    }

    async fn find(&self, filter: &AuditFilter) -> Result<Vec<Audit>, AuditRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let window = filter.window();
        let mut query = audit::table
            .select(AuditRow::as_select())
            .filter(audit::created.ge(window.start()))
            .filter(audit::created.le(window.end()))
            .order((audit::created.desc(), audit::id.desc()))
            .into_boxed();

        if let Some(table) = filter.table() {
            query = query.filter(audit::table_name.eq(table.as_str()));
        }
        if let Some(object_id) = filter.object_id() {
            query = query.filter(audit::object_id.eq(object_id));
        }

        query
            .limit(filter.limit().get())
            .load::<AuditRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_audit)
            .collect()
    }

    async fn create(&self, record: &NewAudit) -> Result<Audit, AuditRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAuditRow {
            object_id: record.object_id,
            table_name: record.table_name.as_str(),
            diff: &record.diff,
            before: &record.before,
            after: &record.after,
            comments: &record.comments,
            created_by: &record.created_by,
        };
        let stored = diesel::insert_into(audit::table)
            .values(&row)
            .returning(AuditRow::as_returning())
            .get_result::<AuditRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_audit(stored)
    }
}
