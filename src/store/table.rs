use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnection, SqlitePool, SqliteRow};
use sqlx::{Executor, FromRow, Sqlite};
use tracing::{debug, instrument, warn};

use super::errors::StoreError;

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A row type stored in a [`Table`].
///
/// The column layout is declared once per type: [`Record::KEY`] names the primary key column,
/// [`Record::COLUMNS`] the remaining columns, and [`Record::bind_columns`] binds the values for
/// exactly those columns, in that order. Reading goes through [`FromRow`], which must accept the
/// key column followed by [`Record::COLUMNS`].
pub trait Record: for<'r> FromRow<'r, SqliteRow> + fmt::Debug + Send + Unpin {
    const KEY: &'static str;
    const COLUMNS: &'static [&'static str];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

/// SQL generated from a record's column layout.
#[derive(Debug)]
struct Statements {
    table: &'static str,
    select_one: String,
    select_all: String,
    insert: String,
    update: String,
    delete_one: String,
    delete_all: String,
}

impl Statements {
    fn new<R: Record>(table: &'static str) -> Self {
        let key = R::KEY;
        let columns = R::COLUMNS;

        let select_list = std::iter::once(key)
            .chain(columns.iter().copied())
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; columns.len() + 1].join(", ");
        let assignments = columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            table,
            select_one: format!("SELECT {select_list} FROM {table} WHERE {key} = ?"),
            select_all: format!("SELECT {select_list} FROM {table}"),
            insert: format!("INSERT INTO {table} ({select_list}) VALUES ({placeholders})"),
            update: format!("UPDATE {table} SET {assignments} WHERE {key} = ?"),
            delete_one: format!("DELETE FROM {table} WHERE {key} = ?"),
            delete_all: format!("DELETE FROM {table}"),
        }
    }
}

/// Primary key based access to a single database table.
///
/// Operations run against the pool. [`Table::with_tx`] binds the same operations to an open
/// transaction instead.
pub struct Table<R> {
    pool: SqlitePool,
    statements: Arc<Statements>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            statements: Arc::clone(&self.statements),
            _record: PhantomData,
        }
    }
}

impl<R> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("table", &self.statements.table)
            .finish()
    }
}

impl<R: Record> Table<R> {
    pub fn new(pool: SqlitePool, table: &'static str) -> Self {
        Self {
            pool,
            statements: Arc::new(Statements::new::<R>(table)),
            _record: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.statements.table
    }

    /// Binds this table to `conn`, usually a transaction (`&mut *tx`).
    pub fn with_tx<'t>(&self, conn: &'t mut SqliteConnection) -> TxTable<'t, R> {
        TxTable {
            conn,
            statements: Arc::clone(&self.statements),
            _record: PhantomData,
        }
    }

    pub async fn get(&self, id: &str) -> Result<R, StoreError> {
        get(&self.pool, &self.statements, id).await
    }

    pub async fn get_all(&self) -> Result<Vec<R>, StoreError> {
        get_all(&self.pool, &self.statements).await
    }

    pub async fn create(&self, id: &str, record: &R) -> Result<(), StoreError> {
        create(&self.pool, &self.statements, id, record).await
    }

    pub async fn update(&self, id: &str, record: &R) -> Result<(), StoreError> {
        update(&self.pool, &self.statements, id, record).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        delete(&self.pool, &self.statements, id).await
    }

    pub async fn delete_all(&self) -> Result<u64, StoreError> {
        delete_all(&self.pool, &self.statements).await
    }
}

/// A [`Table`] bound to a single connection or transaction.
pub struct TxTable<'t, R> {
    conn: &'t mut SqliteConnection,
    statements: Arc<Statements>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> TxTable<'_, R> {
    pub fn name(&self) -> &'static str {
        self.statements.table
    }

    pub async fn get(&mut self, id: &str) -> Result<R, StoreError> {
        get(&mut *self.conn, &self.statements, id).await
    }

    pub async fn get_all(&mut self) -> Result<Vec<R>, StoreError> {
        get_all(&mut *self.conn, &self.statements).await
    }

    pub async fn create(&mut self, id: &str, record: &R) -> Result<(), StoreError> {
        create(&mut *self.conn, &self.statements, id, record).await
    }

    pub async fn update(&mut self, id: &str, record: &R) -> Result<(), StoreError> {
        update(&mut *self.conn, &self.statements, id, record).await
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        delete(&mut *self.conn, &self.statements, id).await
    }

    pub async fn delete_all(&mut self) -> Result<u64, StoreError> {
        delete_all(&mut *self.conn, &self.statements).await
    }
}

#[instrument(skip(executor, statements), fields(table = statements.table))]
async fn get<'c, E, R>(executor: E, statements: &Statements, id: &str) -> Result<R, StoreError>
where
    E: Executor<'c, Database = Sqlite>,
    R: Record,
{
    debug!("Getting entity");

    let row = sqlx::query_as::<_, R>(&statements.select_one)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            warn!(stmt = %statements.select_one, error = %e, "Get failed");
            StoreError::Database(e)
        })?;

    match row {
        Some(record) => {
            debug!(?record, "Get complete");
            Ok(record)
        }
        None => {
            debug!("Entity not found");
            Err(StoreError::NotFound {
                table: statements.table,
                id: id.to_string(),
            })
        }
    }
}

#[instrument(skip(executor, statements), fields(table = statements.table))]
async fn get_all<'c, E, R>(executor: E, statements: &Statements) -> Result<Vec<R>, StoreError>
where
    E: Executor<'c, Database = Sqlite>,
    R: Record,
{
    debug!("Getting all entities");

    let records = sqlx::query_as::<_, R>(&statements.select_all)
        .fetch_all(executor)
        .await
        .map_err(|e| {
            warn!(stmt = %statements.select_all, error = %e, "Get all failed");
            StoreError::Database(e)
        })?;

    debug!(entities = records.len(), "Get all complete");
    Ok(records)
}

#[instrument(skip(executor, statements, record), fields(table = statements.table))]
async fn create<'c, E, R>(
    executor: E,
    statements: &Statements,
    id: &str,
    record: &R,
) -> Result<(), StoreError>
where
    E: Executor<'c, Database = Sqlite>,
    R: Record,
{
    debug!(?record, "Creating entity");

    let query = sqlx::query(&statements.insert).bind(id);
    record
        .bind_columns(query)
        .execute(executor)
        .await
        .map_err(|e| {
            warn!(stmt = %statements.insert, error = %e, "Create failed");
            StoreError::from_insert(e, statements.table, id)
        })?;

    debug!("Create complete");
    Ok(())
}

#[instrument(skip(executor, statements, record), fields(table = statements.table))]
async fn update<'c, E, R>(
    executor: E,
    statements: &Statements,
    id: &str,
    record: &R,
) -> Result<(), StoreError>
where
    E: Executor<'c, Database = Sqlite>,
    R: Record,
{
    debug!(?record, "Updating entity");

    let query = record.bind_columns(sqlx::query(&statements.update));
    let result = query.bind(id).execute(executor).await.map_err(|e| {
        warn!(stmt = %statements.update, error = %e, "Update failed");
        StoreError::Database(e)
    })?;

    if result.rows_affected() == 0 {
        warn!("Update failed, no rows affected");
        return Err(StoreError::NotFound {
            table: statements.table,
            id: id.to_string(),
        });
    }

    debug!("Update complete");
    Ok(())
}

#[instrument(skip(executor, statements), fields(table = statements.table))]
async fn delete<'c, E>(executor: E, statements: &Statements, id: &str) -> Result<(), StoreError>
where
    E: Executor<'c, Database = Sqlite>,
{
    debug!("Deleting entity");

    sqlx::query(&statements.delete_one)
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            warn!(stmt = %statements.delete_one, error = %e, "Delete failed");
            StoreError::Database(e)
        })?;

    debug!("Delete complete");
    Ok(())
}

/// Removes every row and returns how many were deleted.
#[instrument(skip(executor, statements), fields(table = statements.table))]
async fn delete_all<'c, E>(executor: E, statements: &Statements) -> Result<u64, StoreError>
where
    E: Executor<'c, Database = Sqlite>,
{
    debug!("Deleting all entities");

    let result = sqlx::query(&statements.delete_all)
        .execute(executor)
        .await
        .map_err(|e| {
            warn!(stmt = %statements.delete_all, error = %e, "Delete all failed");
            StoreError::Database(e)
        })?;

    debug!(deleted = result.rows_affected(), "Delete all complete");
    Ok(result.rows_affected())
}
