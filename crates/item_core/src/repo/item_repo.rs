//! Item repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate item CRUD calls into parameterized SQL.
//! - Map `item` rows back into [`Item`] values.
//!
//! # Invariants
//! - `save` ignores any caller-supplied id; the store assigns it.
//! - `update` on an unknown id is a no-op reporting zero affected rows.
//! - `find_by_id` returns `None` for zero rows and fails hard for more than one.
//! - NULL in any mapped column surfaces as a persistence error.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::{DbError, SqlStore};
use crate::model::item::{Item, ItemId, ItemSearchCond, ItemUpdateDto};
use crate::repo::filter::build_where_clause;
use crate::repo::mapping::{ItemValues, ITEM_TABLE};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying store failure, propagated unchanged.
    Db(DbError),
    /// Point lookup matched more than one row for a primary key.
    Integrity { id: ItemId, rows: usize },
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Integrity { id, rows } => {
                write!(f, "integrity violation: {rows} rows share item id {id}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for item CRUD operations.
pub trait ItemRepository {
    /// Inserts a new item and returns it with the store-assigned id.
    fn save(&self, item: &Item) -> RepoResult<Item>;
    /// Overwrites name, price and quantity of item `id`; returns affected rows.
    fn update(&self, id: ItemId, update: &ItemUpdateDto) -> RepoResult<usize>;
    fn find_by_id(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Lists items matching every present filter. Order is unspecified.
    fn find_all(&self, cond: &ItemSearchCond) -> RepoResult<Vec<Item>>;
}

/// SQLite-backed item repository.
///
/// Borrows the connection, so callers may run it inside their own
/// transaction (`Transaction` derefs to `Connection`).
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `item`
    ///   table does not match the column mapping.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn save(&self, item: &Item) -> RepoResult<Item> {
        let params = ITEM_TABLE.bind_values(&ItemValues::from(item));
        let id = self
            .conn
            .insert_returning_key(&ITEM_TABLE.insert_sql(), &params)?;

        info!("event=item_save module=repo status=ok id={id}");
        Ok(Item {
            id: Some(id),
            ..item.clone()
        })
    }

    fn update(&self, id: ItemId, update: &ItemUpdateDto) -> RepoResult<usize> {
        let mut params = ITEM_TABLE.bind_values(&ItemValues::from(update));
        params.push(Value::Integer(id));

        let affected = self
            .conn
            .execute_update(&ITEM_TABLE.update_by_id_sql(), &params)?;

        info!("event=item_update module=repo status=ok id={id} affected={affected}");
        Ok(affected)
    }

    fn find_by_id(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let found = self
            .conn
            .query_one(
                &ITEM_TABLE.select_by_id_sql(),
                &[Value::Integer(id)],
                map_item_row,
            )
            .map_err(|err| match err {
                DbError::IncorrectResultSize { actual, .. } => {
                    RepoError::Integrity { id, rows: actual }
                }
                other => RepoError::Db(other),
            })?;

        debug!(
            "event=item_find module=repo status=ok id={id} hit={}",
            found.is_some()
        );
        Ok(found)
    }

    fn find_all(&self, cond: &ItemSearchCond) -> RepoResult<Vec<Item>> {
        let started_at = Instant::now();
        let clause = build_where_clause(cond);
        let sql = format!("{}{}", ITEM_TABLE.select_sql(), clause.sql);
        debug!("event=item_list module=repo status=start sql=\"{sql}\"");

        let items = self.conn.query_many(&sql, &clause.params, map_item_row)?;

        info!(
            "event=item_list module=repo status=ok rows={} duration_ms={}",
            items.len(),
            started_at.elapsed().as_millis()
        );
        Ok(items)
    }
}

fn map_item_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: Some(row.get("id")?),
        item_name: row.get("item_name")?,
        price: row.get("price")?,
        quantity: row.get("quantity")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    if actual_version > expected_version {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: actual_version,
            latest_supported: expected_version,
        }
        .into());
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [ITEM_TABLE.table],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(RepoError::MissingRequiredTable(ITEM_TABLE.table));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([ITEM_TABLE.table], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<HashSet<_>>>()?;

    if let Some(column) = ITEM_TABLE
        .all_columns()
        .find(|column| !present.contains(*column))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: ITEM_TABLE.table,
            column,
        });
    }

    Ok(())
}
