use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use crate::migrations::{REQUIRED_TABLE_NAMES, run_pending};
use crate::state::{LedgerHome, map_sqlite_error};
use crate::storage::SqliteStorage;
use crate::store::TransactionStore;
use crate::{ClientError, ClientResult};

/// A migrated ledger: where it lives and the schema it is on.
#[derive(Debug, Clone)]
pub struct SetupContext {
    pub home: PathBuf,
    pub db_path: PathBuf,
    pub schema_version: String,
}

impl SetupContext {
    fn prepare(home_override: Option<&Path>) -> ClientResult<(Self, Connection)> {
        let home = LedgerHome::resolve(home_override)?;
        let db_path = home.db_path();
        let mut connection = home.connect()?;

        run_pending(&mut connection).map_err(|error| map_migration_error(&db_path, &error))?;
        verify_core_tables(&connection, &db_path)?;
        let schema_version = read_schema_version(&connection, &db_path)?;

        tracing::debug!(db_path = %db_path.display(), %schema_version, "ledger ready");
        let context = Self {
            home: home.dir().to_path_buf(),
            db_path,
            schema_version,
        };
        Ok((context, connection))
    }
}

pub fn ensure_initialized_at(home_override: &Path) -> ClientResult<(SetupContext, Connection)> {
    SetupContext::prepare(Some(home_override))
}

/// Prepares the ledger home and hands back a store loaded from it.
pub fn open_store(
    home_override: Option<&Path>,
) -> ClientResult<(SetupContext, TransactionStore<SqliteStorage>)> {
    let (setup, connection) = SetupContext::prepare(home_override)?;
    let storage = SqliteStorage::new(connection, &setup.db_path);
    let store = TransactionStore::load(storage)?;
    Ok((setup, store))
}

fn verify_core_tables(connection: &Connection, db_path: &Path) -> ClientResult<()> {
    for table_name in REQUIRED_TABLE_NAMES {
        let exists = connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![table_name],
                |_| Ok(()),
            )
            .optional()
            .map_err(|error| map_sqlite_error(db_path, &error))?;
        if exists.is_none() {
            return Err(ClientError::migration_failed(
                db_path,
                &format!("required table `{table_name}` is missing after migration"),
            ));
        }
    }
    Ok(())
}

fn read_schema_version(connection: &Connection, db_path: &Path) -> ClientResult<String> {
    let version = connection
        .query_row(
            "SELECT value FROM internal_meta WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    version.ok_or_else(|| ClientError::migration_failed(db_path, "schema_version is missing"))
}

fn map_migration_error(db_path: &Path, error: &rusqlite_migration::Error) -> ClientError {
    match error {
        rusqlite_migration::Error::RusqliteError { query: _, err } => {
            let mapped = map_sqlite_error(db_path, err);
            if matches!(
                mapped.code.as_str(),
                "ledger_locked" | "ledger_corrupt" | "ledger_init_permission_denied"
            ) {
                mapped
            } else {
                ClientError::migration_failed(db_path, &error.to_string())
            }
        }
        _ => ClientError::migration_failed(db_path, &error.to_string()),
    }
}
