//! Where the ledger lives on disk and how it is opened.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Error as SqliteError, ffi::ErrorCode};

use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "POCKETBOOK_HOME";

const DEFAULT_HOME_DIR: &str = ".pocketbook";
const DB_FILE_NAME: &str = "ledger.db";
const BUSY_TIMEOUT: Duration = Duration::from_millis(250);

/// An absolute ledger directory and the database file inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerHome {
    dir: PathBuf,
}

impl LedgerHome {
    /// Picks the directory in order: the explicit override, then
    /// `POCKETBOOK_HOME`, then `~/.pocketbook`. Relative paths are taken
    /// from the working directory.
    pub fn resolve(home_override: Option<&Path>) -> ClientResult<Self> {
        let env_home = std::env::var_os(HOME_ENV_VAR).map(PathBuf::from);
        let chosen = match (home_override, env_home) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(path)) => path,
            (None, None) => home::home_dir()
                .map(|dir| dir.join(DEFAULT_HOME_DIR))
                .ok_or_else(|| {
                    ClientError::ledger_init_failed(
                        Path::new("."),
                        "Could not resolve a home directory for the ledger.",
                    )
                })?,
        };

        let dir = if chosen.is_absolute() {
            chosen
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&chosen))
                .map_err(|error| ClientError::ledger_init_failed(&chosen, &error.to_string()))?
        };
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.join(DB_FILE_NAME)
    }

    /// Creates the directory, owner-only on unix, and opens the database.
    pub fn connect(&self) -> ClientResult<Connection> {
        fs::create_dir_all(&self.dir).map_err(|error| map_io_error(&self.dir, &error))?;
        restrict_to_owner(&self.dir);

        let db_path = self.db_path();
        let connection =
            Connection::open(&db_path).map_err(|error| map_sqlite_error(&db_path, &error))?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .map_err(|error| map_sqlite_error(&db_path, &error))?;
        Ok(connection)
    }
}

fn map_io_error(path: &Path, error: &io::Error) -> ClientError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => {
            ClientError::ledger_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::ledger_init_failed(path, &error.to_string()),
    }
}

pub fn map_sqlite_error(path: &Path, error: &SqliteError) -> ClientError {
    match error.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
            ClientError::ledger_locked(path)
        }
        Some(ErrorCode::NotADatabase) => ClientError::ledger_corrupt(path),
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly) => {
            ClientError::ledger_init_permission_denied(path, &error.to_string())
        }
        _ => ClientError::ledger_init_failed(path, &error.to_string()),
    }
}

#[cfg(unix)]
fn restrict_to_owner(dir: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(error) = fs::set_permissions(dir, fs::Permissions::from_mode(0o700)) {
        tracing::debug!(dir = %dir.display(), %error, "could not restrict ledger directory");
    }
}

#[cfg(not(unix))]
fn restrict_to_owner(_dir: &Path) {}
