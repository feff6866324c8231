//! # Store Handle
//!
//! A `Store` names the SQLite file a set of actors share. It does not hold a connection:
//! each request opens one, does its work, and closes it again.

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Location and connect options of a SQLite database file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Store {
    /// Points at `path`, creating the file on first connect.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        Self { path, options }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a new connection.
    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        debug!(path = %self.path.display(), "Opening store connection");
        self.options.connect().await
    }

    /// Closes a connection, logging instead of failing if the close itself errors.
    pub async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!(path = %self.path.display(), error = %e, "Closing store connection failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.db");
        let store = Store::open(&path);

        let mut conn = store.connect().await.unwrap();
        sqlx::query("CREATE TABLE t (x INTEGER)")
            .execute(&mut conn)
            .await
            .unwrap();
        store.release(conn).await;

        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }
}
