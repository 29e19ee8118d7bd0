//! Schema versioning for the formcraft database.
//!
//! Each [`Migration`] lists the statements that bring the schema to its
//! version. Pending steps run in order, each in its own transaction, and the
//! version reached is recorded in `metadata` together with the step.

use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::error::{Error, Result};

use super::schema::{CREATE_METADATA_TABLE, SCHEMA_STATEMENTS};

/// The schema version this build writes.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// One step of schema history.
#[derive(Debug)]
struct Migration {
    version: i32,
    statements: &'static [&'static str],
}

/// Every step, oldest first.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    statements: SCHEMA_STATEMENTS,
}];

/// Bring the schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if a statement fails, the stored version is unreadable,
/// or the database was written by a newer build.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_METADATA_TABLE)?;

    let from = schema_version(conn)?;
    if from > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {from} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > from) {
        apply(conn, migration)?;
    }
    Ok(())
}

/// Returns 0 for a fresh database.
fn schema_version(conn: &Connection) -> Result<i32> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
    }
}

fn apply(conn: &Connection, migration: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for statement in migration.statements {
        tx.execute_batch(statement)?;
    }
    tx.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, migration.version.to_string()),
    )?;
    tx.commit()?;
    debug!(version = migration.version, "Applied schema migration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_db() -> Connection {
        Connection::open_in_memory().expect("failed to create in-memory database")
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    fn set_version(conn: &Connection, value: &str) {
        conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            (VERSION_KEY, value),
        )
        .unwrap();
    }

    #[test]
    fn test_fresh_database_gets_every_table() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();

        assert!(table_exists(&conn, "kv"));
        assert!(table_exists(&conn, "metadata"));
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_reopening_changes_nothing() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();
        conn.execute("INSERT INTO kv (key, value) VALUES ('k', 'v')", [])
            .unwrap();

        initialize_schema(&conn).unwrap();
        let value: String = conn
            .query_row("SELECT value FROM kv WHERE key = 'k'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(value, "v");
    }

    #[test]
    fn test_history_is_ordered_and_ends_at_current() {
        assert!(MIGRATIONS.windows(2).all(|w| w[0].version < w[1].version));
        assert_eq!(MIGRATIONS.last().map(|m| m.version), Some(CURRENT_VERSION));
    }

    #[test]
    fn test_unreadable_version_is_rejected() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();
        set_version(&conn, "abc");

        let err = initialize_schema(&conn).unwrap_err();
        assert!(err.to_string().contains("invalid schema version"));
    }

    #[test]
    fn test_newer_database_is_rejected() {
        let conn = create_test_db();
        initialize_schema(&conn).unwrap();
        set_version(&conn, "99");

        let err = initialize_schema(&conn).unwrap_err();
        assert!(matches!(err, Error::DatabaseMigration { .. }));
        assert!(err.to_string().contains("newer than supported"));
    }
}
