//! SQLite-backed storage for medical cases, notifications, and users.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use thiserror::Error;
use triage_core::{CaseRecord, NotificationRecord, UserRecord};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Lock error")]
    Lock,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Username already exists")]
    DuplicateUser,
}

/// SQLite-backed case store.
///
/// All access goes through a single mutex-guarded connection; every public
/// method is a self-contained transaction.
pub struct CaseStore {
    conn: Mutex<Connection>,
}

impl CaseStore {
    /// Opens (or creates) the store at the given database path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Creates an in-memory store (for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS medical_cases (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                case_id TEXT UNIQUE,
                timestamp TEXT NOT NULL,
                is_emergency INTEGER NOT NULL,
                analysis TEXT NOT NULL,
                original_data TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS notifications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                case_id INTEGER NOT NULL,
                timestamp TEXT NOT NULL,
                status TEXT NOT NULL,
                patient_data TEXT NOT NULL,
                FOREIGN KEY (case_id) REFERENCES medical_cases(id)
            );

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_cases_emergency ON medical_cases(is_emergency);
            "#,
        )?;

        Ok(())
    }

    /// Inserts a new case row and returns its sequential id.
    ///
    /// The display `case_id` starts out NULL and is assigned afterwards via
    /// [`CaseStore::assign_case_id`].
    pub fn insert_case(
        &self,
        timestamp: &str,
        is_emergency: bool,
        analysis: &Value,
        original_data: &Value,
    ) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        conn.execute(
            r#"INSERT INTO medical_cases (timestamp, is_emergency, analysis, original_data)
               VALUES (?1, ?2, ?3, ?4)"#,
            params![
                timestamp,
                is_emergency,
                serde_json::to_string(analysis)?,
                serde_json::to_string(original_data)?,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Sets the display case id on an existing row. The one mutation a case
    /// ever sees.
    pub fn assign_case_id(&self, id: i64, case_id: &str) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;
        conn.execute(
            "UPDATE medical_cases SET case_id = ?1 WHERE id = ?2",
            params![case_id, id],
        )?;
        tracing::info!(case_id, "assigned display case id");
        Ok(())
    }

    /// Lists all cases with the given emergency flag, oldest first.
    pub fn list_cases(&self, is_emergency: bool) -> Result<Vec<CaseRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let mut stmt = conn.prepare(
            r#"SELECT id, case_id, timestamp, is_emergency, analysis, original_data
               FROM medical_cases WHERE is_emergency = ?1 ORDER BY id"#,
        )?;

        let rows = stmt.query_map(params![is_emergency], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut cases = Vec::new();
        for row in rows {
            let (id, case_id, timestamp, is_emergency, analysis, original_data) = row?;
            cases.push(CaseRecord {
                id,
                case_id,
                timestamp,
                is_emergency,
                analysis: serde_json::from_str(&analysis)?,
                original_data: serde_json::from_str(&original_data)?,
            });
        }
        Ok(cases)
    }

    /// Lists all notification rows, oldest first.
    pub fn list_notifications(&self) -> Result<Vec<NotificationRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let mut stmt = conn.prepare(
            "SELECT id, case_id, timestamp, status, patient_data FROM notifications ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut notifications = Vec::new();
        for row in rows {
            let (id, case_id, timestamp, status, patient_data) = row?;
            notifications.push(NotificationRecord {
                id,
                case_id,
                timestamp,
                status,
                patient_data: serde_json::from_str(&patient_data)?,
            });
        }
        Ok(notifications)
    }

    /// Creates a user with an already-hashed password.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<i64, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let result = conn.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
            params![username, password_hash],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateUser)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Looks up a user by username.
    pub fn find_user(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Lock)?;

        let user = conn
            .query_row(
                "SELECT id, username, password_hash FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserRecord {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password_hash: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(user)
    }
}
