//! SQLite implementation of the school and student repositories.
//!
//! Every call opens its own connection on a blocking thread, so no connection
//! is shared between requests. Streams are fed row by row from a blocking
//! producer over a bounded channel; dropping the stream closes the channel
//! and the producer stops at its next row, releasing the connection.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::model::school::{NewSchool, School};
use common::model::student::Student;
use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tokio::sync::mpsc;

use crate::storage::{SchoolRepository, StorageError, StorageResult, StudentRepository};

/// Rows buffered between a blocking query and its consumer.
const ROW_BUFFER: usize = 32;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;
    CREATE TABLE IF NOT EXISTS schools (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        name    TEXT NOT NULL,
        address TEXT NOT NULL,
        email   TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS students (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        school_id INTEGER NOT NULL REFERENCES schools(id) ON DELETE CASCADE,
        name      TEXT NOT NULL,
        email     TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_students_school_id ON students(school_id);
";

/// Schools and students stored in a single SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: Arc<PathBuf>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path` and ensures the
    /// schema exists.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let conn = connect(&path)?;
        conn.execute_batch(SCHEMA)?;
        info!("SQLite storage ready at {}", path.display());
        Ok(Self {
            path: Arc::new(path),
        })
    }

    /// Runs `op` against a fresh connection on the blocking pool.
    async fn with_connection<T, F>(&self, op: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StorageResult<T> + Send + 'static,
    {
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || op(&connect(&path)?)).await?
    }

    /// Lazily streams the rows of `sql`, mapped through `map_row`.
    ///
    /// The query starts on first poll.
    fn query_stream<T, F>(
        &self,
        sql: &'static str,
        params: Vec<Value>,
        map_row: F,
    ) -> BoxStream<'static, StorageResult<T>>
    where
        T: Send + 'static,
        F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        let path = Arc::clone(&self.path);
        stream::once(async move {
            let (tx, rx) = mpsc::channel(ROW_BUFFER);
            tokio::task::spawn_blocking(move || {
                if let Err(err) = send_rows(&path, sql, params, map_row, &tx) {
                    let _ = tx.blocking_send(Err(err));
                }
            });
            stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|item| (item, rx))
            })
        })
        .flatten()
        .boxed()
    }
}

fn connect(path: &Path) -> StorageResult<Connection> {
    let connection_error = |err: rusqlite::Error| StorageError::ConnectionError {
        message: format!("{}: {}", path.display(), err),
    };
    let conn = Connection::open(path).map_err(connection_error)?;
    conn.busy_timeout(BUSY_TIMEOUT).map_err(connection_error)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(connection_error)?;
    Ok(conn)
}

/// Producer side of `query_stream`. Returns early, without error, once the
/// consumer has gone away.
fn send_rows<T, F>(
    path: &Path,
    sql: &str,
    params: Vec<Value>,
    map_row: F,
    tx: &mpsc::Sender<StorageResult<T>>,
) -> StorageResult<()>
where
    F: Fn(&Row<'_>) -> rusqlite::Result<T>,
{
    let conn = connect(path)?;
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params_from_iter(params))?;
    while let Some(row) = rows.next()? {
        if tx.blocking_send(map_row(row).map_err(StorageError::from)).is_err() {
            debug!("stream consumer dropped, abandoning query");
            return Ok(());
        }
    }
    Ok(())
}

fn school_from_row(row: &Row<'_>) -> rusqlite::Result<School> {
    Ok(School {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        email: row.get(3)?,
    })
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        school_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
    })
}

#[async_trait]
impl SchoolRepository for SqliteStore {
    fn find_all(&self) -> BoxStream<'static, StorageResult<School>> {
        self.query_stream(
            "SELECT id, name, address, email FROM schools ORDER BY id",
            Vec::new(),
            school_from_row,
        )
    }

    fn find_all_by_name_containing(
        &self,
        fragment: &str,
    ) -> BoxStream<'static, StorageResult<School>> {
        self.query_stream(
            "SELECT id, name, address, email FROM schools WHERE instr(name, ?1) > 0 ORDER BY id",
            vec![Value::Text(fragment.to_string())],
            school_from_row,
        )
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<School>> {
        self.with_connection(move |conn| {
            let school = conn
                .query_row(
                    "SELECT id, name, address, email FROM schools WHERE id = ?1",
                    params![id],
                    school_from_row,
                )
                .optional()?;
            Ok(school)
        })
        .await
    }

    async fn insert(&self, draft: NewSchool) -> StorageResult<Option<School>> {
        self.with_connection(move |conn| {
            let id: Option<i64> = conn
                .query_row(
                    "INSERT INTO schools (name, address, email) VALUES (?1, ?2, ?3) RETURNING id",
                    params![draft.name, draft.address, draft.email],
                    |row| row.get(0),
                )
                .optional()?;
            debug!("inserted school {:?}", id);
            Ok(id.map(|id| draft.with_id(id)))
        })
        .await
    }

    async fn update(&self, id: i64, draft: NewSchool) -> StorageResult<Option<School>> {
        self.with_connection(move |conn| {
            let school = conn
                .query_row(
                    "UPDATE schools SET name = ?1, address = ?2, email = ?3 WHERE id = ?4 \
                     RETURNING id, name, address, email",
                    params![draft.name, draft.address, draft.email, id],
                    school_from_row,
                )
                .optional()?;
            Ok(school)
        })
        .await
    }

    async fn delete_by_id(&self, id: i64) -> StorageResult<()> {
        self.with_connection(move |conn| {
            let removed = conn.execute("DELETE FROM schools WHERE id = ?1", params![id])?;
            debug!("delete of school {} removed {} row(s)", id, removed);
            Ok(())
        })
        .await
    }
}

impl StudentRepository for SqliteStore {
    fn find_by_school_id(&self, school_id: i64) -> BoxStream<'static, StorageResult<Student>> {
        self.query_stream(
            "SELECT id, school_id, name, email FROM students WHERE school_id = ?1 ORDER BY id",
            vec![Value::Integer(school_id)],
            student_from_row,
        )
    }
}

#[cfg(test)]
impl SqliteStore {
    /// Seeds a student. Enrolment has no route of its own.
    pub(crate) async fn enrol(
        &self,
        draft: common::model::student::NewStudent,
    ) -> StorageResult<Student> {
        self.with_connection(move |conn| {
            let id: i64 = conn.query_row(
                "INSERT INTO students (school_id, name, email) VALUES (?1, ?2, ?3) RETURNING id",
                params![draft.school_id, draft.name, draft.email],
                |row| row.get(0),
            )?;
            Ok(Student {
                id,
                school_id: draft.school_id,
                name: draft.name,
                email: draft.email,
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::student::NewStudent;
    use futures_util::TryStreamExt;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(dir.path().join("schools.sqlite")).unwrap();
        (dir, store)
    }

    fn draft(name: &str) -> NewSchool {
        NewSchool {
            name: name.to_string(),
            address: "1 Main St".to_string(),
            email: "office@school.test".to_string(),
        }
    }

    fn student(school_id: i64, name: &str) -> NewStudent {
        NewStudent {
            school_id,
            name: name.to_string(),
            email: format!("{}@school.test", name.to_lowercase()),
        }
    }

    #[actix_web::test]
    async fn insert_assigns_identity_and_find_by_id_returns_it() {
        let (_dir, store) = test_store();

        let created = store.insert(draft("Lincoln High")).await.unwrap().unwrap();
        let found = store.find_by_id(created.id).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[actix_web::test]
    async fn find_all_lists_in_creation_order() {
        let (_dir, store) = test_store();
        for name in ["Alpha", "Beta", "Gamma"] {
            store.insert(draft(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .find_all()
            .map_ok(|school| school.name)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[actix_web::test]
    async fn name_filter_is_a_case_sensitive_substring_match() {
        let (_dir, store) = test_store();
        for name in ["Lincoln High", "Berlin Academy", "lincoln prep", "Oak Ridge"] {
            store.insert(draft(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .find_all_by_name_containing("lin")
            .map_ok(|school| school.name)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(names, vec!["Berlin Academy", "lincoln prep"]);
    }

    #[actix_web::test]
    async fn update_of_missing_school_returns_none() {
        let (_dir, store) = test_store();

        let updated = store.update(42, draft("Ghost")).await.unwrap();

        assert_eq!(updated, None);
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn deleted_ids_are_not_reused() {
        let (_dir, store) = test_store();
        let first = store.insert(draft("First")).await.unwrap().unwrap();
        store.delete_by_id(first.id).await.unwrap();

        let second = store.insert(draft("Second")).await.unwrap().unwrap();

        assert_ne!(first.id, second.id);
    }

    #[actix_web::test]
    async fn delete_cascades_to_students() {
        let (_dir, store) = test_store();
        let school = store.insert(draft("Lincoln High")).await.unwrap().unwrap();
        store.enrol(student(school.id, "Ada")).await.unwrap();

        store.delete_by_id(school.id).await.unwrap();

        let remaining: Vec<Student> = store
            .find_by_school_id(school.id)
            .try_collect()
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }

    #[actix_web::test]
    async fn students_stream_in_enrolment_order() {
        let (_dir, store) = test_store();
        let school = store.insert(draft("Lincoln High")).await.unwrap().unwrap();
        let other = store.insert(draft("Oak Ridge")).await.unwrap().unwrap();
        for (school_id, name) in [(school.id, "Zoe"), (other.id, "Max"), (school.id, "Ada")] {
            store.enrol(student(school_id, name)).await.unwrap();
        }

        let names: Vec<String> = store
            .find_by_school_id(school.id)
            .map_ok(|student| student.name)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(names, vec!["Zoe", "Ada"]);
    }

    #[actix_web::test]
    async fn student_for_unknown_school_is_rejected() {
        let (_dir, store) = test_store();

        let result = store.enrol(student(99, "Orphan")).await;

        assert!(matches!(result, Err(StorageError::QueryError { .. })));
    }

    #[actix_web::test]
    async fn dropping_a_stream_early_releases_the_database() {
        let (_dir, store) = test_store();
        for i in 0..(ROW_BUFFER * 3) {
            store.insert(draft(&format!("School {}", i))).await.unwrap();
        }

        let mut schools = store.find_all();
        let first = schools.next().await.unwrap().unwrap();
        drop(schools);

        store.delete_by_id(first.id).await.unwrap();
        assert_eq!(store.find_by_id(first.id).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn each_call_restarts_the_query() {
        let (_dir, store) = test_store();
        store.insert(draft("Only")).await.unwrap();

        let first: Vec<School> = store.find_all().try_collect().await.unwrap();
        let second: Vec<School> = store.find_all().try_collect().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
