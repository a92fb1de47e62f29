//! Hand-written repositories for exercising the service and the routes
//! without a database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use common::model::school::{NewSchool, School};
use common::model::student::Student;
use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;

use crate::storage::{SchoolRepository, StorageError, StorageResult, StudentRepository};

/// School storage that never produces a stored school: listings fail on
/// their first item and inserts come back without an identity, or fail
/// outright when `error_on_insert` is set.
pub(crate) struct BrokenSchools {
    pub(crate) error_on_insert: bool,
}

fn unreachable_database() -> StorageError {
    StorageError::ConnectionError {
        message: "unable to open database file".to_string(),
    }
}

#[async_trait]
impl SchoolRepository for BrokenSchools {
    fn find_all(&self) -> BoxStream<'static, StorageResult<School>> {
        stream::iter([Err(unreachable_database())]).boxed()
    }

    fn find_all_by_name_containing(&self, _: &str) -> BoxStream<'static, StorageResult<School>> {
        stream::iter([Err(unreachable_database())]).boxed()
    }

    async fn find_by_id(&self, _: i64) -> StorageResult<Option<School>> {
        Ok(None)
    }

    async fn insert(&self, _: NewSchool) -> StorageResult<Option<School>> {
        if self.error_on_insert {
            Err(StorageError::QueryError {
                message: "disk I/O error".to_string(),
            })
        } else {
            Ok(None)
        }
    }

    async fn update(&self, _: i64, _: NewSchool) -> StorageResult<Option<School>> {
        Ok(None)
    }

    async fn delete_by_id(&self, _: i64) -> StorageResult<()> {
        Ok(())
    }
}

/// Student storage serving canned lists and recording which schools were
/// asked for.
#[derive(Default)]
pub(crate) struct CannedStudents {
    pub(crate) by_school: HashMap<i64, Vec<Student>>,
    pub(crate) requested: Mutex<Vec<i64>>,
}

impl StudentRepository for CannedStudents {
    fn find_by_school_id(&self, school_id: i64) -> BoxStream<'static, StorageResult<Student>> {
        self.requested.lock().unwrap().push(school_id);
        let students = self.by_school.get(&school_id).cloned().unwrap_or_default();
        stream::iter(students.into_iter().map(Ok)).boxed()
    }
}
