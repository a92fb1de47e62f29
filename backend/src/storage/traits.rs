//! Repository traits the aggregation service is written against.

use async_trait::async_trait;
use common::model::school::{NewSchool, School};
use common::model::student::Student;
use futures_util::stream::BoxStream;

use crate::storage::StorageResult;

/// CRUD access to school records.
///
/// Listing methods return lazy streams: no query runs until the stream is
/// first polled, and every call starts a fresh query.
#[async_trait]
pub trait SchoolRepository: Send + Sync + 'static {
    /// All schools in creation order.
    fn find_all(&self) -> BoxStream<'static, StorageResult<School>>;

    /// Schools whose name contains `fragment`, in creation order.
    fn find_all_by_name_containing(&self, fragment: &str)
        -> BoxStream<'static, StorageResult<School>>;

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<School>>;

    /// Stores a new school. `None` means storage accepted the write but did
    /// not hand back an identity.
    async fn insert(&self, draft: NewSchool) -> StorageResult<Option<School>>;

    /// Replaces name, address and email of school `id`. `None` if no such
    /// school exists.
    async fn update(&self, id: i64, draft: NewSchool) -> StorageResult<Option<School>>;

    /// Removes school `id` together with its students. Succeeds whether or
    /// not the school existed.
    async fn delete_by_id(&self, id: i64) -> StorageResult<()>;
}

/// Read access to students by owning school.
pub trait StudentRepository: Send + Sync + 'static {
    /// Students of `school_id` in enrolment order.
    fn find_by_school_id(&self, school_id: i64) -> BoxStream<'static, StorageResult<Student>>;
}
