//! Request-time composition of schools with their students.
//!
//! `SchoolService` is the only place that knows a school response needs a
//! second, dependent fetch. Listing streams schools from storage and, for
//! each one in turn, drains that school's student stream before yielding the
//! pair, so every element handed downstream is complete.

mod error;


use std::sync::Arc;

use common::model::school::{NewSchool, School};
use common::model::student::Student;
use common::responses::SchoolResponse;
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};
use log::debug;

use crate::storage::{SchoolRepository, StudentRepository};

pub use error::{ServiceError, ServiceResult};

/// A school and the students resolved for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolAggregate {
    pub school: School,
    pub students: Vec<Student>,
}

impl From<SchoolAggregate> for SchoolResponse {
    fn from(aggregate: SchoolAggregate) -> Self {
        SchoolResponse::new(aggregate.school, aggregate.students)
    }
}

#[derive(Clone)]
pub struct SchoolService {
    schools: Arc<dyn SchoolRepository>,
    students: Arc<dyn StudentRepository>,
}

impl SchoolService {
    pub fn new(schools: Arc<dyn SchoolRepository>, students: Arc<dyn StudentRepository>) -> Self {
        Self { schools, students }
    }

    /// Lazily lists schools with their students.
    ///
    /// A present, non-empty `name_filter` restricts the listing to schools
    /// whose name contains it. Elements are resolved one after another in
    /// storage order.
    pub fn list_schools(
        &self,
        name_filter: Option<&str>,
    ) -> BoxStream<'static, ServiceResult<SchoolAggregate>> {
        let schools = match name_filter.filter(|fragment| !fragment.is_empty()) {
            Some(fragment) => {
                debug!("listing schools with name containing {:?}", fragment);
                self.schools.find_all_by_name_containing(fragment)
            }
            None => {
                debug!("listing all schools");
                self.schools.find_all()
            }
        };

        let service = self.clone();
        schools
            .map_err(ServiceError::from)
            .and_then(move |school| {
                let service = service.clone();
                async move { service.aggregate(school).await }
            })
            .boxed()
    }

    /// Persists `draft` and returns it with its storage-assigned identity.
    pub async fn create_school(&self, draft: NewSchool) -> ServiceResult<School> {
        match self.schools.insert(draft).await {
            Ok(Some(school)) => {
                debug!("created school {}", school.id);
                Ok(school)
            }
            Ok(None) => Err(ServiceError::PersistenceFailure { source: None }),
            Err(err) => Err(ServiceError::PersistenceFailure { source: Some(err) }),
        }
    }

    pub async fn get_school_by_id(&self, id: i64) -> ServiceResult<Option<School>> {
        Ok(self.schools.find_by_id(id).await?)
    }

    /// Replaces the editable fields of school `id`. Students are untouched.
    /// Returns `None` when there is no such school.
    pub async fn update_school(&self, id: i64, draft: NewSchool) -> ServiceResult<Option<School>> {
        let updated = self.schools.update(id, draft).await?;
        debug!("update of school {} found={}", id, updated.is_some());
        Ok(updated)
    }

    /// Removes school `id`. Deleting an unknown id is not an error.
    pub async fn delete_school_by_id(&self, id: i64) -> ServiceResult<()> {
        self.schools.delete_by_id(id).await?;
        debug!("deleted school {}", id);
        Ok(())
    }

    /// Drains the student stream of `school` into a list, keeping storage
    /// order.
    pub async fn get_school_students(&self, school: &School) -> ServiceResult<Vec<Student>> {
        let students = self
            .students
            .find_by_school_id(school.id)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(students)
    }

    /// Pairs `school` with its fully resolved students.
    pub async fn aggregate(&self, school: School) -> ServiceResult<SchoolAggregate> {
        let students = self.get_school_students(&school).await?;
        Ok(SchoolAggregate { school, students })
    }
}
