use crate::model::school::School;
use crate::model::student::Student;
use serde::{Deserialize, Serialize};

/// A school together with the students resolved for it at request time.
///
/// `students` keeps the order the student storage produced them in and is
/// empty, never missing, for a school without students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolResponse {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub email: String,
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub email: String,
}

impl SchoolResponse {
    pub fn new(school: School, students: Vec<Student>) -> Self {
        SchoolResponse {
            id: school.id,
            name: school.name,
            address: school.address,
            email: school.email,
            students: students.into_iter().map(StudentResponse::from).collect(),
        }
    }
}

impl From<School> for SchoolResponse {
    /// A school with no students attached, as returned right after creation.
    fn from(school: School) -> Self {
        SchoolResponse::new(school, Vec::new())
    }
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        StudentResponse {
            id: student.id,
            school_id: student.school_id,
            name: student.name,
            email: student.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_fields_are_camel_case_on_the_wire() {
        let response = SchoolResponse::new(
            School {
                id: 1,
                name: "Lincoln High".to_string(),
                address: "1 Main St".to_string(),
                email: "a@b.com".to_string(),
            },
            vec![Student {
                id: 7,
                school_id: 1,
                name: "Ada".to_string(),
                email: "ada@b.com".to_string(),
            }],
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["students"][0]["schoolId"], 1);
        assert_eq!(json["students"][0]["id"], 7);
        assert_eq!(json["name"], "Lincoln High");
    }

    #[test]
    fn school_without_students_serializes_an_empty_list() {
        let response = SchoolResponse::from(School {
            id: 3,
            name: "Roosevelt".to_string(),
            address: "2 Side St".to_string(),
            email: "r@b.com".to_string(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["students"], serde_json::json!([]));
    }
}
