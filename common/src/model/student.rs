use serde::{Deserialize, Serialize};

/// A student enrolled in a school.
///
/// `school_id` is a lookup key into the schools table, not an owned school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub school_id: i64,
    pub name: String,
    pub email: String,
}
