use crate::model::school::NewSchool;
use serde::Deserialize;

/// Body of `POST /api/schools` and `PUT /api/schools/{id}`.
///
/// Never carries an identity or nested students.
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolRequest {
    pub name: String,
    pub address: String,
    pub email: String,
}

impl From<SchoolRequest> for NewSchool {
    fn from(request: SchoolRequest) -> Self {
        NewSchool {
            name: request.name,
            address: request.address,
            email: request.email,
        }
    }
}

/// Query string of `GET /api/schools`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchoolQuery {
    /// Substring the school name must contain. Empty means no filter.
    pub name: Option<String>,
}

impl SchoolQuery {
    /// Returns the name filter, treating an empty string as absent.
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
