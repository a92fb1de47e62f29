use serde::{Deserialize, Serialize};

/// A school as stored. The identity is assigned by storage, so a `School`
/// value only exists once it has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub email: String,
}

/// The fields of a school before storage has assigned it an identity.
///
/// Used both for creation and for updates, where it replaces the editable
/// fields of an existing school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub email: String,
}

impl NewSchool {
    /// Attaches a storage-assigned identity to the draft.
    pub fn with_id(self, id: i64) -> School {
        School {
            id,
            name: self.name,
            address: self.address,
            email: self.email,
        }
    }
}
