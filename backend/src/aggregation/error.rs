use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage could not persist a new school or did not assign it an
    /// identity.
    #[error("school could not be persisted")]
    PersistenceFailure {
        #[source]
        source: Option<StorageError>,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
