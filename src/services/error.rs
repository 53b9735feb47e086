use thiserror::Error;

use crate::database::manager::DatabaseError;

/// Outcomes the service layer surfaces to its callers
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Driver not found: {0}")]
    NotFound(i32),

    #[error("Invalid field '{field}': {message}")]
    Validation { field: &'static str, message: String },

    /// `context` is the generic, caller-safe description; `source` stays internal
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: DatabaseError,
    },
}

impl ProfileError {
    pub fn missing(field: &'static str) -> Self {
        ProfileError::Validation {
            field,
            message: "This field is required".to_string(),
        }
    }

    /// Wrap a storage failure; a dangling driver reference becomes `NotFound`
    pub fn storage(context: &'static str, driver_id: Option<i32>) -> impl FnOnce(DatabaseError) -> Self {
        move |source| match (source, driver_id) {
            (DatabaseError::NotFound(_), Some(id)) => ProfileError::NotFound(id),
            (source, _) => ProfileError::Storage { context, source },
        }
    }
}
