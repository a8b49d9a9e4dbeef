use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("profile does not exist")]
    ProfileNotFound,

    #[error("profile already exists")]
    ProfileAlreadyExists,

    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StorageError {
    /// Wrap a driver error with the operation that produced it.
    pub(crate) fn database(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Database { context, source }
    }
}
