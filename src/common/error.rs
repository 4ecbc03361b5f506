use thiserror::Error;
use tracing::error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure of the persistent store behind a movie repository.
///
/// Absence of a movie is never an error; repositories report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store query failed: {context}")]
    Query {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("genre `{0}` is not in the catalog")]
    UnknownGenre(String),

    #[error("could not allocate a unique movie id after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },
}

impl StoreError {
    /// Builds a `map_err` adapter that logs the failed step before wrapping it.
    pub fn query(context: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
        move |source| {
            error!(error = %source, context, "store query failed");
            StoreError::Query { context, source }
        }
    }
}
