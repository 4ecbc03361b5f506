use super::model::{Movie, MovieData, MovieFilter, MoviePatch};
use crate::common::error::StoreResult;
use async_trait::async_trait;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryMovieRepository;
pub use postgres::PgMovieRepository;

/// Storage backend for movies.
///
/// Every operation reports a missing movie as `Ok(None)` and reserves `Err`
/// for store failures, so callers can tell "not found" apart from a write
/// that failed midway.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    /// Lists movies, optionally restricted to one genre (case-insensitive).
    /// Each returned movie carries all of its genres, not only the matched one.
    async fn list_all(&self, filter: MovieFilter) -> StoreResult<Vec<Movie>>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Movie>>;

    /// Allocates an id and stores the movie with its genre associations.
    async fn create(&self, input: MovieData) -> StoreResult<Movie>;

    /// Applies the fields present in `input`; returns `None` if no movie has `id`.
    async fn update(&self, id: Uuid, input: MoviePatch) -> StoreResult<Option<Movie>>;

    /// Removes the movie and its associations, returning what was deleted.
    async fn delete(&self, id: Uuid) -> StoreResult<Option<Movie>>;
}
