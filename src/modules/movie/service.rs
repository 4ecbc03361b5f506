use super::dto::{CreateMovieRequest, MovieQuery, UpdateMovieRequest};
use super::model::{Movie, MovieFilter};
use crate::common::error::StoreResult;
use crate::state::AppState;
use uuid::Uuid;

pub struct MovieService;

impl MovieService {
    pub async fn list_movies(state: AppState, query: MovieQuery) -> StoreResult<Vec<Movie>> {
        // `?genre=` with an empty value lists everything
        let genre = query.genre.filter(|g| !g.trim().is_empty());
        state.movies.list_all(MovieFilter { genre }).await
    }

    pub async fn get_movie(state: AppState, id: Uuid) -> StoreResult<Option<Movie>> {
        state.movies.get_by_id(id).await
    }

    pub async fn create_movie(state: AppState, req: CreateMovieRequest) -> StoreResult<Movie> {
        state.movies.create(req.into()).await
    }

    pub async fn update_movie(
        state: AppState,
        id: Uuid,
        req: UpdateMovieRequest,
    ) -> StoreResult<Option<Movie>> {
        state.movies.update(id, req.into()).await
    }

    pub async fn delete_movie(state: AppState, id: Uuid) -> StoreResult<Option<Movie>> {
        state.movies.delete(id).await
    }
}
