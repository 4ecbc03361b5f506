use axum::Router;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod id_allocator;
pub mod model;
pub mod repository;
pub mod service;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movies", get(handler::list_movies).post(handler::create_movie))
        .route(
            "/movies/{id}",
            get(handler::get_movie)
                .patch(handler::update_movie)
                .delete(handler::delete_movie),
        )
}
