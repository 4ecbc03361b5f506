use super::dto::{CreateMovieRequest, MovieQuery, UpdateMovieRequest};
use super::model::Movie;
use super::service::MovieService;
use crate::common::response::{ApiError, ApiJsonRejection, ApiResponse, ApiSuccess, ApiValidationError};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

const NOT_FOUND: &str = "Movie not found";

/// List movies, optionally filtered by genre
#[utoipa::path(
    get,
    path = "/api/v1/movies",
    params(MovieQuery),
    responses(
        (status = 200, description = "List Movies", body = ApiResponse<Vec<Movie>>),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MovieQuery>,
) -> impl IntoResponse {
    match MovieService::list_movies(state, query).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movies retrieved successfully"), StatusCode::OK).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Get Movie", body = ApiResponse<Movie>),
        (status = 404, description = "Movie Not Found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match MovieService::get_movie(state, id).await {
        Ok(Some(res)) => ApiSuccess(ApiResponse::success(res, "Movie retrieved successfully"), StatusCode::OK).into_response(),
        Ok(None) => ApiError::not_found(NOT_FOUND).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie Created", body = ApiResponse<Movie>),
        (status = 422, description = "Validation Failed"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return ApiJsonRejection(rejection).into_response(),
    };
    if let Err(errors) = req.validate() {
        return ApiValidationError(errors).into_response();
    }

    match MovieService::create_movie(state, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movie created successfully"), StatusCode::CREATED).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie Updated", body = ApiResponse<Movie>),
        (status = 404, description = "Movie Not Found"),
        (status = 422, description = "Validation Failed"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateMovieRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return ApiJsonRejection(rejection).into_response(),
    };
    if let Err(errors) = req.validate() {
        return ApiValidationError(errors).into_response();
    }

    match MovieService::update_movie(state, id, req).await {
        Ok(Some(res)) => ApiSuccess(ApiResponse::success(res, "Movie updated successfully"), StatusCode::OK).into_response(),
        Ok(None) => ApiError::not_found(NOT_FOUND).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = Uuid, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie Deleted", body = ApiResponse<Movie>),
        (status = 404, description = "Movie Not Found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match MovieService::delete_movie(state, id).await {
        Ok(Some(res)) => ApiSuccess(ApiResponse::success(res, "Movie deleted"), StatusCode::OK).into_response(),
        Ok(None) => ApiError::not_found(NOT_FOUND).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}
