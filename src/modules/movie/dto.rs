use super::model::{MovieData, MoviePatch, DEFAULT_RATE};
use crate::modules::genre::model::GenreName;
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

const MIN_YEAR: i32 = 1900;

fn default_rate() -> f64 {
    DEFAULT_RATE
}

fn validate_year(year: i32) -> Result<(), ValidationError> {
    let max = OffsetDateTime::now_utc().year() + 1;
    if (MIN_YEAR..=max).contains(&year) {
        Ok(())
    } else {
        let mut err = ValidationError::new("year");
        err.message = Some(format!("Year must be between {MIN_YEAR} and {max}").into());
        Err(err)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, message = "Movie title is required"))]
    pub title: String,
    pub director: String,
    #[validate(range(min = 30, max = 300))]
    pub duration: i32,
    #[validate(custom(function = "validate_year"))]
    pub year: i32,
    #[serde(default = "default_rate")]
    #[validate(range(min = 0.0, max = 10.0))]
    pub rate: f64,
    #[validate(url(message = "Poster must be a valid URL"))]
    pub poster: String,
    pub genre: Vec<GenreName>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, message = "Movie title is required"))]
    pub title: Option<String>,
    pub director: Option<String>,
    #[validate(range(min = 30, max = 300))]
    pub duration: Option<i32>,
    #[validate(custom(function = "validate_year"))]
    pub year: Option<i32>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub rate: Option<f64>,
    #[validate(url(message = "Poster must be a valid URL"))]
    pub poster: Option<String>,
    pub genre: Option<Vec<GenreName>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieQuery {
    /// Genre name, matched case-insensitively
    pub genre: Option<String>,
}

fn genre_names(genres: Vec<GenreName>) -> Vec<String> {
    genres.into_iter().map(|g| g.to_string()).collect()
}

impl From<CreateMovieRequest> for MovieData {
    fn from(req: CreateMovieRequest) -> Self {
        Self {
            title: req.title,
            director: req.director,
            duration: req.duration,
            year: req.year,
            genre: genre_names(req.genre),
            poster: req.poster,
            rate: req.rate,
        }
    }
}

impl From<UpdateMovieRequest> for MoviePatch {
    fn from(req: UpdateMovieRequest) -> Self {
        Self {
            title: req.title,
            director: req.director,
            duration: req.duration,
            year: req.year,
            genre: req.genre.map(genre_names),
            poster: req.poster,
            rate: req.rate,
        }
    }
}
