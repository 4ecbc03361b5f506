use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_RATE: f64 = 5.0;

fn default_rate() -> f64 {
    DEFAULT_RATE
}

/// A movie as seen by clients: scalar columns plus resolved genre names.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub director: String,
    pub duration: i32,
    pub year: i32,
    #[serde(default)]
    pub genre: Vec<String>,
    pub poster: String,
    #[serde(default = "default_rate")]
    pub rate: f64,
}

/// A row of the `movie` table, before enrichment with genres.
#[derive(Debug, FromRow, Clone)]
pub struct MovieRow {
    pub id: Uuid,
    pub title: String,
    pub director: String,
    pub duration: i32,
    pub year: i32,
    pub poster: String,
    pub rate: f64,
}

impl MovieRow {
    pub fn with_genres(self, genre: Vec<String>) -> Movie {
        Movie {
            id: self.id,
            title: self.title,
            director: self.director,
            duration: self.duration,
            year: self.year,
            genre,
            poster: self.poster,
            rate: self.rate,
        }
    }
}

/// Validated input for creating a movie.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieData {
    pub title: String,
    pub director: String,
    pub duration: i32,
    pub year: i32,
    pub genre: Vec<String>,
    pub poster: String,
    pub rate: f64,
}

/// Validated partial update. `None` leaves the stored value untouched;
/// `genre: Some(..)` replaces the movie's genre associations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub director: Option<String>,
    pub duration: Option<i32>,
    pub year: Option<i32>,
    pub genre: Option<Vec<String>>,
    pub poster: Option<String>,
    pub rate: Option<f64>,
}

impl MoviePatch {
    pub fn apply(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(director) = self.director {
            movie.director = director;
        }
        if let Some(duration) = self.duration {
            movie.duration = duration;
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(genre) = self.genre {
            movie.genre = dedup_genres(genre);
        }
        if let Some(poster) = self.poster {
            movie.poster = poster;
        }
        if let Some(rate) = self.rate {
            movie.rate = rate;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    pub genre: Option<String>,
}

/// Drops repeated genres (case-insensitive), keeping the first spelling.
pub fn dedup_genres(genres: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        if !unique.iter().any(|g| g.eq_ignore_ascii_case(&genre)) {
            unique.push(genre);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Movie {
        Movie {
            id: Uuid::new_v4(),
            title: "Dune".to_string(),
            director: "Villeneuve".to_string(),
            duration: 155,
            year: 2021,
            genre: vec!["Sci-Fi".to_string(), "Adventure".to_string()],
            poster: "http://x/p.jpg".to_string(),
            rate: 8.0,
        }
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let original = dune();
        let mut movie = original.clone();

        MoviePatch {
            title: Some("Dune: Part One".to_string()),
            ..Default::default()
        }
        .apply(&mut movie);

        assert_eq!(movie.title, "Dune: Part One");
        assert_eq!(
            Movie {
                title: original.title.clone(),
                ..movie
            },
            original
        );
    }

    #[test]
    fn seed_records_without_rate_get_default() {
        let json = r#"{
            "id": "c8a7d63f-3b04-44d3-9d95-8782fd7dcfaf",
            "title": "The Shawshank Redemption",
            "director": "Frank Darabont",
            "duration": 142,
            "year": 1994,
            "genre": ["Drama"],
            "poster": "https://i.ebayimg.com/images/g/4goAAOSwMyBe7hnQ/s-l1200.webp"
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.rate, DEFAULT_RATE);
    }

    #[test]
    fn dedup_keeps_first_spelling() {
        let genres = vec!["Drama".into(), "drama".into(), "Crime".into()];
        assert_eq!(dedup_genres(genres), vec!["Drama".to_string(), "Crime".to_string()]);
    }
}
