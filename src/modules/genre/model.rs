use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Genres a client may attach to a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum GenreName {
    Action,
    Fantasy,
    Adventure,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Terror,
    Crime,
    Drama,
    Thriller,
    Comedy,
    Horror,
}

impl GenreName {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenreName::Action => "Action",
            GenreName::Fantasy => "Fantasy",
            GenreName::Adventure => "Adventure",
            GenreName::SciFi => "Sci-Fi",
            GenreName::Terror => "Terror",
            GenreName::Crime => "Crime",
            GenreName::Drama => "Drama",
            GenreName::Thriller => "Thriller",
            GenreName::Comedy => "Comedy",
            GenreName::Horror => "Horror",
        }
    }
}

impl fmt::Display for GenreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
