use super::MovieRepository;
use crate::common::error::StoreResult;
use crate::modules::movie::id_allocator::{self, IdProbe};
use crate::modules::movie::model::{dedup_genres, Movie, MovieData, MovieFilter, MoviePatch};
use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Movies kept in process memory, in insertion order.
///
/// Mutations hold the write lock for the whole operation.
#[derive(Clone, Default)]
pub struct InMemoryMovieRepository {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl InMemoryMovieRepository {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: Arc::new(RwLock::new(movies)),
        }
    }

    /// Seeds the store from a JSON array of movies.
    pub async fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read movie seed {}", path.display()))?;
        let movies: Vec<Movie> = serde_json::from_slice(&raw)
            .with_context(|| format!("Failed to parse movie seed {}", path.display()))?;

        info!(count = movies.len(), path = %path.display(), "Loaded in-memory movie seed");
        Ok(Self::new(movies))
    }
}

struct SliceProbe<'a>(&'a [Movie]);

impl IdProbe for SliceProbe<'_> {
    async fn id_exists(&mut self, id: Uuid) -> StoreResult<bool> {
        Ok(self.0.iter().any(|m| m.id == id))
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn list_all(&self, filter: MovieFilter) -> StoreResult<Vec<Movie>> {
        let movies = self.movies.read().await;

        let listed = match filter.genre {
            Some(genre) => movies
                .iter()
                .filter(|m| m.genre.iter().any(|g| g.eq_ignore_ascii_case(&genre)))
                .cloned()
                .collect(),
            None => movies.clone(),
        };

        Ok(listed)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, input: MovieData) -> StoreResult<Movie> {
        let mut movies = self.movies.write().await;
        let id = id_allocator::allocate(&mut SliceProbe(&movies)).await?;

        let movie = Movie {
            id,
            title: input.title,
            director: input.director,
            duration: input.duration,
            year: input.year,
            genre: dedup_genres(input.genre),
            poster: input.poster,
            rate: input.rate,
        };
        movies.push(movie.clone());

        debug!(%id, "Stored movie in memory");
        Ok(movie)
    }

    async fn update(&self, id: Uuid, input: MoviePatch) -> StoreResult<Option<Movie>> {
        let mut movies = self.movies.write().await;
        let Some(movie) = movies.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };

        input.apply(movie);
        Ok(Some(movie.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Movie>> {
        let mut movies = self.movies.write().await;
        let Some(index) = movies.iter().position(|m| m.id == id) else {
            return Ok(None);
        };

        Ok(Some(movies.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn data(title: &str, genre: &[&str]) -> MovieData {
        MovieData {
            title: title.to_string(),
            director: "Villeneuve".to_string(),
            duration: 155,
            year: 2021,
            genre: genre.iter().map(|g| g.to_string()).collect(),
            poster: "http://x/p.jpg".to_string(),
            rate: 5.0,
        }
    }

    fn genre_set(movie: &Movie) -> HashSet<String> {
        movie.genre.iter().cloned().collect()
    }

    #[tokio::test]
    async fn dune_lifecycle() {
        let repo = InMemoryMovieRepository::default();

        let created = repo.create(data("Dune", &["Sci-Fi", "Adventure"])).await.unwrap();
        assert!(!created.id.to_string().is_empty());
        assert_eq!(
            genre_set(&created),
            HashSet::from(["Sci-Fi".to_string(), "Adventure".to_string()])
        );

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(genre_set(&fetched), genre_set(&created));

        let sci_fi = repo
            .list_all(MovieFilter {
                genre: Some("sci-fi".to_string()),
            })
            .await
            .unwrap();
        assert!(sci_fi.iter().any(|m| m.id == created.id));

        let deleted = repo.delete(created.id).await.unwrap().unwrap();
        assert_eq!(deleted, fetched);
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn genre_filter_returns_full_genre_sets() {
        let repo = InMemoryMovieRepository::default();
        let heat = repo.create(data("Heat", &["Action", "Crime"])).await.unwrap();
        repo.create(data("Amelie", &["Comedy"])).await.unwrap();

        let action = repo
            .list_all(MovieFilter {
                genre: Some("ACTION".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(action.len(), 1);
        assert_eq!(action[0].id, heat.id);
        assert_eq!(action[0].genre, vec!["Action".to_string(), "Crime".to_string()]);
    }

    #[tokio::test]
    async fn unknown_genre_filter_is_empty() {
        let repo = InMemoryMovieRepository::default();
        repo.create(data("Heat", &["Action"])).await.unwrap();

        let listed = repo
            .list_all(MovieFilter {
                genre: Some("Nonexistent".to_string()),
            })
            .await
            .unwrap();

        assert!(listed.is_empty());
        assert_eq!(repo.list_all(MovieFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let repo = InMemoryMovieRepository::default();
        let before = repo.create(data("Dune", &["Sci-Fi"])).await.unwrap();

        let after = repo
            .update(
                before.id,
                MoviePatch {
                    title: Some("New".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after.title, "New");
        assert_eq!(
            Movie {
                title: before.title.clone(),
                ..after
            },
            before
        );
    }

    #[tokio::test]
    async fn update_can_reassign_genres() {
        let repo = InMemoryMovieRepository::default();
        let movie = repo.create(data("Dune", &["Sci-Fi"])).await.unwrap();

        let updated = repo
            .update(
                movie.id,
                MoviePatch {
                    genre: Some(vec!["Drama".to_string(), "drama".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.genre, vec!["Drama".to_string()]);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let repo = InMemoryMovieRepository::default();
        repo.create(data("Dune", &["Sci-Fi"])).await.unwrap();
        let unknown = Uuid::new_v4();

        assert!(repo.get_by_id(unknown).await.unwrap().is_none());
        assert!(
            repo.update(unknown, MoviePatch::default())
                .await
                .unwrap()
                .is_none()
        );
        assert!(repo.delete(unknown).await.unwrap().is_none());
        assert_eq!(repo.list_all(MovieFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn seeds_from_json_file() {
        let path = std::env::temp_dir().join(format!("movies-seed-{}.json", Uuid::new_v4()));
        tokio::fs::write(
            &path,
            r#"[{
                "id": "dcdd0fad-a94c-4810-8acc-5f108d3b18c3",
                "title": "The Godfather",
                "director": "Francis Ford Coppola",
                "duration": 175,
                "year": 1972,
                "genre": ["Crime", "Drama"],
                "poster": "https://img.fruugo.com/product/4/49/14441494_max.jpg",
                "rate": 9.2
            }]"#,
        )
        .await
        .unwrap();

        let repo = InMemoryMovieRepository::from_json_file(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        let id = Uuid::parse_str("dcdd0fad-a94c-4810-8acc-5f108d3b18c3").unwrap();
        let movie = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(movie.title, "The Godfather");
    }

    #[tokio::test]
    async fn missing_seed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", Uuid::new_v4()));
        assert!(InMemoryMovieRepository::from_json_file(&path).await.is_err());
    }
}
