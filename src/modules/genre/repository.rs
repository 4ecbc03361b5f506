use crate::common::error::{StoreError, StoreResult};
use sqlx::PgExecutor;
use std::collections::HashMap;
use uuid::Uuid;

/// Read access to the `genre` catalog and the `movie_genres` join table.
pub struct GenreRepository;

impl GenreRepository {
    /// Case-insensitive lookup of a catalog id by genre name.
    pub async fn resolve_genre_id<'e>(
        executor: impl PgExecutor<'e>,
        name: &str,
    ) -> StoreResult<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM genre WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(executor)
            .await
            .map_err(StoreError::query("resolve genre id"))?;

        Ok(id)
    }

    /// Maps each movie id to its genre names, ordered by name.
    ///
    /// Movies without associations have no entry in the map.
    pub async fn resolve_genre_names<'e>(
        executor: impl PgExecutor<'e>,
        movie_ids: &[Uuid],
    ) -> StoreResult<HashMap<Uuid, Vec<String>>> {
        if movie_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT mg.movie_id, g.name
            FROM movie_genres mg
            JOIN genre g ON g.id = mg.genre_id
            WHERE mg.movie_id = ANY($1)
            ORDER BY g.name ASC
            "#,
        )
        .bind(movie_ids)
        .fetch_all(executor)
        .await
        .map_err(StoreError::query("resolve genre names"))?;

        let mut names: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (movie_id, name) in rows {
            names.entry(movie_id).or_default().push(name);
        }

        Ok(names)
    }
}
