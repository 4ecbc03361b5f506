use super::MovieRepository;
use crate::common::error::{StoreError, StoreResult};
use crate::modules::genre::repository::GenreRepository;
use crate::modules::movie::id_allocator::{self, IdProbe};
use crate::modules::movie::model::{
    dedup_genres, Movie, MovieData, MovieFilter, MoviePatch, MovieRow,
};
use async_trait::async_trait;
use sqlx::{PgConnection, PgExecutor, PgPool};
use tracing::{debug, error, info};
use uuid::Uuid;

const MOVIE_COLUMNS: &str = "id, title, director, duration, year, poster, rate";

/// Movies stored across the `movie`, `genre` and `movie_genres` tables.
///
/// Create, update and delete each run in a single transaction; an early
/// return drops the transaction, which rolls it back.
#[derive(Clone)]
pub struct PgMovieRepository {
    pool: PgPool,
}

impl PgMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn enrich<'e>(executor: impl PgExecutor<'e>, rows: Vec<MovieRow>) -> StoreResult<Vec<Movie>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut names = GenreRepository::resolve_genre_names(executor, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let genre = names.remove(&row.id).unwrap_or_default();
                row.with_genres(genre)
            })
            .collect())
    }

    async fn enrich_one(conn: &mut PgConnection, row: MovieRow) -> StoreResult<Movie> {
        let mut movies = Self::enrich(conn, vec![row]).await?;
        // enrich maps rows one to one
        Ok(movies.remove(0))
    }

    async fn link_genres(conn: &mut PgConnection, movie_id: Uuid, genres: Vec<String>) -> StoreResult<()> {
        for name in dedup_genres(genres) {
            let genre_id = GenreRepository::resolve_genre_id(&mut *conn, &name)
                .await?
                .ok_or_else(|| {
                    error!(genre = %name, %movie_id, "genre missing from catalog");
                    StoreError::UnknownGenre(name.clone())
                })?;

            sqlx::query(
                r#"
                INSERT INTO movie_genres (movie_id, genre_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(movie_id)
            .bind(genre_id)
            .execute(&mut *conn)
            .await
            .map_err(StoreError::query("link movie genre"))?;
        }

        Ok(())
    }

    async fn find_row(conn: &mut PgConnection, id: Uuid) -> StoreResult<Option<MovieRow>> {
        sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movie WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(StoreError::query("lock movie"))
    }
}

struct PgIdProbe<'a>(&'a mut PgConnection);

impl IdProbe for PgIdProbe<'_> {
    async fn id_exists(&mut self, id: Uuid) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM movie WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.0)
            .await
            .map_err(StoreError::query("probe movie id"))
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn list_all(&self, filter: MovieFilter) -> StoreResult<Vec<Movie>> {
        let rows = match filter.genre {
            Some(name) => {
                let Some(genre_id) = GenreRepository::resolve_genre_id(&self.pool, &name).await? else {
                    debug!(genre = %name, "No catalog genre matches filter");
                    return Ok(Vec::new());
                };

                sqlx::query_as::<_, MovieRow>(
                    r#"
                    SELECT m.id, m.title, m.director, m.duration, m.year, m.poster, m.rate
                    FROM movie m
                    JOIN movie_genres mg ON mg.movie_id = m.id
                    WHERE mg.genre_id = $1
                    ORDER BY m.title ASC, m.id ASC
                    "#,
                )
                .bind(genre_id)
                .fetch_all(&self.pool)
                .await
                .map_err(StoreError::query("list movies by genre"))?
            }
            None => sqlx::query_as::<_, MovieRow>(&format!(
                "SELECT {MOVIE_COLUMNS} FROM movie ORDER BY title ASC, id ASC"
            ))
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::query("list movies"))?,
        };

        Self::enrich(&self.pool, rows).await
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Movie>> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movie WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::query("get movie"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut movies = Self::enrich(&self.pool, vec![row]).await?;
        Ok(movies.pop())
    }

    async fn create(&self, input: MovieData) -> StoreResult<Movie> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::query("begin create"))?;

        let id = id_allocator::allocate(&mut PgIdProbe(&mut tx)).await?;

        let row = sqlx::query_as::<_, MovieRow>(&format!(
            r#"
            INSERT INTO movie ({MOVIE_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.director)
        .bind(input.duration)
        .bind(input.year)
        .bind(&input.poster)
        .bind(input.rate)
        .fetch_one(&mut *tx)
        .await
        .map_err(StoreError::query("insert movie"))?;

        Self::link_genres(&mut tx, id, input.genre).await?;
        let movie = Self::enrich_one(&mut tx, row).await?;

        tx.commit().await.map_err(StoreError::query("commit create"))?;

        info!(%id, title = %movie.title, "Movie created");
        Ok(movie)
    }

    async fn update(&self, id: Uuid, input: MoviePatch) -> StoreResult<Option<Movie>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::query("begin update"))?;

        let row = sqlx::query_as::<_, MovieRow>(&format!(
            r#"
            UPDATE movie
            SET
                title = COALESCE($1, title),
                director = COALESCE($2, director),
                duration = COALESCE($3, duration),
                year = COALESCE($4, year),
                poster = COALESCE($5, poster),
                rate = COALESCE($6, rate)
            WHERE id = $7
            RETURNING {MOVIE_COLUMNS}
            "#
        ))
        .bind(input.title)
        .bind(input.director)
        .bind(input.duration)
        .bind(input.year)
        .bind(input.poster)
        .bind(input.rate)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(StoreError::query("update movie"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(genres) = input.genre {
            sqlx::query("DELETE FROM movie_genres WHERE movie_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(StoreError::query("clear movie genres"))?;
            Self::link_genres(&mut tx, id, genres).await?;
        }

        let movie = Self::enrich_one(&mut tx, row).await?;
        tx.commit().await.map_err(StoreError::query("commit update"))?;

        info!(%id, "Movie updated");
        Ok(Some(movie))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Movie>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::query("begin delete"))?;

        let Some(row) = Self::find_row(&mut tx, id).await? else {
            return Ok(None);
        };
        let movie = Self::enrich_one(&mut tx, row).await?;

        sqlx::query("DELETE FROM movie_genres WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query("delete movie genres"))?;

        sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StoreError::query("delete movie"))?;

        tx.commit().await.map_err(StoreError::query("commit delete"))?;

        info!(%id, "Movie deleted");
        Ok(Some(movie))
    }
}
