// Filmoteka
// Copyright 2024 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Implementation of the catalog storage using PostgreSQL.

use crate::db::{like_pattern, ActorMovieStore, ActorStore, MovieStore};
use crate::model::{
    Actor, ActorId, ActorUpdate, Movie, MovieId, MovieUpdate, MovieWithActor, NewActor, NewMovie,
    SortKey,
};
use async_trait::async_trait;
use filmoteka_core::db::postgres::{map_sqlx_error, run_schema, PostgresDb};
use filmoteka_core::db::{with_timeout, DbError, DbResult};
use sqlx::postgres::PgRow;
use sqlx::Row;
use time::Date;

/// Schema to use to initialize the database.
const SCHEMA: &str = include_str!("postgres.sql");

impl TryFrom<PgRow> for Actor {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("actorid").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;
        let gender: String = row.try_get("gender").map_err(map_sqlx_error)?;
        let date_of_birth: Option<Date> = row.try_get("dateofbirth").map_err(map_sqlx_error)?;

        Ok(Actor::new(ActorId::new(id), name, gender, date_of_birth))
    }
}

impl TryFrom<PgRow> for Movie {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("movieid").map_err(map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(map_sqlx_error)?;
        let rating: f64 = row.try_get("rating").map_err(map_sqlx_error)?;
        let release_date: Option<Date> = row.try_get("releasedate").map_err(map_sqlx_error)?;

        Ok(Movie::new(MovieId::new(id), title, description, rating, release_date))
    }
}

impl TryFrom<PgRow> for MovieWithActor {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let actor_name: String = row.try_get("actor_name").map_err(map_sqlx_error)?;
        Ok(MovieWithActor { movie: Movie::try_from(row)?, actor_name })
    }
}

/// Converts all `rows` into `T`s, stopping at the first failure.
fn collect_rows<T>(rows: Vec<PgRow>) -> DbResult<Vec<T>>
where
    T: TryFrom<PgRow, Error = DbError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Catalog storage backed by a PostgreSQL database.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    /// Connection to the database.
    db: PostgresDb,
}

impl PostgresCatalogStore {
    /// Creates a new store on top of an open database.
    pub fn new(db: PostgresDb) -> Self {
        Self { db }
    }

    /// Creates the tables needed by this store if they do not exist yet.
    pub async fn init_schema(&self) -> DbResult<()> {
        run_schema(self.db.pool(), SCHEMA).await
    }
}

#[async_trait]
impl ActorStore for PostgresCatalogStore {
    async fn get_actors(&self) -> DbResult<Vec<Actor>> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "SELECT actorid, name, gender, dateofbirth FROM actors ORDER BY name";
            let rows =
                sqlx::query(query_str).fetch_all(self.db.pool()).await.map_err(map_sqlx_error)?;
            collect_rows(rows)
        })
        .await
    }

    async fn create_actor(&self, actor: &NewActor) -> DbResult<ActorId> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "
                INSERT INTO actors (name, gender, dateofbirth) VALUES ($1, $2, $3)
                RETURNING actorid
            ";
            let row = sqlx::query(query_str)
                .bind(actor.name())
                .bind(actor.gender())
                .bind(actor.date_of_birth())
                .fetch_one(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            let id: i32 = row.try_get("actorid").map_err(map_sqlx_error)?;
            Ok(ActorId::new(id))
        })
        .await
    }

    async fn get_actor(&self, id: ActorId) -> DbResult<Actor> {
        with_timeout(self.db.query_timeout(), async {
            let query_str =
                "SELECT actorid, name, gender, dateofbirth FROM actors WHERE actorid = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_optional(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            match row {
                Some(row) => {
                    let actor = Actor::try_from(row)?;
                    match actor.date_of_birth() {
                        Some(_) => Ok(actor),
                        None => Err(DbError::NotFound),
                    }
                }
                None => Err(DbError::NotFound),
            }
        })
        .await
    }

    async fn update_actor(&self, update: &ActorUpdate) -> DbResult<()> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "
                UPDATE actors
                SET name = COALESCE($1, name),
                    gender = COALESCE($2, gender),
                    dateofbirth = COALESCE($3, dateofbirth)
                WHERE actorid = $4 AND dateofbirth IS NOT NULL
            ";
            let done = sqlx::query(query_str)
                .bind(update.name())
                .bind(update.gender())
                .bind(update.date_of_birth())
                .bind(update.id().as_i32())
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            if done.rows_affected() == 0 {
                return Err(DbError::NotFound);
            }
            Ok(())
        })
        .await
    }

    async fn delete_actor(&self, id: ActorId) -> DbResult<()> {
        with_timeout(self.db.query_timeout(), async {
            sqlx::query("DELETE FROM actors WHERE actorid = $1")
                .bind(id.as_i32())
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl MovieStore for PostgresCatalogStore {
    async fn get_movies(&self, sort: SortKey) -> DbResult<Vec<Movie>> {
        let query_str = match sort {
            SortKey::ReleaseDate => {
                "SELECT movieid, title, description, rating, releasedate FROM movies
                ORDER BY releasedate NULLS LAST, title"
            }
            SortKey::Title => {
                "SELECT movieid, title, description, rating, releasedate FROM movies
                ORDER BY title"
            }
            SortKey::Rating => {
                "SELECT movieid, title, description, rating, releasedate FROM movies
                ORDER BY rating DESC, title"
            }
        };
        with_timeout(self.db.query_timeout(), async {
            let rows =
                sqlx::query(query_str).fetch_all(self.db.pool()).await.map_err(map_sqlx_error)?;
            collect_rows(rows)
        })
        .await
    }

    async fn search_movies(&self, fragment: &str) -> DbResult<Vec<Movie>> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = r"
                SELECT movieid, title, description, rating, releasedate FROM movies
                WHERE title ILIKE $1 ESCAPE '\' OR description ILIKE $1 ESCAPE '\'
                ORDER BY title
            ";
            let rows = sqlx::query(query_str)
                .bind(like_pattern(fragment))
                .fetch_all(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            collect_rows(rows)
        })
        .await
    }

    async fn create_movie(&self, movie: &NewMovie) -> DbResult<MovieId> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "
                INSERT INTO movies (title, description, rating, releasedate)
                VALUES ($1, $2, $3, $4)
                RETURNING movieid
            ";
            let row = sqlx::query(query_str)
                .bind(movie.title())
                .bind(movie.description())
                .bind(movie.rating())
                .bind(movie.release_date())
                .fetch_one(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            let id: i32 = row.try_get("movieid").map_err(map_sqlx_error)?;
            Ok(MovieId::new(id))
        })
        .await
    }

    async fn get_movie(&self, id: MovieId) -> DbResult<Movie> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "
                SELECT movieid, title, description, rating, releasedate FROM movies
                WHERE movieid = $1
            ";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_optional(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            match row {
                Some(row) => {
                    let movie = Movie::try_from(row)?;
                    match movie.release_date() {
                        Some(_) => Ok(movie),
                        None => Err(DbError::NotFound),
                    }
                }
                None => Err(DbError::NotFound),
            }
        })
        .await
    }

    async fn update_movie(&self, update: &MovieUpdate) -> DbResult<()> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "
                UPDATE movies
                SET title = COALESCE($1, title),
                    description = COALESCE($2, description),
                    rating = COALESCE($3, rating),
                    releasedate = COALESCE($4, releasedate)
                WHERE movieid = $5 AND releasedate IS NOT NULL
            ";
            let done = sqlx::query(query_str)
                .bind(update.title())
                .bind(update.description())
                .bind(update.rating())
                .bind(update.release_date())
                .bind(update.id().as_i32())
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            if done.rows_affected() == 0 {
                return Err(DbError::NotFound);
            }
            Ok(())
        })
        .await
    }

    async fn delete_movie(&self, id: MovieId) -> DbResult<()> {
        with_timeout(self.db.query_timeout(), async {
            sqlx::query("DELETE FROM movies WHERE movieid = $1")
                .bind(id.as_i32())
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ActorMovieStore for PostgresCatalogStore {
    async fn add_actor_to_movie(&self, actor: ActorId, movie: MovieId) -> DbResult<()> {
        with_timeout(self.db.query_timeout(), async {
            sqlx::query("INSERT INTO actormovie (actorid, movieid) VALUES ($1, $2)")
                .bind(actor.as_i32())
                .bind(movie.as_i32())
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        })
        .await
    }

    async fn delete_actor_from_movie(&self, actor: ActorId, movie: MovieId) -> DbResult<()> {
        with_timeout(self.db.query_timeout(), async {
            sqlx::query("DELETE FROM actormovie WHERE actorid = $1 AND movieid = $2")
                .bind(actor.as_i32())
                .bind(movie.as_i32())
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        })
        .await
    }

    async fn get_actors_for_movie(&self, movie: MovieId) -> DbResult<Vec<Actor>> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "
                SELECT a.actorid, a.name, a.gender, a.dateofbirth
                FROM actors a JOIN actormovie am ON a.actorid = am.actorid
                WHERE am.movieid = $1
                ORDER BY a.name
            ";
            let rows = sqlx::query(query_str)
                .bind(movie.as_i32())
                .fetch_all(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            collect_rows(rows)
        })
        .await
    }

    async fn get_movies_for_actor(&self, actor: ActorId) -> DbResult<Vec<Movie>> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "
                SELECT m.movieid, m.title, m.description, m.rating, m.releasedate
                FROM movies m JOIN actormovie am ON m.movieid = am.movieid
                WHERE am.actorid = $1
                ORDER BY m.title
            ";
            let rows = sqlx::query(query_str)
                .bind(actor.as_i32())
                .fetch_all(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            collect_rows(rows)
        })
        .await
    }

    async fn search_movies_by_actor_name(
        &self,
        first: &str,
        last: &str,
    ) -> DbResult<Vec<MovieWithActor>> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = r"
                SELECT m.movieid, m.title, m.description, m.rating, m.releasedate,
                    a.name AS actor_name
                FROM movies m
                    JOIN actormovie am ON m.movieid = am.movieid
                    JOIN actors a ON am.actorid = a.actorid
                WHERE a.name ILIKE $1 ESCAPE '\' AND a.name ILIKE $2 ESCAPE '\'
                ORDER BY m.title, a.name
            ";
            let rows = sqlx::query(query_str)
                .bind(like_pattern(first))
                .bind(like_pattern(last))
                .fetch_all(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            collect_rows(rows)
        })
        .await
    }
}
