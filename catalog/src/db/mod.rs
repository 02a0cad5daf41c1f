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

//! Database abstraction in terms of the operations needed by the catalog.

use crate::model::{
    Actor, ActorId, ActorUpdate, Movie, MovieId, MovieUpdate, MovieWithActor, NewActor, NewMovie,
    SortKey,
};
use async_trait::async_trait;
use filmoteka_core::db::DbResult;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub use postgres::PostgresCatalogStore;
#[cfg(any(feature = "sqlite", test))]
mod sqlite;
#[cfg(any(feature = "sqlite", test))]
pub use sqlite::SqliteCatalogStore;

/// Storage for actors.
#[async_trait]
pub trait ActorStore: Send + Sync {
    /// Gets all actors sorted by name.
    async fn get_actors(&self) -> DbResult<Vec<Actor>>;

    /// Creates a new actor and returns its identifier.
    async fn create_actor(&self, actor: &NewActor) -> DbResult<ActorId>;

    /// Gets the actor identified by `id`.  Actors without a date of birth are not considered to
    /// exist.
    async fn get_actor(&self, id: ActorId) -> DbResult<Actor>;

    /// Applies `update` to an existing actor.  Fails with `NotFound`, without modifying anything,
    /// if the actor does not exist in the sense of `get_actor`.
    async fn update_actor(&self, update: &ActorUpdate) -> DbResult<()>;

    /// Deletes the actor identified by `id`, if it exists, and all of its movie links.
    async fn delete_actor(&self, id: ActorId) -> DbResult<()>;
}

/// Storage for movies.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Gets all movies in the order given by `sort`.
    async fn get_movies(&self, sort: SortKey) -> DbResult<Vec<Movie>>;

    /// Gets all movies whose title or description contain `fragment`, ignoring case.
    async fn search_movies(&self, fragment: &str) -> DbResult<Vec<Movie>>;

    /// Creates a new movie and returns its identifier.
    async fn create_movie(&self, movie: &NewMovie) -> DbResult<MovieId>;

    /// Gets the movie identified by `id`.  Movies without a release date are not considered to
    /// exist.
    async fn get_movie(&self, id: MovieId) -> DbResult<Movie>;

    /// Applies `update` to an existing movie.  Fails with `NotFound`, without modifying anything,
    /// if the movie does not exist in the sense of `get_movie`.
    async fn update_movie(&self, update: &MovieUpdate) -> DbResult<()>;

    /// Deletes the movie identified by `id`, if it exists, and all of its actor links.
    async fn delete_movie(&self, id: MovieId) -> DbResult<()>;
}

/// Storage for the links between actors and movies.
#[async_trait]
pub trait ActorMovieStore: Send + Sync {
    /// Links `actor` to `movie`.  Fails with `AlreadyExists` if they are already linked.
    async fn add_actor_to_movie(&self, actor: ActorId, movie: MovieId) -> DbResult<()>;

    /// Unlinks `actor` from `movie`.  Removing a link that does not exist is not an error.
    async fn delete_actor_from_movie(&self, actor: ActorId, movie: MovieId) -> DbResult<()>;

    /// Gets the actors linked to `movie` sorted by name.
    async fn get_actors_for_movie(&self, movie: MovieId) -> DbResult<Vec<Actor>>;

    /// Gets the movies linked to `actor` sorted by title.
    async fn get_movies_for_actor(&self, actor: ActorId) -> DbResult<Vec<Movie>>;

    /// Gets the movies of every actor whose name contains both `first` and `last`, ignoring
    /// case.  An empty fragment matches any name.
    async fn search_movies_by_actor_name(
        &self,
        first: &str,
        last: &str,
    ) -> DbResult<Vec<MovieWithActor>>;
}

/// All the storage operations needed by the catalog.
pub trait CatalogStore: ActorStore + MovieStore + ActorMovieStore {}

impl<T: ActorStore + MovieStore + ActorMovieStore> CatalogStore for T {}

/// Builds a `LIKE` pattern that matches any string containing `fragment`.
///
/// Wildcards in `fragment` are escaped with a backslash so that they match literally, which
/// requires the query to specify `ESCAPE '\'`.
fn like_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
