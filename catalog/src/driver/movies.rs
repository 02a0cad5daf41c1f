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

//! Extends the driver with operations on movies.

use crate::driver::{non_empty, or_not_found, Driver};
use crate::model::{Movie, MovieId, MovieUpdate, NewMovie, SortKey};
use filmoteka_core::driver::DriverResult;

impl Driver {
    /// Gets all movies in the order given by `sort`.
    pub async fn get_movies(self, sort: SortKey) -> DriverResult<Vec<Movie>> {
        let movies = self.store.get_movies(sort).await?;
        non_empty(movies, || "No movies found".to_owned())
    }

    /// Gets all movies whose title or description contain `fragment`, ignoring case.
    pub async fn search_movies(self, fragment: String) -> DriverResult<Vec<Movie>> {
        let movies = self.store.search_movies(&fragment).await?;
        non_empty(movies, || format!("No movies match '{}'", fragment))
    }

    /// Creates a new movie and returns it with its assigned identifier.
    pub async fn create_movie(self, movie: NewMovie) -> DriverResult<Movie> {
        let id = self.store.create_movie(&movie).await?;
        Ok(movie.with_id(id))
    }

    /// Gets the movie identified by `id`.
    pub async fn get_movie(self, id: MovieId) -> DriverResult<Movie> {
        or_not_found(self.store.get_movie(id).await, || format!("Movie {} not found", id))
    }

    /// Applies `update` to an existing movie and returns its new state.
    pub async fn update_movie(self, update: MovieUpdate) -> DriverResult<Movie> {
        let id = *update.id();
        or_not_found(self.store.update_movie(&update).await, || {
            format!("Movie {} not found", id)
        })?;
        self.get_movie(id).await
    }

    /// Deletes the movie identified by `id`.  Deleting a movie that does not exist succeeds.
    pub async fn delete_movie(self, id: MovieId) -> DriverResult<()> {
        Ok(self.store.delete_movie(id).await?)
    }
}
