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

//! Utilities to help testing the catalog driver.

use crate::db::{ActorMovieStore, ActorStore, MovieStore, SqliteCatalogStore};
use crate::driver::Driver;
use crate::model::{Actor, Movie, NewActor, NewMovie};
use std::sync::Arc;
use time::macros::date;

/// State of a running test.
pub(crate) struct TestContext {
    /// Direct access to the storage backing the driver.
    pub(crate) store: Arc<SqliteCatalogStore>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = filmoteka_core::db::sqlite::testutils::setup().await;
        let store = Arc::from(SqliteCatalogStore::new(db));
        store.init_schema().await.unwrap();
        let driver = Driver::new(store.clone());
        Self { store, driver }
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates an actor called `name` by directly modifying the backing store.
    pub(crate) async fn put_actor(&self, name: &str) -> Actor {
        let actor =
            NewActor::new(name.to_owned(), "unknown".to_owned(), Some(date!(1970 - 01 - 01)))
                .unwrap();
        let id = self.store.create_actor(&actor).await.unwrap();
        actor.with_id(id)
    }

    /// Creates a movie called `title` with `rating` by directly modifying the backing store.
    pub(crate) async fn put_movie(&self, title: &str, rating: f64) -> Movie {
        let movie = NewMovie::new(
            title.to_owned(),
            format!("The story of {}", title),
            rating,
            Some(date!(2000 - 01 - 01)),
        )
        .unwrap();
        let id = self.store.create_movie(&movie).await.unwrap();
        movie.with_id(id)
    }

    /// Links `actor` to `movie` by directly modifying the backing store.
    pub(crate) async fn link(&self, actor: &Actor, movie: &Movie) {
        self.store.add_actor_to_movie(*actor.id(), *movie.id()).await.unwrap();
    }
}
