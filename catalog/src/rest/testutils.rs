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

//! Test utilities for the REST API.

use crate::db::{ActorMovieStore, ActorStore, MovieStore, SqliteCatalogStore};
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::extract::Request;
use axum::http::{header, HeaderValue};
use axum::middleware::map_request;
use axum::Router;
use filmoteka_authn::db::SqliteAuthnStore;
use filmoteka_authn::driver::{AuthnDriver, AuthnOptions};
use filmoteka_authn::model::Role;
use filmoteka_authn::rest::testutils::{create_test_user, do_test_login};
use filmoteka_core::clocks::SystemClock;
use filmoteka_core::db::DbError;
use filmoteka_core::db::sqlite::testutils::setup;
use std::sync::Arc;
use time::macros::date;

/// Email of the administrator that exists in every test context.
const ADMIN_EMAIL: &str = "admin@example.com";

/// Email of the regular user that exists in every test context.
const USER_EMAIL: &str = "user@example.com";

/// Password shared by all users in the test context.
const PASSWORD: &str = "test0password";

/// State of a running test.
pub(crate) struct TestContext {
    /// The catalog storage behind the app.
    store: Arc<SqliteCatalogStore>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app with in-memory databases and with one administrator and one regular
    /// user ready to log in.
    pub(crate) async fn setup() -> Self {
        let store = Arc::from(SqliteCatalogStore::new(setup().await));
        store.init_schema().await.unwrap();

        let authn_store = SqliteAuthnStore::new(setup().await);
        authn_store.init_schema().await.unwrap();
        create_test_user(&authn_store, ADMIN_EMAIL, PASSWORD, Role::Admin).await;
        create_test_user(&authn_store, USER_EMAIL, PASSWORD, Role::User).await;

        let authn = AuthnDriver::new(
            Arc::from(authn_store),
            Arc::from(SystemClock::default()),
            AuthnOptions::default(),
        );
        let app = app(Driver::new(store.clone()), authn);
        Self { store, app }
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Consumes the context and transforms it into an app router that serves every request on
    /// behalf of the administrator.
    pub(crate) async fn into_admin_app(self) -> Router {
        let cookie = HeaderValue::from_str(&self.admin_cookie().await).unwrap();
        self.app.layer(map_request(move |mut request: Request| {
            let cookie = cookie.clone();
            async move {
                request.headers_mut().insert(header::COOKIE, cookie);
                request
            }
        }))
    }

    /// Logs the administrator in and returns the value of the `Cookie` header to use.
    pub(crate) async fn admin_cookie(&self) -> String {
        do_test_login(self.app(), ADMIN_EMAIL, PASSWORD).await
    }

    /// Logs the regular user in and returns the value of the `Cookie` header to use.
    pub(crate) async fn user_cookie(&self) -> String {
        do_test_login(self.app(), USER_EMAIL, PASSWORD).await
    }

    /// Creates an actor called `name` by directly modifying the backing store.
    pub(crate) async fn put_actor(&self, name: &str) -> Actor {
        let actor =
            NewActor::new(name.to_owned(), "unknown".to_owned(), Some(date!(1980 - 05 - 17)))
                .unwrap();
        let id = self.store.create_actor(&actor).await.unwrap();
        actor.with_id(id)
    }

    /// Creates a movie called `title` with `rating` by directly modifying the backing store.
    pub(crate) async fn put_movie(&self, title: &str, rating: f64) -> Movie {
        let movie = NewMovie::new(
            title.to_owned(),
            format!("Description of {}", title),
            rating,
            Some(date!(1999 - 03 - 31)),
        )
        .unwrap();
        let id = self.store.create_movie(&movie).await.unwrap();
        movie.with_id(id)
    }

    /// Links `actor` to `movie` by directly modifying the backing store.
    pub(crate) async fn link(&self, actor: &Actor, movie: &Movie) {
        self.store.add_actor_to_movie(*actor.id(), *movie.id()).await.unwrap();
    }

    /// Gets the actor `id` by directly querying the backing store.
    pub(crate) async fn get_actor(&self, id: ActorId) -> Option<Actor> {
        match self.store.get_actor(id).await {
            Ok(actor) => Some(actor),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets the movie `id` by directly querying the backing store.
    pub(crate) async fn get_movie(&self, id: MovieId) -> Option<Movie> {
        match self.store.get_movie(id).await {
            Ok(movie) => Some(movie),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets the actors linked to the movie `id` by directly querying the backing store.
    pub(crate) async fn actors_for_movie(&self, id: MovieId) -> Vec<Actor> {
        self.store.get_actors_for_movie(id).await.unwrap()
    }
}
