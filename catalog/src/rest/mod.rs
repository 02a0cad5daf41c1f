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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use filmoteka_authn::driver::AuthnDriver;
use filmoteka_authn::rest::{require_admin_for_writes, with_sessions};
use filmoteka_core::rest::{method_not_allowed, RestError, RestResult};
use serde::Deserialize;

mod actor_delete;
mod actor_get;
mod actor_patch;
mod actor_post;
mod actormovie_delete;
mod actormovie_get;
mod actormovie_post;
mod movie_delete;
mod movie_get;
mod movie_patch;
mod movie_post;
#[cfg(test)]
mod testutils;

/// Query parameters for APIs that optionally take the identifier of an entity.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct IdQuery {
    /// Identifier of the entity to operate on.
    id: Option<i32>,
}

impl IdQuery {
    /// Returns the identifier in the query or fails if it was not provided.
    fn require_id(&self) -> RestResult<i32> {
        self.id.ok_or_else(|| RestError::InvalidRequest("Missing id parameter".to_owned()))
    }
}

/// Creates the router for the application.
///
/// The catalog routes and the login route share the same session middleware, which resolves
/// the caller of each request through `authn`.  Catalog routes only accept reads from callers
/// that are not administrators.
pub(crate) fn app(driver: Driver, authn: AuthnDriver) -> Router {
    use axum::routing::get;

    let catalog = Router::new()
        .route(
            "/actor",
            get(actor_get::handler)
                .post(actor_post::handler)
                .patch(actor_patch::handler)
                .delete(actor_delete::handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/movie",
            get(movie_get::handler)
                .post(movie_post::handler)
                .patch(movie_patch::handler)
                .delete(movie_delete::handler)
                .fallback(method_not_allowed),
        )
        .route(
            "/movie/actormovie",
            get(actormovie_get::handler)
                .post(actormovie_post::handler)
                .delete(actormovie_delete::handler)
                .fallback(method_not_allowed),
        )
        .route_layer(axum::middleware::from_fn(require_admin_for_writes))
        .with_state(driver);

    with_sessions(catalog.merge(filmoteka_authn::rest::app(authn.clone())), authn)
}
