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

//! API to add an actor to a movie.

use crate::driver::Driver;
use crate::model::{ActorId, MovieId};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use filmoteka_core::rest::{Envelope, JsonBody, RestResult};
use serde::{Deserialize, Serialize};

/// Identifies the two ends of the relationship between an actor and a movie.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct ActorMovieRequest {
    /// Identifier of the actor.
    pub(crate) actorid: ActorId,

    /// Identifier of the movie.
    pub(crate) movieid: MovieId,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<ActorMovieRequest>,
) -> RestResult<impl IntoResponse> {
    let (actor, movie) = driver.add_actor_to_movie(request.actorid, request.movieid).await?;
    let message =
        format!("Actor '{}' successfully added to the movie ({})", actor.name(), movie.title());
    Ok((StatusCode::CREATED, Envelope::new(message, request)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http::{self, header};
    use filmoteka_core::rest::testutils::OneShotBuilder;
    use filmoteka_core::test_payload_must_be_json;
    use serde_json::json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/movie/actormovie".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Amy Adams").await;
        let movie = context.put_movie("Arrival", 7.9).await;
        let cookie = context.admin_cookie().await;

        let request = ActorMovieRequest { actorid: *actor.id(), movieid: *movie.id() };
        let (message, data) = OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .send_json(&request)
            .await
            .expect_status(StatusCode::CREATED)
            .expect_envelope::<ActorMovieRequest>()
            .await;
        assert_eq!("Actor 'Amy Adams' successfully added to the movie (Arrival)", message);
        assert_eq!(request, data);

        assert_eq!(vec![actor], context.actors_for_movie(*movie.id()).await);
    }

    #[tokio::test]
    async fn test_missing_ends() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Amy Adams").await;
        let movie = context.put_movie("Arrival", 7.9).await;
        let cookie = context.admin_cookie().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie.clone())
            .send_json(json!({"actorid": 500, "movieid": movie.id()}))
            .await
            .expect_status(StatusCode::NOT_FOUND)
            .expect_error("Actor 500 not found")
            .await;

        OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .send_json(json!({"actorid": actor.id(), "movieid": 600}))
            .await
            .expect_status(StatusCode::NOT_FOUND)
            .expect_error("Movie 600 not found")
            .await;

        assert!(context.actors_for_movie(*movie.id()).await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Amy Adams").await;
        let movie = context.put_movie("Arrival", 7.9).await;
        context.link(&actor, &movie).await;
        let cookie = context.admin_cookie().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .send_json(json!({"actorid": actor.id(), "movieid": movie.id()}))
            .await
            .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("^Storage failure$")
            .await;
    }

    #[tokio::test]
    async fn test_missing_field() {
        let context = TestContext::setup().await;
        let cookie = context.admin_cookie().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .send_json(json!({"actorid": 1}))
            .await
            .expect_status(StatusCode::BAD_REQUEST)
            .expect_error("missing field `movieid`")
            .await;
    }

    #[tokio::test]
    async fn test_anonymous() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({"actorid": 1, "movieid": 1}))
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Login required")
            .await;

        OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Login required")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_admin_app().await, route());
}
