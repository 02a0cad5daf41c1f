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

//! API to delete a movie.

use crate::driver::Driver;
use crate::model::MovieId;
use crate::rest::IdQuery;
use axum::extract::State;
use filmoteka_core::rest::{EmptyBody, Envelope, QueryParams, RestResult};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<IdQuery>,
    _: EmptyBody,
) -> RestResult<Envelope<()>> {
    let id = query.require_id()?;
    driver.delete_movie(MovieId::new(id)).await?;
    Ok(Envelope::new("Movie successfully deleted", ()))
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http::{self, header, StatusCode};
    use filmoteka_core::rest::testutils::OneShotBuilder;
    use filmoteka_core::test_payload_must_be_empty;

    fn route() -> (http::Method, String) {
        (http::Method::DELETE, "/movie".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Amy Adams").await;
        let movie = context.put_movie("Arrival", 7.9).await;
        context.link(&actor, &movie).await;
        let cookie = context.admin_cookie().await;

        let (message, ()) = OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .with_query([("id", movie.id().as_i32())])
            .send_empty()
            .await
            .expect_envelope::<()>()
            .await;
        assert_eq!("Movie successfully deleted", message);

        assert_eq!(None, context.get_movie(*movie.id()).await);
        assert!(context.get_actor(*actor.id()).await.is_some());
    }

    #[tokio::test]
    async fn test_not_admin() {
        let context = TestContext::setup().await;
        let movie = context.put_movie("Arrival", 7.9).await;
        let cookie = context.user_cookie().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .with_query([("id", movie.id().as_i32())])
            .send_empty()
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Admin role required")
            .await;

        assert!(context.get_movie(*movie.id()).await.is_some());
    }

    #[tokio::test]
    async fn test_anonymous_without_query() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Login required")
            .await;

        OneShotBuilder::new(context.app(), (http::Method::DELETE, "/movie?foo=1"))
            .send_text("unexpected")
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Login required")
            .await;
    }

    #[tokio::test]
    async fn test_missing_id() {
        let context = TestContext::setup().await;
        let cookie = context.admin_cookie().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .send_empty()
            .await
            .expect_status(StatusCode::BAD_REQUEST)
            .expect_error("Missing id parameter")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_admin_app().await,
        route(),
        [("id", 1)]
    );
}
