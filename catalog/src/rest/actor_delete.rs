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

//! API to delete an actor.

use crate::driver::Driver;
use crate::model::ActorId;
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
    driver.delete_actor(ActorId::new(id)).await?;
    Ok(Envelope::new("Actor successfully deleted", ()))
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http::{self, header, StatusCode};
    use filmoteka_core::rest::testutils::OneShotBuilder;
    use filmoteka_core::test_payload_must_be_empty;

    fn route() -> (http::Method, String) {
        (http::Method::DELETE, "/actor".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Zoe Saldana").await;
        let movie = context.put_movie("Avatar", 7.9).await;
        context.link(&actor, &movie).await;
        let cookie = context.admin_cookie().await;

        let (message, ()) = OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .with_query([("id", actor.id().as_i32())])
            .send_empty()
            .await
            .expect_envelope::<()>()
            .await;
        assert_eq!("Actor successfully deleted", message);

        assert_eq!(None, context.get_actor(*actor.id()).await);
        assert!(context.actors_for_movie(*movie.id()).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_is_ok() {
        let context = TestContext::setup().await;
        let cookie = context.admin_cookie().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .with_query([("id", 42)])
            .send_empty()
            .await
            .expect_envelope::<()>()
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

    #[tokio::test]
    async fn test_missing_id_not_admin() {
        let context = TestContext::setup().await;
        let cookie = context.user_cookie().await;

        OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Login required")
            .await;

        OneShotBuilder::new(context.app(), route())
            .with_header(header::COOKIE, cookie)
            .send_empty()
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Admin role required")
            .await;
    }

    #[tokio::test]
    async fn test_unknown_parameter() {
        let context = TestContext::setup().await;
        let cookie = context.admin_cookie().await;

        OneShotBuilder::new(context.app(), (http::Method::DELETE, "/actor?foo=1"))
            .with_header(header::COOKIE, cookie)
            .send_empty()
            .await
            .expect_status(StatusCode::BAD_REQUEST)
            .expect_error("unknown field `foo`")
            .await;
    }

    #[tokio::test]
    async fn test_anonymous() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Zoe Saldana").await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("id", actor.id().as_i32())])
            .send_empty()
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Login required")
            .await;

        assert_eq!(Some(actor.clone()), context.get_actor(*actor.id()).await);
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_admin_app().await,
        route(),
        [("id", 1)]
    );
}
