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

//! API to create a new session for an existing user.

use crate::driver::AuthnDriver;
use crate::model::{Password, Role};
use crate::rest::cookies::{get_session_cookie, session_cookie};
use axum::extract::State;
use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use filmoteka_core::model::EmailAddress;
use filmoteka_core::rest::{Envelope, JsonBody, RestResult};
use serde::{Deserialize, Serialize};

/// Message sent to the server to log in.
#[derive(Deserialize)]
#[cfg_attr(any(test, feature = "testutils"), derive(Serialize))]
pub struct LoginRequest {
    /// Email address of the user.
    pub email: String,

    /// Password of the user.
    pub password: String,
}

/// Message returned by the server after a successful login attempt.
#[derive(Debug, Serialize)]
#[cfg_attr(any(test, feature = "testutils"), derive(Deserialize, PartialEq))]
pub struct LoginResponse {
    /// Email address of the user that logged in.
    pub email: String,

    /// Role claim carried by the new session.
    pub role: Role,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<AuthnDriver>,
    jar: CookieJar,
    JsonBody(request): JsonBody<LoginRequest>,
) -> RestResult<impl IntoResponse> {
    let email = EmailAddress::new(request.email)?;
    let password = Password::new(request.password)?;
    let previous = get_session_cookie(&jar);

    let opts = driver.opts().clone();
    let session = driver.login(email, password, previous).await?;

    let cookie = session_cookie(session.access_token(), &opts);
    let response =
        LoginResponse { email: session.email().as_str().to_owned(), role: *session.role() };
    Ok((jar.add(cookie), Envelope::new("Logged in", response)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::TestContext;
    use crate::rest::app;
    use crate::rest::testutils::session_from_response;
    use axum::http::{self, header, StatusCode};
    use filmoteka_core::rest::testutils::OneShotBuilder;
    use filmoteka_core::test_payload_must_be_json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/login".to_owned())
    }

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest { email: email.to_owned(), password: password.to_owned() }
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        context.create_user("admin@example.com", "the-password", Role::Admin).await;

        let response = OneShotBuilder::new(app(context.driver()), route())
            .send_json(request("admin@example.com", "the-password"))
            .await
            .take_response()
            .await;

        let token = session_from_response(&response);
        let cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.contains("Max-Age=86400"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Secure"));

        let session = context.driver().get_session(token).await.unwrap();
        assert_eq!(&Role::Admin, session.role());
    }

    #[tokio::test]
    async fn test_ok_envelope() {
        let context = TestContext::setup().await;
        context.create_user("user@example.com", "the-password", Role::User).await;

        let (message, data) = OneShotBuilder::new(app(context.driver()), route())
            .send_json(request("user@example.com", "the-password"))
            .await
            .expect_envelope::<LoginResponse>()
            .await;
        assert_eq!("Logged in", message);
        let exp_data = LoginResponse { email: "user@example.com".to_owned(), role: Role::User };
        assert_eq!(exp_data, data);
    }

    #[tokio::test]
    async fn test_rotates_previous_session() {
        let context = TestContext::setup().await;
        let previous = context.do_test_login("user@example.com", Role::User).await;

        let response = OneShotBuilder::new(app(context.driver()), route())
            .with_header(header::COOKIE, format!("session={}", previous.as_str()))
            .send_json(request("user@example.com", "test0password"))
            .await
            .take_response()
            .await;
        let token = session_from_response(&response);
        assert_ne!(previous, token);

        context.driver().get_session(token).await.unwrap();
        context.driver().get_session(previous).await.unwrap_err();
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(app(context.driver()), route())
            .send_json(request("nobody@example.com", "password"))
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Invalid credentials")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_password() {
        let context = TestContext::setup().await;
        context.create_user("user@example.com", "the-password", Role::User).await;

        OneShotBuilder::new(app(context.driver()), route())
            .send_json(request("user@example.com", "other-password"))
            .await
            .expect_status(StatusCode::UNAUTHORIZED)
            .expect_error("Invalid credentials")
            .await;
    }

    #[tokio::test]
    async fn test_failures_do_not_reveal_known_users() {
        let context = TestContext::setup().await;
        context.create_user("user@example.com", "the-password", Role::User).await;

        let mut bodies = vec![];
        for (email, password) in
            [("nobody@example.com", "the-password"), ("user@example.com", "other-password")]
        {
            let response = OneShotBuilder::new(app(context.driver()), route())
                .send_json(request(email, password))
                .await
                .expect_status(StatusCode::UNAUTHORIZED)
                .take_response()
                .await;
            assert!(response.headers().get(header::SET_COOKIE).is_none());
            let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            bodies.push(body);
        }
        assert_eq!(bodies[0], bodies[1]);
    }

    #[tokio::test]
    async fn test_bad_email() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(app(context.driver()), route())
            .send_json(request("not an email", "password"))
            .await
            .expect_status(StatusCode::BAD_REQUEST)
            .expect_error("valid address")
            .await;
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(app(context.driver()), (http::Method::GET, "/login"))
            .send_empty()
            .await
            .expect_status(StatusCode::METHOD_NOT_ALLOWED)
            .expect_error("Method not allowed")
            .await;
    }

    test_payload_must_be_json!(app(TestContext::setup().await.driver()), route());
}
