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

//! Utilities to help testing services that integrate with the `authn` features.

use crate::db::AuthnStore;
use crate::model::{AccessToken, Password, Role, User};
use crate::rest::{LoginRequest, SESSION_COOKIE};
use axum::body::Body;
use axum::http::{self, header};
use axum::Router;
use axum_extra::extract::cookie::Cookie;
use filmoteka_core::model::EmailAddress;
use filmoteka_core::rest::testutils::OneShotBuilder;

/// Creates a user with `email`, `password` and `role` by directly modifying the backing store.
pub async fn create_test_user(store: &dyn AuthnStore, email: &str, password: &str, role: Role) {
    let user = User::new(
        EmailAddress::new(email).unwrap(),
        Password::new(password).unwrap().hash().unwrap(),
        role.as_str(),
    );
    store.create_user(&user).await.unwrap();
}

/// Extracts the session token from the `Set-Cookie` header of a login `response`.
pub fn session_from_response(response: &http::Response<Body>) -> AccessToken {
    let header = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    let cookie = Cookie::parse(header).unwrap();
    assert_eq!(SESSION_COOKIE, cookie.name());
    AccessToken::new(cookie.value()).unwrap()
}

/// Logs `email` in with `password` through the `/login` API served by `app` and returns the
/// value to send in the `Cookie` header of subsequent requests.
pub async fn do_test_login(app: Router, email: &str, password: &str) -> String {
    let request = LoginRequest { email: email.to_owned(), password: password.to_owned() };
    let response = OneShotBuilder::new(app, (http::Method::POST, "/login"))
        .send_json(request)
        .await
        .take_response()
        .await;
    let token = session_from_response(&response);
    format!("{}={}", SESSION_COOKIE, token.as_str())
}
