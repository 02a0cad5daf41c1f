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

//! REST interface for session-based authentication.

use crate::driver::AuthnDriver;
use axum::Router;
use filmoteka_core::rest::method_not_allowed;

mod caller;
mod cookies;
mod login_post;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use caller::{require_admin_for_writes, with_sessions, Caller};
pub use cookies::SESSION_COOKIE;
pub use login_post::{LoginRequest, LoginResponse};

/// Creates the router for the authentication endpoints.
///
/// The returned router does not identify callers on its own: services are expected to merge it
/// into their own router and wrap the result with `with_sessions`.
pub fn app(driver: AuthnDriver) -> Router {
    use axum::routing::post;

    Router::new()
        .route("/login", post(login_post::handler).fallback(method_not_allowed))
        .with_state(driver)
}
