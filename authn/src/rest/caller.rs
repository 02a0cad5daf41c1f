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

//! Identification of the caller of every request.

use crate::driver::AuthnDriver;
use crate::model::{Role, Session};
use crate::rest::cookies::get_session_cookie;
use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;
use axum_extra::extract::cookie::CookieJar;
use filmoteka_core::driver::DriverError;
use filmoteka_core::model::EmailAddress;
use filmoteka_core::rest::{RestError, RestResult};
use std::convert::Infallible;

/// The identity behind a request, as resolved from its session cookie.
///
/// Requests without a valid session are served on behalf of an anonymous caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Caller {
    /// Email and role of the session owner, or none for anonymous callers.
    identity: Option<(EmailAddress, Role)>,
}

impl From<Session> for Caller {
    fn from(session: Session) -> Self {
        Self { identity: Some((session.email().clone(), *session.role())) }
    }
}

impl Caller {
    /// Returns the email of the logged in user, if any.
    pub fn email(&self) -> Option<&EmailAddress> {
        self.identity.as_ref().map(|(email, _)| email)
    }

    /// Returns the role claim of the session, if any.
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|(_, role)| *role)
    }

    /// Fails unless the caller holds the admin role.
    pub fn require_admin(&self) -> RestResult<()> {
        match self.role() {
            Some(Role::Admin) => Ok(()),
            Some(_) => Err(RestError::Unauthorized("Admin role required".to_owned())),
            None => Err(RestError::Unauthorized("Login required".to_owned())),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Caller>().cloned().unwrap_or_default())
    }
}

/// Middleware that resolves the session cookie of a request into a `Caller` and attaches it to
/// the request for handlers to consume.
async fn resolve_session(
    State(driver): State<AuthnDriver>,
    mut request: Request,
    next: Next,
) -> Result<Response, RestError> {
    let jar = CookieJar::from_headers(request.headers());
    let caller = match get_session_cookie(&jar) {
        None => Caller::default(),
        Some(token) => match driver.get_session(token).await {
            Ok(session) => Caller::from(session),
            Err(DriverError::Unauthorized(_)) => Caller::default(),
            Err(e) => return Err(e.into()),
        },
    };
    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}

/// Middleware that rejects any request other than a read unless the caller holds the admin role.
///
/// Install it as a route layer under `with_sessions` so that the gate runs before the handlers
/// look at the request, and so that unsupported methods are rejected the same way.
pub async fn require_admin_for_writes(
    caller: Caller,
    request: Request,
    next: Next,
) -> Result<Response, RestError> {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        caller.require_admin()?;
    }
    Ok(next.run(request).await)
}

/// Wraps all routes in `router` with the middleware that identifies callers.
pub fn with_sessions(router: Router, driver: AuthnDriver) -> Router {
    router.layer(axum::middleware::from_fn_with_state(driver, resolve_session))
}
