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

//! Business logic for user authentication.

use crate::db::AuthnStore;
use crate::model::{AccessToken, Session};
use filmoteka_core::clocks::Clock;
use filmoteka_core::db::DbError;
use filmoteka_core::driver::{DriverError, DriverResult};
use filmoteka_core::env::get_optional_var;
use log::warn;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;

mod bootstrap;
mod login;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

/// Default value for the `SESSION_MAX_AGE` setting when not specified.
const DEFAULT_SESSION_MAX_AGE_SECONDS: u64 = 24 * 60 * 60;

/// Configuration options for the authentication driver.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct AuthnOptions {
    /// The amount of time we consider sessions valid for.
    pub session_max_age: Duration,

    /// Whether session cookies carry the `Secure` attribute.  Only meant to be disabled when
    /// serving over plain HTTP during local development.
    pub cookie_secure: bool,
}

impl Default for AuthnOptions {
    fn default() -> Self {
        Self {
            session_max_age: Duration::from_secs(DEFAULT_SESSION_MAX_AGE_SECONDS),
            cookie_secure: true,
        }
    }
}

impl AuthnOptions {
    /// Creates a new set of options from environment variables whose names start with `prefix`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            session_max_age: get_optional_var::<Duration>(prefix, "SESSION_MAX_AGE")?
                .unwrap_or_else(|| Duration::from_secs(DEFAULT_SESSION_MAX_AGE_SECONDS)),
            cookie_secure: get_optional_var::<bool>(prefix, "COOKIE_SECURE")?.unwrap_or(true),
        })
    }

    /// Returns the session lifetime to advertise in cookies, saturating if it does not fit.
    pub(crate) fn cookie_max_age(&self) -> time::Duration {
        time::Duration::try_from(self.session_max_age).unwrap_or(time::Duration::MAX)
    }
}

/// Business logic.
///
/// The public operations exposed by the driver consume it to make it clear that each of them
/// is a separate unit of work.  Cloning the driver is cheap.
#[derive(Clone)]
pub struct AuthnDriver {
    /// The storage that the driver uses for users and sessions.
    store: Arc<dyn AuthnStore>,

    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,

    /// Options for the authentication driver.
    opts: AuthnOptions,
}

impl AuthnDriver {
    /// Creates a new driver backed by the given dependencies.
    pub fn new(
        store: Arc<dyn AuthnStore>,
        clock: Arc<dyn Clock + Send + Sync>,
        opts: AuthnOptions,
    ) -> Self {
        Self { store, clock, opts }
    }

    /// Returns a reference to the authentication options provided at creation time.
    pub(crate) fn opts(&self) -> &AuthnOptions {
        &self.opts
    }

    /// Computes the login time at or before which sessions are expired.
    ///
    /// Returns none when the maximum age reaches past the epoch, in which case no session can
    /// have expired yet.
    fn expiry_cutoff(&self) -> Option<OffsetDateTime> {
        let max_age = time::Duration::try_from(self.opts.session_max_age).ok()?;
        self.clock
            .now_utc()
            .checked_sub(max_age)
            .filter(|cutoff| *cutoff > OffsetDateTime::UNIX_EPOCH)
    }

    /// Looks up the session identified by `token` and checks that it has not expired yet.
    ///
    /// Expired sessions are removed from storage on a best-effort basis.
    pub async fn get_session(self, token: AccessToken) -> DriverResult<Session> {
        let session = match self.store.get_session(&token).await {
            Ok(session) => session,
            Err(DbError::NotFound) => {
                return Err(DriverError::Unauthorized("Invalid session".to_owned()))
            }
            Err(e) => return Err(e.into()),
        };

        let expired = match self.expiry_cutoff() {
            Some(cutoff) => *session.login_time() <= cutoff,
            None => false,
        };
        if expired {
            if let Err(e) = self.store.delete_session(&token).await {
                warn!("Failed to delete expired session: {}", e);
            }
            return Err(DriverError::Unauthorized(
                "Session expired; please log in again".to_owned(),
            ));
        }

        Ok(session)
    }

    /// Deletes all sessions that have expired and returns how many there were.
    pub async fn purge_expired_sessions(self) -> DriverResult<u64> {
        match self.expiry_cutoff() {
            Some(cutoff) => Ok(self.store.delete_sessions_before(cutoff).await?),
            None => Ok(0),
        }
    }
}
