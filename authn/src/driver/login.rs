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

//! Extends the driver with the `login` method.

use crate::driver::AuthnDriver;
use crate::model::{AccessToken, Password, Session};
use filmoteka_core::db::DbError;
use filmoteka_core::driver::{DriverError, DriverResult};
use filmoteka_core::model::EmailAddress;
use log::{info, warn};

/// Error returned for all login attempts with a bad email and password combination.
fn invalid_credentials() -> DriverError {
    DriverError::Unauthorized("Invalid credentials".to_owned())
}

impl AuthnDriver {
    /// Logs a user with `email` and `password` in and returns the new session.
    ///
    /// Unknown users and wrong passwords fail with the same error.
    ///
    /// If the caller presented a `previous` session, that session is terminated so that tokens
    /// are never carried across logins.
    pub(crate) async fn login(
        self,
        email: EmailAddress,
        password: Password,
        previous: Option<AccessToken>,
    ) -> DriverResult<Session> {
        let user = match self.store.get_user_by_email(&email).await {
            Ok(user) => user,
            Err(DbError::NotFound) => {
                info!("Rejected login for unknown user {}", email.as_str());
                return Err(invalid_credentials());
            }
            Err(e) => return Err(e.into()),
        };

        let matches = password
            .verify(user.password())
            .map_err(|e| DriverError::BackendError(format!("Stored hash is unusable: {}", e)))?;
        if !matches {
            info!("Rejected login for {}: invalid password", email.as_str());
            return Err(invalid_credentials());
        }

        let role = match user.parsed_role() {
            Ok(role) => role,
            Err(e) => {
                info!("Rejected login for {}: {}", email.as_str(), e);
                return Err(DriverError::Unauthorized("Unrecognized role".to_owned()));
            }
        };

        let session = Session::new(AccessToken::generate(), email, role, self.clock.now_utc());
        self.store.put_session(&session).await?;

        if let Some(previous) = previous {
            if let Err(e) = self.store.delete_session(&previous).await {
                warn!("Failed to terminate previous session: {}", e);
            }
        }

        Ok(session)
    }
}
