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

//! The `Session` data type.

use crate::model::{AccessToken, Role};
use derive_getters::Getters;
use filmoteka_core::model::EmailAddress;
use time::OffsetDateTime;

/// Represents an authenticated session and the role claim it carries.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct Session {
    /// The access token for the session, which acts as its identifier.
    access_token: AccessToken,

    /// The email of the user that owns this session.
    email: EmailAddress,

    /// The role claim captured when the session was established.
    role: Role,

    /// Timestamp to represent when the session was initiated.
    login_time: OffsetDateTime,
}

impl Session {
    /// Creates a new session from its parts.
    pub fn new(
        access_token: AccessToken,
        email: EmailAddress,
        role: Role,
        login_time: OffsetDateTime,
    ) -> Self {
        Self { access_token, email, role, login_time }
    }

    /// Consumes the session and extracts its access token.
    pub fn take_access_token(self) -> AccessToken {
        self.access_token
    }
}
