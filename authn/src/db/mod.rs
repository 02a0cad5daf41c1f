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

//! Database abstraction in terms of the operations needed by authentication.

use crate::model::{AccessToken, Session, User};
use async_trait::async_trait;
use filmoteka_core::db::DbResult;
use filmoteka_core::model::EmailAddress;
use time::OffsetDateTime;

#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub use postgres::PostgresAuthnStore;
#[cfg(any(feature = "sqlite", test))]
mod sqlite;
#[cfg(any(feature = "sqlite", test))]
pub use sqlite::SqliteAuthnStore;

/// Storage for users and their sessions.
#[async_trait]
pub trait AuthnStore: Send + Sync {
    /// Creates a new user.  Fails with `AlreadyExists` if the email is already taken.
    async fn create_user(&self, user: &User) -> DbResult<()>;

    /// Gets the user identified by `email`.
    async fn get_user_by_email(&self, email: &EmailAddress) -> DbResult<User>;

    /// Saves a new session.  The user it refers to must exist.
    async fn put_session(&self, session: &Session) -> DbResult<()>;

    /// Gets the session identified by `token`.
    async fn get_session(&self, token: &AccessToken) -> DbResult<Session>;

    /// Deletes the session identified by `token`.  Deleting an unknown session is not an error.
    async fn delete_session(&self, token: &AccessToken) -> DbResult<()>;

    /// Deletes all sessions that logged in at or before `cutoff` and returns how many there were.
    async fn delete_sessions_before(&self, cutoff: OffsetDateTime) -> DbResult<u64>;
}
