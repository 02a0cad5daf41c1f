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

//! Implementation of the authentication storage using PostgreSQL.

use crate::db::AuthnStore;
use crate::model::{AccessToken, HashedPassword, Session, User};
use async_trait::async_trait;
use filmoteka_core::db::postgres::{map_sqlx_error, run_schema, PostgresDb};
use filmoteka_core::db::{with_timeout, DbError, DbResult};
use filmoteka_core::model::EmailAddress;
use sqlx::postgres::PgRow;
use sqlx::Row;
use time::OffsetDateTime;

/// Schema to use to initialize the database.
const SCHEMA: &str = include_str!("postgres.sql");

impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let email: String = row.try_get("email").map_err(map_sqlx_error)?;
        let password: String = row.try_get("password").map_err(map_sqlx_error)?;
        let role: String = row.try_get("role").map_err(map_sqlx_error)?;

        Ok(User::new(EmailAddress::new(email)?, HashedPassword::new(password), role))
    }
}

impl TryFrom<PgRow> for Session {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let access_token: String = row.try_get("access_token").map_err(map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(map_sqlx_error)?;
        let role: String = row.try_get("role").map_err(map_sqlx_error)?;
        let login_time: OffsetDateTime = row.try_get("login_time").map_err(map_sqlx_error)?;

        Ok(Session::new(
            AccessToken::new(access_token)?,
            EmailAddress::new(email)?,
            role.parse()?,
            login_time,
        ))
    }
}

/// Authentication storage backed by a PostgreSQL database.
#[derive(Clone)]
pub struct PostgresAuthnStore {
    /// Connection to the database.
    db: PostgresDb,
}

impl PostgresAuthnStore {
    /// Creates a new store on top of an open database.
    pub fn new(db: PostgresDb) -> Self {
        Self { db }
    }

    /// Creates the tables needed by this store if they do not exist yet.
    pub async fn init_schema(&self) -> DbResult<()> {
        run_schema(self.db.pool(), SCHEMA).await
    }
}

#[async_trait]
impl AuthnStore for PostgresAuthnStore {
    async fn create_user(&self, user: &User) -> DbResult<()> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "INSERT INTO users (email, password, role) VALUES ($1, $2, $3)";
            sqlx::query(query_str)
                .bind(user.email().as_str())
                .bind(user.password().as_str())
                .bind(user.role())
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        })
        .await
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> DbResult<User> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "SELECT email, password, role FROM users WHERE email = $1";
            let row = sqlx::query(query_str)
                .bind(email.as_str())
                .fetch_one(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            User::try_from(row)
        })
        .await
    }

    async fn put_session(&self, session: &Session) -> DbResult<()> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "
                INSERT INTO sessions (access_token, email, role, login_time)
                VALUES ($1, $2, $3, $4)
            ";
            sqlx::query(query_str)
                .bind(session.access_token().as_str())
                .bind(session.email().as_str())
                .bind(session.role().as_str())
                .bind(session.login_time())
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        })
        .await
    }

    async fn get_session(&self, token: &AccessToken) -> DbResult<Session> {
        with_timeout(self.db.query_timeout(), async {
            let query_str = "
                SELECT access_token, email, role, login_time FROM sessions
                WHERE access_token = $1
            ";
            let row = sqlx::query(query_str)
                .bind(token.as_str())
                .fetch_one(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            Session::try_from(row)
        })
        .await
    }

    async fn delete_session(&self, token: &AccessToken) -> DbResult<()> {
        with_timeout(self.db.query_timeout(), async {
            sqlx::query("DELETE FROM sessions WHERE access_token = $1")
                .bind(token.as_str())
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            Ok(())
        })
        .await
    }

    async fn delete_sessions_before(&self, cutoff: OffsetDateTime) -> DbResult<u64> {
        with_timeout(self.db.query_timeout(), async {
            let done = sqlx::query("DELETE FROM sessions WHERE login_time <= $1")
                .bind(cutoff)
                .execute(self.db.pool())
                .await
                .map_err(map_sqlx_error)?;
            Ok(done.rows_affected())
        })
        .await
    }
}
