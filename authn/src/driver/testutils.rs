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

//! Utilities to help testing the authentication driver.

use crate::db::{AuthnStore, SqliteAuthnStore};
use crate::driver::{AuthnDriver, AuthnOptions};
use crate::model::{AccessToken, Password, Role, User};
use filmoteka_core::clocks::testutils::SettableClock;
use filmoteka_core::model::EmailAddress;
use std::sync::Arc;
use time::OffsetDateTime;

/// State of a running test.
pub struct TestContext {
    /// The clock used by the driver, which tests can move at will.
    pub clock: Arc<SettableClock>,

    /// Direct access to the storage backing the driver.
    pub store: Arc<SqliteAuthnStore>,

    /// The driver to handle authentication flows.
    driver: AuthnDriver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database, a settable clock and the default
    /// options.
    pub async fn setup() -> Self {
        Self::setup_with_opts(AuthnOptions::default()).await
    }

    /// Initializes the driver using an in-memory database, a settable clock and `opts`.
    pub async fn setup_with_opts(opts: AuthnOptions) -> Self {
        let db = filmoteka_core::db::sqlite::testutils::setup().await;
        let store = Arc::from(SqliteAuthnStore::new(db));
        store.init_schema().await.unwrap();
        let clock = Arc::from(SettableClock::new(
            OffsetDateTime::from_unix_timestamp(1_710_095_400).unwrap(),
        ));
        let driver = AuthnDriver::new(store.clone(), clock.clone(), opts);
        Self { clock, store, driver }
    }

    /// Gets a copy of the driver in this test context.
    pub fn driver(&self) -> AuthnDriver {
        self.driver.clone()
    }

    /// Creates a user with `email`, `password` and `role`.
    pub async fn create_user(&self, email: &str, password: &'static str, role: Role) {
        let user = User::new(
            EmailAddress::new(email).unwrap(),
            Password::from(password).hash().unwrap(),
            role.as_str(),
        );
        self.store.create_user(&user).await.unwrap();
    }

    /// Creates a user with `email` and `role` and logs it in, returning the new session token.
    pub async fn do_test_login(&self, email: &str, role: Role) -> AccessToken {
        self.create_user(email, "test0password", role).await;
        let session = self
            .driver()
            .login(EmailAddress::new(email).unwrap(), Password::from("test0password"), None)
            .await
            .unwrap();
        session.take_access_token()
    }
}
