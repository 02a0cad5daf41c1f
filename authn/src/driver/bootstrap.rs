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

//! Extends the driver with the `ensure_user` method.

use crate::driver::AuthnDriver;
use crate::model::{Password, Role, User};
use filmoteka_core::db::DbError;
use filmoteka_core::driver::DriverResult;
use filmoteka_core::model::EmailAddress;
use log::info;

impl AuthnDriver {
    /// Makes sure that a user identified by `email` exists, creating it with `password` and
    /// `role` if it does not.  An existing user is left untouched.
    pub async fn ensure_user(
        self,
        email: EmailAddress,
        password: Password,
        role: Role,
    ) -> DriverResult<()> {
        match self.store.get_user_by_email(&email).await {
            Ok(_) => {
                info!("User {} already exists; not modifying it", email.as_str());
                return Ok(());
            }
            Err(DbError::NotFound) => (),
            Err(e) => return Err(e.into()),
        }

        let user = User::new(email, password.hash()?, role.as_str());
        match self.store.create_user(&user).await {
            Ok(()) => {
                info!("Created {} user {}", role, user.email().as_str());
                Ok(())
            }
            // Lost a race against a concurrent creation, which is fine.
            Err(DbError::AlreadyExists) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
