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

//! The `User` data type.

use crate::model::{HashedPassword, Role};
use derive_getters::Getters;
use filmoteka_core::model::{EmailAddress, ModelResult};

/// Represents a user account as stored in the database.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct User {
    /// The email address that identifies the user.
    email: EmailAddress,

    /// The hash of the user's password.
    password: HashedPassword,

    /// The role of the user, verbatim from the database.  Kept unparsed so that an unknown value
    /// only prevents this user from logging in instead of breaking every lookup.
    role: String,
}

impl User {
    /// Creates a new user from its parts.
    pub fn new<R: Into<String>>(email: EmailAddress, password: HashedPassword, role: R) -> Self {
        Self { email, password, role: role.into() }
    }

    /// Parses the raw role of the user.
    pub fn parsed_role(&self) -> ModelResult<Role> {
        self.role.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_parsed_role() {
        let email = EmailAddress::new("a@example.com").unwrap();
        let hash = HashedPassword::new("hash");
        let admin = User::new(email.clone(), hash.clone(), "admin");
        assert_eq!(Role::Admin, admin.parsed_role().unwrap());
        let user = User::new(email.clone(), hash.clone(), "user");
        assert_eq!(Role::User, user.parsed_role().unwrap());
        User::new(email, hash, "root").parsed_role().unwrap_err();
    }
}
