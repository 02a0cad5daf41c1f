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

//! The `Role` data type.

use filmoteka_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role claim attached to a user and to each of their sessions.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May read and modify the catalog.
    Admin,

    /// May only read the catalog.
    User,
}

impl Role {
    /// Returns the textual representation of the role as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(ModelError(format!("Unknown role '{}'", s))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::Admin, "admin".parse().unwrap());
        assert_eq!(Role::User, "user".parse().unwrap());
        assert_eq!(
            ModelError("Unknown role 'Admin'".to_owned()),
            "Admin".parse::<Role>().unwrap_err()
        );
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_ser_de() {
        assert_tokens(&Role::Admin, &[Token::UnitVariant { name: "Role", variant: "admin" }]);
        assert_tokens(&Role::User, &[Token::UnitVariant { name: "Role", variant: "user" }]);
    }
}
