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

//! Entry point to the catalog service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use filmoteka::serve;
use filmoteka_authn::driver::AuthnOptions;
use filmoteka_authn::model::Password;
use filmoteka_core::db::postgres::PostgresOptions;
use filmoteka_core::env::get_optional_var;
use filmoteka_core::model::EmailAddress;
use std::net::Ipv4Addr;

/// Prefix of the environment variables that configure the service.
const ENV_PREFIX: &str = "FILMOTEKA";

/// Port to listen on when not configured.
const DEFAULT_PORT: u16 = 8080;

/// Reads the credentials of the administrator to create at startup, if any.
fn admin_from_env() -> Result<Option<(EmailAddress, Password)>, String> {
    let email = get_optional_var::<String>(ENV_PREFIX, "ADMIN_EMAIL")?;
    let password = get_optional_var::<String>(ENV_PREFIX, "ADMIN_PASSWORD")?;
    match (email, password) {
        (Some(email), Some(password)) => {
            let email = EmailAddress::new(email).map_err(|e| e.to_string())?;
            let password = Password::new(password).map_err(|e| e.to_string())?;
            Ok(Some((email, password)))
        }
        (None, None) => Ok(None),
        _ => Err(format!(
            "{0}_ADMIN_EMAIL and {0}_ADMIN_PASSWORD must be set together",
            ENV_PREFIX
        )),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let port = get_optional_var::<u16>(ENV_PREFIX, "PORT")
        .expect("Invalid port configuration")
        .unwrap_or(DEFAULT_PORT);
    let addr = (Ipv4Addr::UNSPECIFIED, port);

    let db_opts = PostgresOptions::from_env("PGSQL_PROD").expect("Invalid database configuration");
    let authn_opts = AuthnOptions::from_env(ENV_PREFIX).expect("Invalid session configuration");
    let admin = admin_from_env().expect("Invalid administrator configuration");

    serve(addr, db_opts, authn_opts, admin).await.unwrap()
}
