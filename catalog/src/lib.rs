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

//! REST service to maintain a catalog of movies and the actors that appear in them.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod db;
pub mod driver;
pub mod model;
mod rest;

#[cfg(feature = "postgres")]
use {
    crate::db::PostgresCatalogStore,
    crate::driver::Driver,
    filmoteka_authn::db::PostgresAuthnStore,
    filmoteka_authn::driver::{AuthnDriver, AuthnOptions},
    filmoteka_authn::model::{Password, Role},
    filmoteka_core::clocks::SystemClock,
    filmoteka_core::db::postgres::{PostgresDb, PostgresOptions},
    filmoteka_core::model::EmailAddress,
    log::{info, warn},
    std::error::Error,
    std::net::SocketAddr,
    std::sync::Arc,
    std::time::Duration,
};

/// Period between sweeps of expired sessions.
#[cfg(feature = "postgres")]
const SESSION_PURGE_PERIOD: Duration = Duration::from_secs(60 * 60);

/// Deletes expired sessions from storage every `SESSION_PURGE_PERIOD`.  Never returns.
#[cfg(feature = "postgres")]
async fn purge_sessions_periodically(authn: AuthnDriver) {
    let mut interval = tokio::time::interval(SESSION_PURGE_PERIOD);
    loop {
        interval.tick().await;
        match authn.clone().purge_expired_sessions().await {
            Ok(0) => (),
            Ok(count) => info!("Purged {} expired sessions", count),
            Err(e) => warn!("Failed to purge expired sessions: {}", e),
        }
    }
}

/// Waits until the process is asked to terminate.
#[cfg(feature = "postgres")]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
    }
    info!("Shutting down");
}

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// The database schema is created if it does not exist yet.  If `admin` is provided, the
/// administrator it describes is created unless a user with the same email already exists.
/// Expired sessions are purged in the background for as long as the server runs.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose
/// many crate-internal types to the public, which in turn would make dead code detection harder.
#[cfg(feature = "postgres")]
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db_opts: PostgresOptions,
    authn_opts: AuthnOptions,
    admin: Option<(EmailAddress, Password)>,
) -> Result<(), Box<dyn Error>> {
    let db = PostgresDb::connect(db_opts).await?;

    let catalog_store = PostgresCatalogStore::new(db.clone());
    catalog_store.init_schema().await?;
    let authn_store = PostgresAuthnStore::new(db.clone());
    authn_store.init_schema().await?;

    let authn =
        AuthnDriver::new(Arc::from(authn_store), Arc::from(SystemClock::default()), authn_opts);
    if let Some((email, password)) = admin {
        authn.clone().ensure_user(email, password, Role::Admin).await?;
    }
    let purger = tokio::spawn(purge_sessions_periodically(authn.clone()));
    let app = rest::app(Driver::new(Arc::from(catalog_store)), authn);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    info!("Listening on {}", listener.local_addr()?);
    let result = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await;

    purger.abort();
    db.close().await;
    Ok(result?)
}
