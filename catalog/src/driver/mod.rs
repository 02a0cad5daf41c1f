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

//! Business logic for the catalog.

use crate::db::CatalogStore;
use filmoteka_core::db::{DbError, DbResult};
use filmoteka_core::driver::{DriverError, DriverResult};
use std::sync::Arc;

mod actormovie;
mod actors;
mod movies;
#[cfg(test)]
pub(crate) mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver consume it to make it clear that each of them
/// is a separate unit of work.  Operations that touch more than one entity are not atomic.
#[derive(Clone)]
pub struct Driver {
    /// The storage that the driver uses for persistence.
    store: Arc<dyn CatalogStore>,
}

impl Driver {
    /// Creates a new driver backed by `store`.
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }
}

/// Converts a `NotFound` storage error in `result` into a driver error that carries the
/// user-facing `message`.  Any other error is converted as usual.
fn or_not_found<T, F>(result: DbResult<T>, message: F) -> DriverResult<T>
where
    F: FnOnce() -> String,
{
    match result {
        Ok(value) => Ok(value),
        Err(DbError::NotFound) => Err(DriverError::NotFound(message())),
        Err(e) => Err(e.into()),
    }
}

/// Fails with a `NotFound` error carrying `message` if `items` is empty.
fn non_empty<T, F>(items: Vec<T>, message: F) -> DriverResult<Vec<T>>
where
    F: FnOnce() -> String,
{
    if items.is_empty() {
        return Err(DriverError::NotFound(message()));
    }
    Ok(items)
}
