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

//! Building blocks shared by the Filmoteka crates.
//!
//! Services built on top of this crate adhere to the following layered architecture, and they
//! should structure their code to have these modules as well:
//!
//! 1.  `model`: The base layer, providing high-level data types that represent concepts in the
//!     domain of the application.  Types validate their contents at construction time so that
//!     the rest of the code can trust them.
//!
//! 1.  `db`: The persistence layer.  Services define one storage trait per entity and implement
//!     it once per supported database backend.
//!
//! 1.  `driver`: The business logic layer.  Services provide their own `Driver` type holding the
//!     storage implementations and coordinating calls into them.
//!
//! 1.  `rest`: The HTTP layer.  Services provide an `app` function returning an `axum::Router`
//!     backed by their `Driver`.
//!
//! 1.  `main`: The app launcher.  Gathers configuration from environment variables, connects to
//!     the database and starts serving.
//!
//! There are result and error types in every layer, such as `DbResult` and `DbError`.  Errors
//! float to the top of the app with the `?` operator and are translated to HTTP status codes
//! once returned from the REST layer.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
