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

//! API to create a new movie.

use crate::driver::Driver;
use crate::model::{dates, MovieId, NewMovie};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use filmoteka_core::rest::{Envelope, JsonBody, RestResult};
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;
use time::Date;

/// Properties of a movie as sent by clients.  Omitted properties take empty values.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
#[serde(default)]
pub(crate) struct MovieRequest {
    /// Identifier of the movie.  Ignored on creation and required on modification.
    pub(crate) movieid: Option<MovieId>,

    /// Title of the movie.
    #[serde(alias = "Title")]
    pub(crate) title: String,

    /// Synopsis of the movie.
    pub(crate) description: String,

    /// Rating of the movie.
    pub(crate) rating: f64,

    /// Release date of the movie.
    #[serde(rename = "releasedate", with = "dates::optional")]
    pub(crate) release_date: Option<Date>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<MovieRequest>,
) -> RestResult<impl IntoResponse> {
    let movie =
        NewMovie::new(request.title, request.description, request.rating, request.release_date)?;
    let movie = driver.create_movie(movie).await?;
    Ok((StatusCode::CREATED, Envelope::new("Movie created", movie)))
}
