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

//! API to modify an existing movie.

use crate::driver::Driver;
use crate::model::{Movie, MovieUpdate};
use crate::rest::movie_post::MovieRequest;
use axum::extract::State;
use filmoteka_core::rest::{Envelope, JsonBody, RestError, RestResult};

/// PATCH handler for this API.
///
/// Empty strings, a zero rating and a missing release date leave the corresponding properties of
/// the movie unchanged.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<MovieRequest>,
) -> RestResult<Envelope<Movie>> {
    let id = request
        .movieid
        .ok_or_else(|| RestError::InvalidRequest("Missing movieid".to_owned()))?;
    let update = MovieUpdate::new(
        id,
        request.title,
        request.description,
        request.rating,
        request.release_date,
    )?;
    let movie = driver.update_movie(update).await?;
    Ok(Envelope::new("Movie updated", movie))
}
