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

//! API to get movies by identifier, by text search or sorted.

use crate::driver::Driver;
use crate::model::{MovieId, SortKey};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use filmoteka_core::rest::{EmptyBody, Envelope, QueryParams, RestError, RestResult};
use serde::Deserialize;

/// Query parameters for this API.  At most one of them can be set.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MovieQuery {
    /// Identifier of the single movie to get.
    id: Option<i32>,

    /// Ordering of the full list of movies.
    sort: Option<String>,

    /// Text to look for in the titles and descriptions of movies.
    #[serde(alias = "moviename")]
    name: Option<String>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<MovieQuery>,
    _: EmptyBody,
) -> RestResult<Response> {
    match (query.id, query.sort, query.name) {
        (Some(id), None, None) => {
            let movie = driver.get_movie(MovieId::new(id)).await?;
            Ok(Envelope::new("Movie retrieved", movie).into_response())
        }
        (None, None, Some(name)) => {
            let movies = driver.search_movies(name).await?;
            Ok(Envelope::new("Movies retrieved", movies).into_response())
        }
        (None, sort, None) => {
            let sort: SortKey = sort.as_deref().unwrap_or_default().parse()?;
            let movies = driver.get_movies(sort).await?;
            Ok(Envelope::new("Movies retrieved", movies).into_response())
        }
        _ => Err(RestError::InvalidRequest(
            "Only one of the id, sort and name parameters can be given".to_owned(),
        )),
    }
}
