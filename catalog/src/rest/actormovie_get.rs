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

//! API to query the relationship between actors and movies.
//!
//! The `action` parameter selects the query to run and the other parameters provide its
//! arguments.  Without an `action`, the API searches movies by actor name.

use crate::driver::Driver;
use crate::model::{ActorId, Movie, MovieId};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use filmoteka_core::rest::{EmptyBody, Envelope, QueryParams, RestError, RestResult};
use serde::Deserialize;

/// Query parameters for this API.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ActorMovieQuery {
    /// Query to run: `getmovies`, `getactors` or `getactorandmovie`.
    action: Option<String>,

    /// Identifier of the actor for `getmovies`.
    actorid: Option<i32>,

    /// Identifier of the movie for `getactors` and `getactorandmovie`.
    movieid: Option<i32>,

    /// Fragment of the actor's name to search for.
    firstname: Option<String>,

    /// Another fragment of the actor's name to search for.
    lastname: Option<String>,
}

/// Formats `movie` for display in response messages.
fn describe(movie: &Movie) -> String {
    match movie.release_date() {
        Some(date) => format!("`{}` ({})", movie.title(), date.year()),
        None => format!("`{}`", movie.title()),
    }
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<ActorMovieQuery>,
    _: EmptyBody,
) -> RestResult<Response> {
    let invalid = || RestError::InvalidRequest("Invalid request".to_owned());

    match (query.action.as_deref(), query.actorid, query.movieid) {
        (Some("getmovies"), Some(actorid), _) => {
            let (actor, movies) = driver.get_movies_for_actor(ActorId::new(actorid)).await?;
            let message = format!("Movies retrieved for actor {}", actor.name());
            Ok(Envelope::new(message, movies).into_response())
        }

        (Some("getactors"), _, Some(movieid)) => {
            let (movie, actors) = driver.get_actors_for_movie(MovieId::new(movieid)).await?;
            let message = format!("Actors retrieved for movie {}", describe(&movie));
            Ok(Envelope::new(message, actors).into_response())
        }

        (Some("getactorandmovie"), _, Some(movieid)) => {
            let (movie, actors) =
                driver.get_actors_and_movies_for_movie(MovieId::new(movieid)).await?;
            let message = format!("Actors of the movie {} and their movies", movie.title());
            Ok(Envelope::new(message, actors).into_response())
        }

        (Some(_), _, _) => Err(invalid()),

        (None, _, _) => {
            let first = query.firstname.unwrap_or_default();
            let last = query.lastname.unwrap_or_default();
            if first.is_empty() && last.is_empty() {
                return Err(invalid());
            }

            let name = [first.as_str(), last.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<&str>>()
                .join(" ");
            let message = format!("Movies retrieved for actor {}", name);
            let movies = driver.search_movies_by_actor_name(first, last).await?;
            Ok(Envelope::new(message, movies).into_response())
        }
    }
}
