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

//! API to remove an actor from a movie.

use crate::driver::Driver;
use crate::rest::actormovie_post::ActorMovieRequest;
use axum::extract::State;
use filmoteka_core::rest::{Envelope, JsonBody, RestResult};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<ActorMovieRequest>,
) -> RestResult<Envelope<ActorMovieRequest>> {
    let (actor, movie) = driver.delete_actor_from_movie(request.actorid, request.movieid).await?;
    let message =
        format!("Actor '{}' successfully deleted from the movie ({})", actor.name(), movie.title());
    Ok(Envelope::new(message, request))
}
