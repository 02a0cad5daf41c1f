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

//! API to modify an existing actor.

use crate::driver::Driver;
use crate::model::{Actor, ActorUpdate};
use crate::rest::actor_post::ActorRequest;
use axum::extract::State;
use filmoteka_core::rest::{Envelope, JsonBody, RestError, RestResult};

/// PATCH handler for this API.
///
/// Empty properties in the request leave the corresponding properties of the actor unchanged.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<ActorRequest>,
) -> RestResult<Envelope<Actor>> {
    let id = request
        .actorid
        .ok_or_else(|| RestError::InvalidRequest("Missing actorid".to_owned()))?;
    let update = ActorUpdate::new(id, request.name, request.gender, request.date_of_birth)?;
    let actor = driver.update_actor(update).await?;
    Ok(Envelope::new("Actor updated", actor))
}
