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

//! API to create a new actor.

use crate::driver::Driver;
use crate::model::{dates, ActorId, NewActor};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use filmoteka_core::rest::{Envelope, JsonBody, RestResult};
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;
use time::Date;

/// Properties of an actor as sent by clients.  Omitted properties take empty values.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
#[serde(default)]
pub(crate) struct ActorRequest {
    /// Identifier of the actor.  Ignored on creation and required on modification.
    pub(crate) actorid: Option<ActorId>,

    /// Full name of the actor.
    pub(crate) name: String,

    /// Free-form gender of the actor.
    pub(crate) gender: String,

    /// Date of birth of the actor.
    #[serde(rename = "dateofbirth", with = "dates::optional")]
    pub(crate) date_of_birth: Option<Date>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<ActorRequest>,
) -> RestResult<impl IntoResponse> {
    let actor = NewActor::new(request.name, request.gender, request.date_of_birth)?;
    let actor = driver.create_actor(actor).await?;
    Ok((StatusCode::CREATED, Envelope::new("Actor created", actor)))
}
