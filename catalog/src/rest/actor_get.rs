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

//! API to get one actor or all actors.

use crate::driver::Driver;
use crate::model::ActorId;
use crate::rest::IdQuery;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use filmoteka_core::rest::{EmptyBody, Envelope, QueryParams, RestResult};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<IdQuery>,
    _: EmptyBody,
) -> RestResult<Response> {
    match query.id {
        Some(id) => {
            let actor = driver.get_actor(ActorId::new(id)).await?;
            Ok(Envelope::new("Actor retrieved", actor).into_response())
        }
        None => {
            let actors = driver.get_actors().await?;
            Ok(Envelope::new("Actors retrieved", actors).into_response())
        }
    }
}
