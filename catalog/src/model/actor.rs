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

//! The `Actor` data type and its companions.

use crate::model::{check_length, check_required, dates, non_empty};
use derive_getters::Getters;
use filmoteka_core::model::ModelResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

/// Maximum length of an actor's name.
pub const MAX_ACTOR_NAME_LENGTH: usize = 100;

/// Identifier of an actor, assigned by storage.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActorId(i32);

impl ActorId {
    /// Wraps a raw identifier.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An actor as stored in the catalog.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct Actor {
    /// Identifier of the actor.
    #[serde(rename = "actorid")]
    id: ActorId,

    /// Full name of the actor.
    name: String,

    /// Free-form gender of the actor.
    gender: String,

    /// Date of birth of the actor, if known.
    #[serde(rename = "dateofbirth", with = "dates::optional", default)]
    date_of_birth: Option<Date>,
}

impl Actor {
    /// Creates a new actor from data that is already known to be valid.
    pub fn new(id: ActorId, name: String, gender: String, date_of_birth: Option<Date>) -> Self {
        Self { id, name, gender, date_of_birth }
    }
}

/// The data needed to create an actor.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct NewActor {
    /// Full name of the actor.
    name: String,

    /// Free-form gender of the actor.
    gender: String,

    /// Date of birth of the actor, if known.
    date_of_birth: Option<Date>,
}

impl NewActor {
    /// Validates the properties of a new actor.
    pub fn new(name: String, gender: String, date_of_birth: Option<Date>) -> ModelResult<Self> {
        check_required("Actor name", &name, MAX_ACTOR_NAME_LENGTH)?;
        check_length("Gender", &gender, MAX_ACTOR_NAME_LENGTH)?;
        Ok(Self { name, gender, date_of_birth })
    }

    /// Attaches the identifier assigned by storage to this actor.
    pub fn with_id(self, id: ActorId) -> Actor {
        Actor::new(id, self.name, self.gender, self.date_of_birth)
    }
}

/// A partial modification to an existing actor.  Properties set to `None` are left unchanged.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct ActorUpdate {
    /// Identifier of the actor to modify.
    id: ActorId,

    /// New name for the actor.
    name: Option<String>,

    /// New gender for the actor.
    gender: Option<String>,

    /// New date of birth for the actor.
    date_of_birth: Option<Date>,
}

impl ActorUpdate {
    /// Validates a modification to the actor `id`.  Empty strings mean "no change".
    pub fn new(
        id: ActorId,
        name: String,
        gender: String,
        date_of_birth: Option<Date>,
    ) -> ModelResult<Self> {
        check_length("Actor name", &name, MAX_ACTOR_NAME_LENGTH)?;
        check_length("Gender", &gender, MAX_ACTOR_NAME_LENGTH)?;
        Ok(Self { id, name: non_empty(name), gender: non_empty(gender), date_of_birth })
    }
}
