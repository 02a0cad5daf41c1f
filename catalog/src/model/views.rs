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

//! Composite views over actors and movies produced by relationship queries.

use crate::model::{ActorId, Movie};
use serde::{Deserialize, Serialize};

/// A movie together with the name of one of its actors.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MovieWithActor {
    /// The movie.
    #[serde(flatten)]
    pub movie: Movie,

    /// Name of the actor that matched the search.
    pub actor_name: String,
}

/// An actor together with all the movies they appear in.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ActorMovies {
    /// Identifier of the actor.
    pub actorid: ActorId,

    /// Name of the actor.
    pub name: String,

    /// Every movie the actor appears in.
    pub movies: Vec<Movie>,
}
