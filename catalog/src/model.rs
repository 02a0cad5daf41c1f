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

//! Data types for the catalog.

use filmoteka_core::model::{ModelError, ModelResult};

mod actor;
pub use actor::{Actor, ActorId, ActorUpdate, NewActor, MAX_ACTOR_NAME_LENGTH};
pub(crate) mod dates;
mod movie;
pub use movie::{
    Movie, MovieId, MovieUpdate, NewMovie, SortKey, MAX_DESCRIPTION_LENGTH, MAX_RATING,
    MAX_TITLE_LENGTH,
};
mod views;
pub use views::{ActorMovies, MovieWithActor};

/// Ensures that the `value` of the field called `what` is not longer than `max` characters.
fn check_length(what: &str, value: &str, max: usize) -> ModelResult<()> {
    if value.chars().count() > max {
        return Err(ModelError(format!("{} cannot be longer than {} characters", what, max)));
    }
    Ok(())
}

/// Ensures that the `value` of the field called `what` is not blank and not longer than `max`
/// characters.
fn check_required(what: &str, value: &str, max: usize) -> ModelResult<()> {
    if value.trim().is_empty() {
        return Err(ModelError(format!("{} cannot be empty", what)));
    }
    check_length(what, value, max)
}

/// Converts an empty string into `None`, which is how updates express "leave unchanged".
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_length() {
        check_length("Name", "", 3).unwrap();
        check_length("Name", "abc", 3).unwrap();
        check_length("Name", "ñññ", 3).unwrap();
        assert_eq!(
            ModelError("Name cannot be longer than 3 characters".to_owned()),
            check_length("Name", "abcd", 3).unwrap_err()
        );
    }

    #[test]
    fn test_check_required() {
        check_required("Title", "x", 3).unwrap();
        assert_eq!(
            ModelError("Title cannot be empty".to_owned()),
            check_required("Title", " \t", 3).unwrap_err()
        );
        check_required("Title", "abcd", 3).unwrap_err();
    }
}
