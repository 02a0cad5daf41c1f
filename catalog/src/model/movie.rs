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

//! The `Movie` data type and its companions.

use crate::model::{check_length, check_required, dates, non_empty};
use derive_getters::Getters;
use filmoteka_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Date;

/// Maximum length of a movie title.
pub const MAX_TITLE_LENGTH: usize = 150;

/// Maximum length of a movie description.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Highest rating a movie can have.  The lowest is zero.
pub const MAX_RATING: f64 = 10.0;

/// Identifier of a movie, assigned by storage.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MovieId(i32);

impl MovieId {
    /// Wraps a raw identifier.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ensures that `rating` is within the valid range.
fn check_rating(rating: f64) -> ModelResult<()> {
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ModelError(format!("Rating must be between 0 and {}", MAX_RATING)));
    }
    Ok(())
}

/// A movie as stored in the catalog.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub struct Movie {
    /// Identifier of the movie.
    #[serde(rename = "movieid")]
    id: MovieId,

    /// Title of the movie.
    #[serde(alias = "Title")]
    title: String,

    /// Synopsis of the movie.
    description: String,

    /// Rating of the movie.
    rating: f64,

    /// Release date of the movie, if known.
    #[serde(rename = "releasedate", with = "dates::optional", default)]
    release_date: Option<Date>,
}

impl Movie {
    /// Creates a new movie from data that is already known to be valid.
    pub fn new(
        id: MovieId,
        title: String,
        description: String,
        rating: f64,
        release_date: Option<Date>,
    ) -> Self {
        Self { id, title, description, rating, release_date }
    }
}

/// The data needed to create a movie.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct NewMovie {
    /// Title of the movie.
    title: String,

    /// Synopsis of the movie.
    description: String,

    /// Rating of the movie.
    rating: f64,

    /// Release date of the movie, if known.
    release_date: Option<Date>,
}

impl NewMovie {
    /// Validates the properties of a new movie.
    pub fn new(
        title: String,
        description: String,
        rating: f64,
        release_date: Option<Date>,
    ) -> ModelResult<Self> {
        check_required("Title", &title, MAX_TITLE_LENGTH)?;
        check_length("Description", &description, MAX_DESCRIPTION_LENGTH)?;
        check_rating(rating)?;
        Ok(Self { title, description, rating, release_date })
    }

    /// Attaches the identifier assigned by storage to this movie.
    pub fn with_id(self, id: MovieId) -> Movie {
        Movie::new(id, self.title, self.description, self.rating, self.release_date)
    }
}

/// A partial modification to an existing movie.  Properties set to `None` are left unchanged.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct MovieUpdate {
    /// Identifier of the movie to modify.
    id: MovieId,

    /// New title for the movie.
    title: Option<String>,

    /// New synopsis for the movie.
    description: Option<String>,

    /// New rating for the movie.
    rating: Option<f64>,

    /// New release date for the movie.
    release_date: Option<Date>,
}

impl MovieUpdate {
    /// Validates a modification to the movie `id`.
    ///
    /// Empty strings and a rating of exactly zero mean "no change".
    pub fn new(
        id: MovieId,
        title: String,
        description: String,
        rating: f64,
        release_date: Option<Date>,
    ) -> ModelResult<Self> {
        check_length("Title", &title, MAX_TITLE_LENGTH)?;
        check_length("Description", &description, MAX_DESCRIPTION_LENGTH)?;
        check_rating(rating)?;
        let rating = if rating == 0.0 { None } else { Some(rating) };
        Ok(Self {
            id,
            title: non_empty(title),
            description: non_empty(description),
            rating,
            release_date,
        })
    }
}

/// Orderings supported when listing movies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortKey {
    /// By release date, oldest first.
    ReleaseDate,

    /// By title, alphabetically.
    Title,

    /// By rating, best first.
    #[default]
    Rating,
}

impl FromStr for SortKey {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "date" => Ok(SortKey::ReleaseDate),
            "title" => Ok(SortKey::Title),
            "rating" | "" => Ok(SortKey::Rating),
            _ => Err(ModelError(format!("Unknown sort key '{}'", s))),
        }
    }
}
