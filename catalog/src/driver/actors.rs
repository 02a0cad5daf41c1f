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

//! Extends the driver with operations on actors.

use crate::driver::{non_empty, or_not_found, Driver};
use crate::model::{Actor, ActorId, ActorUpdate, NewActor};
use filmoteka_core::driver::DriverResult;

impl Driver {
    /// Gets all actors sorted by name.
    pub async fn get_actors(self) -> DriverResult<Vec<Actor>> {
        let actors = self.store.get_actors().await?;
        non_empty(actors, || "No actors found".to_owned())
    }

    /// Creates a new actor and returns it with its assigned identifier.
    pub async fn create_actor(self, actor: NewActor) -> DriverResult<Actor> {
        let id = self.store.create_actor(&actor).await?;
        Ok(actor.with_id(id))
    }

    /// Gets the actor identified by `id`.
    pub async fn get_actor(self, id: ActorId) -> DriverResult<Actor> {
        or_not_found(self.store.get_actor(id).await, || format!("Actor {} not found", id))
    }

    /// Applies `update` to an existing actor and returns its new state.
    pub async fn update_actor(self, update: ActorUpdate) -> DriverResult<Actor> {
        let id = *update.id();
        or_not_found(self.store.update_actor(&update).await, || {
            format!("Actor {} not found", id)
        })?;
        self.get_actor(id).await
    }

    /// Deletes the actor identified by `id`.  Deleting an actor that does not exist succeeds.
    pub async fn delete_actor(self, id: ActorId) -> DriverResult<()> {
        Ok(self.store.delete_actor(id).await?)
    }
}
