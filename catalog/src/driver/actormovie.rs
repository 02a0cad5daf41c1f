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

//! Extends the driver with operations on the relationship between actors and movies.

use crate::driver::{non_empty, Driver};
use crate::model::{Actor, ActorId, ActorMovies, Movie, MovieId, MovieWithActor};
use filmoteka_core::driver::DriverResult;

impl Driver {
    /// Looks up both ends of an actor-movie link, failing if either does not exist.
    async fn get_link_ends(&self, actor: ActorId, movie: MovieId) -> DriverResult<(Actor, Movie)> {
        let actor = self.clone().get_actor(actor).await?;
        let movie = self.clone().get_movie(movie).await?;
        Ok((actor, movie))
    }

    /// Links the actor `actor_id` to the movie `movie_id` and returns both entities.
    pub async fn add_actor_to_movie(
        self,
        actor_id: ActorId,
        movie_id: MovieId,
    ) -> DriverResult<(Actor, Movie)> {
        let (actor, movie) = self.get_link_ends(actor_id, movie_id).await?;
        self.store.add_actor_to_movie(actor_id, movie_id).await?;
        Ok((actor, movie))
    }

    /// Unlinks the actor `actor_id` from the movie `movie_id` and returns both entities.
    ///
    /// Both entities must exist but the link itself need not.
    pub async fn delete_actor_from_movie(
        self,
        actor_id: ActorId,
        movie_id: MovieId,
    ) -> DriverResult<(Actor, Movie)> {
        let (actor, movie) = self.get_link_ends(actor_id, movie_id).await?;
        self.store.delete_actor_from_movie(actor_id, movie_id).await?;
        Ok((actor, movie))
    }

    /// Gets the movie `movie_id` and the actors that appear in it.
    pub async fn get_actors_for_movie(
        self,
        movie_id: MovieId,
    ) -> DriverResult<(Movie, Vec<Actor>)> {
        let movie = self.clone().get_movie(movie_id).await?;
        let actors = self.store.get_actors_for_movie(movie_id).await?;
        Ok((movie, actors))
    }

    /// Gets the actor `actor_id` and the movies they appear in.
    pub async fn get_movies_for_actor(
        self,
        actor_id: ActorId,
    ) -> DriverResult<(Actor, Vec<Movie>)> {
        let actor = self.clone().get_actor(actor_id).await?;
        let movies = self.store.get_movies_for_actor(actor_id).await?;
        Ok((actor, movies))
    }

    /// Gets the movie `movie_id` and, for each of its actors, every movie they appear in.
    pub async fn get_actors_and_movies_for_movie(
        self,
        movie_id: MovieId,
    ) -> DriverResult<(Movie, Vec<ActorMovies>)> {
        let movie = self.clone().get_movie(movie_id).await?;
        let actors = self.store.get_actors_for_movie(movie_id).await?;

        let mut result = Vec::with_capacity(actors.len());
        for actor in actors {
            let movies = self.store.get_movies_for_actor(*actor.id()).await?;
            result.push(ActorMovies { actorid: *actor.id(), name: actor.name().clone(), movies });
        }
        Ok((movie, result))
    }

    /// Gets the movies of every actor whose name contains both `first` and `last`, ignoring case.
    pub async fn search_movies_by_actor_name(
        self,
        first: String,
        last: String,
    ) -> DriverResult<Vec<MovieWithActor>> {
        let movies = self.store.search_movies_by_actor_name(&first, &last).await?;
        non_empty(movies, || format!("No movies found for actor '{} {}'", first, last))
    }
}

#[cfg(test)]
mod tests {
    use crate::driver::testutils::*;
    use crate::model::*;
    use filmoteka_core::driver::DriverError;

    #[tokio::test]
    async fn test_add_actor_to_movie_ok() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Sigourney Weaver").await;
        let movie = context.put_movie("Alien", 8.5).await;

        let (got_actor, got_movie) =
            context.driver().add_actor_to_movie(*actor.id(), *movie.id()).await.unwrap();
        assert_eq!(actor, got_actor);
        assert_eq!(movie, got_movie);

        let (_, actors) = context.driver().get_actors_for_movie(*movie.id()).await.unwrap();
        assert_eq!(vec![actor], actors);
    }

    #[tokio::test]
    async fn test_add_actor_to_movie_missing_ends() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Sigourney Weaver").await;
        let movie = context.put_movie("Alien", 8.5).await;

        match context.driver().add_actor_to_movie(ActorId::new(100), *movie.id()).await {
            Err(DriverError::NotFound(msg)) => assert_eq!("Actor 100 not found", msg),
            e => panic!("{:?}", e),
        }
        match context.driver().add_actor_to_movie(*actor.id(), MovieId::new(200)).await {
            Err(DriverError::NotFound(msg)) => assert_eq!("Movie 200 not found", msg),
            e => panic!("{:?}", e),
        }

        let (_, actors) = context.driver().get_actors_for_movie(*movie.id()).await.unwrap();
        assert!(actors.is_empty());
    }

    #[tokio::test]
    async fn test_add_actor_to_movie_twice() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Sigourney Weaver").await;
        let movie = context.put_movie("Alien", 8.5).await;

        context.driver().add_actor_to_movie(*actor.id(), *movie.id()).await.unwrap();
        match context.driver().add_actor_to_movie(*actor.id(), *movie.id()).await {
            Err(DriverError::AlreadyExists(_)) => (),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_delete_actor_from_movie() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Sigourney Weaver").await;
        let movie = context.put_movie("Alien", 8.5).await;
        context.link(&actor, &movie).await;

        let (got_actor, got_movie) =
            context.driver().delete_actor_from_movie(*actor.id(), *movie.id()).await.unwrap();
        assert_eq!((actor.clone(), movie.clone()), (got_actor, got_movie));

        let (_, movies) = context.driver().get_movies_for_actor(*actor.id()).await.unwrap();
        assert!(movies.is_empty());

        // The link is gone but both ends still exist, which is all that is checked.
        context.driver().delete_actor_from_movie(*actor.id(), *movie.id()).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_for_missing_anchor() {
        let context = TestContext::setup().await;

        match context.driver().get_actors_for_movie(MovieId::new(1)).await {
            Err(DriverError::NotFound(msg)) => assert_eq!("Movie 1 not found", msg),
            e => panic!("{:?}", e),
        }
        match context.driver().get_movies_for_actor(ActorId::new(1)).await {
            Err(DriverError::NotFound(msg)) => assert_eq!("Actor 1 not found", msg),
            e => panic!("{:?}", e),
        }
        match context.driver().get_actors_and_movies_for_movie(MovieId::new(1)).await {
            Err(DriverError::NotFound(msg)) => assert_eq!("Movie 1 not found", msg),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_get_actors_and_movies_for_movie() {
        let context = TestContext::setup().await;
        let keanu = context.put_actor("Keanu Reeves").await;
        let carrie = context.put_actor("Carrie-Anne Moss").await;
        let matrix = context.put_movie("The Matrix", 8.7).await;
        let wick = context.put_movie("John Wick", 7.4).await;
        let memento = context.put_movie("Memento", 8.4).await;
        context.link(&keanu, &matrix).await;
        context.link(&keanu, &wick).await;
        context.link(&carrie, &matrix).await;
        context.link(&carrie, &memento).await;

        let (movie, result) =
            context.driver().get_actors_and_movies_for_movie(*matrix.id()).await.unwrap();
        assert_eq!(matrix, movie);
        assert_eq!(
            vec![
                ActorMovies {
                    actorid: *carrie.id(),
                    name: "Carrie-Anne Moss".to_owned(),
                    movies: vec![memento, matrix.clone()],
                },
                ActorMovies {
                    actorid: *keanu.id(),
                    name: "Keanu Reeves".to_owned(),
                    movies: vec![wick, matrix.clone()],
                },
            ],
            result
        );
    }

    #[tokio::test]
    async fn test_search_movies_by_actor_name() {
        let context = TestContext::setup().await;
        let actor = context.put_actor("Tom Hanks").await;
        let movie = context.put_movie("Big", 7.3).await;
        context.link(&actor, &movie).await;

        let found = context
            .driver()
            .search_movies_by_actor_name("tom".to_owned(), "".to_owned())
            .await
            .unwrap();
        assert_eq!(vec![MovieWithActor { movie, actor_name: "Tom Hanks".to_owned() }], found);

        match context
            .driver()
            .search_movies_by_actor_name("Tom".to_owned(), "Cruise".to_owned())
            .await
        {
            Err(DriverError::NotFound(msg)) => {
                assert_eq!("No movies found for actor 'Tom Cruise'", msg)
            }
            e => panic!("{:?}", e),
        }
    }
}
