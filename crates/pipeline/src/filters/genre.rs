//! Filter to keep only movies linked to the selected genre.

use crate::traits::{PipelineContext, Stage};
use catalog::{GenreId, Movie, MovieId};
use std::collections::HashSet;

/// Keeps the movies that at least one link associates with `genre_id`.
///
/// ## Algorithm
/// 1. Collect the movie ids of every link whose genre matches into a HashSet
///    (links for other genres are ignored, so scoped and unscoped link sets
///    give the same answer, and duplicate rows collapse)
/// 2. Retain movies whose id is in the set, preserving input order
///
/// Links pointing at movies that are not in the input simply never match.
pub struct GenreFilter {
    genre_id: GenreId,
}

impl GenreFilter {
    pub fn new(genre_id: GenreId) -> Self {
        Self { genre_id }
    }

    fn allowed_movie_ids(&self, context: &PipelineContext<'_>) -> HashSet<MovieId> {
        context
            .links
            .iter()
            .filter(|link| link.genre_id == self.genre_id)
            .map(|link| link.movie_id)
            .collect()
    }
}

impl Stage for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply(&self, movies: Vec<Movie>, context: &PipelineContext<'_>) -> Vec<Movie> {
        let allowed = self.allowed_movie_ids(context);
        movies
            .into_iter()
            .filter(|movie| allowed.contains(&movie.id))
            .collect()
    }
}
