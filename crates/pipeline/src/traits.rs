//! Core traits for the filtering pipeline.
//!
//! This module defines the Stage trait that allows composable
//! filters and sorts to be chained over a movie sequence.

use catalog::{Movie, MovieGenreLink};

/// Read-only inputs shared by every stage of a pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineContext<'a> {
    /// Link rows as fetched; may or may not be scoped to a genre
    pub links: &'a [MovieGenreLink],
}

impl<'a> PipelineContext<'a> {
    pub fn new(links: &'a [MovieGenreLink]) -> Self {
        Self { links }
    }
}

/// One step of the pipeline.
///
/// ## Design Note
/// - Stages take ownership of the Vec<Movie> and return the transformed Vec
/// - Stages never fail: the pipeline always receives well-formed inputs
pub trait Stage: Send + Sync {
    /// Returns the name of this stage (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this stage to the current movie sequence.
    fn apply(&self, movies: Vec<Movie>, context: &PipelineContext<'_>) -> Vec<Movie>;
}
