//! The FilterPipeline orchestrates multiple stages.
//!
//! This module provides the FilterPipeline struct that chains stages
//! together using the builder pattern, and the `apply` entry point that
//! turns a criteria value into the displayed movie sequence.

use crate::filters::{GenreFilter, RatingSort, ReleaseDateSort};
use crate::traits::{PipelineContext, Stage};
use catalog::{FilterCriteria, GenreId, Movie, MovieGenreLink, SortCriterion};

/// Chains multiple stages together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_stage(GenreFilter::new(5))
///     .add_stage(RatingSort);
///
/// let shown = pipeline.run(movies.to_vec(), &PipelineContext::new(&links));
/// ```
pub struct FilterPipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Build the pipeline for a criteria value: the genre filter (when a
    /// genre is selected) followed by the selected sort (if any).
    pub fn for_criteria(criteria: &FilterCriteria) -> Self {
        let mut pipeline = Self::new();
        if let Some(genre_id) = criteria.selected_genre {
            pipeline = pipeline.add_stage(GenreFilter::new(genre_id));
        }
        match criteria.sort {
            SortCriterion::None => pipeline,
            SortCriterion::ByReleaseDateDesc => pipeline.add_stage(ReleaseDateSort),
            SortCriterion::ByRatingDesc => pipeline.add_stage(RatingSort),
        }
    }

    /// Add a stage to the pipeline (builder pattern).
    pub fn add_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Number of stages in the pipeline.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order over `movies`.
    pub fn run(&self, movies: Vec<Movie>, context: &PipelineContext<'_>) -> Vec<Movie> {
        let mut current = movies;
        for stage in &self.stages {
            tracing::debug!(
                "Applying stage: {} (input count: {})",
                stage.name(),
                current.len()
            );
            current = stage.apply(current, context);
            tracing::debug!(
                "Stage applied: {} (output count: {})",
                stage.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the displayed sequence from raw collections and criteria.
///
/// Pure: the inputs are borrowed and never modified; the result is a
/// fresh vector.
pub fn apply(
    movies: &[Movie],
    links: &[MovieGenreLink],
    selected_genre: Option<GenreId>,
    sort: SortCriterion,
) -> Vec<Movie> {
    let criteria = FilterCriteria::new(selected_genre, sort);
    FilterPipeline::for_criteria(&criteria).run(movies.to_vec(), &PipelineContext::new(links))
}
