//! Ordering stages.
//!
//! Both sorts are descending and stable (`slice::sort_by`), so movies
//! that compare equal keep their relative input order. Missing values
//! sort after every present value.

use crate::traits::{PipelineContext, Stage};
use catalog::Movie;
use std::cmp::Ordering;

/// Newest release year first.
pub struct ReleaseDateSort;

impl Stage for ReleaseDateSort {
    fn name(&self) -> &str {
        "ReleaseDateSort"
    }

    fn apply(&self, mut movies: Vec<Movie>, _context: &PipelineContext<'_>) -> Vec<Movie> {
        // `None < Some(_)`, so reversing the comparison puts unknown years last
        movies.sort_by(|a, b| b.year.cmp(&a.year));
        movies
    }
}

/// Highest rating first, unrated movies last.
pub struct RatingSort;

fn cmp_rating_desc(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Stage for RatingSort {
    fn name(&self) -> &str {
        "RatingSort"
    }

    fn apply(&self, mut movies: Vec<Movie>, _context: &PipelineContext<'_>) -> Vec<Movie> {
        movies.sort_by(|a, b| cmp_rating_desc(a.rating, b.rating));
        movies
    }
}
