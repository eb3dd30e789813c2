//! Stage implementations for the movie pipeline.
//!
//! This module contains the concrete stages that can be composed
//! into a FilterPipeline.

pub mod genre;
pub mod sort;

// Re-export for convenience
pub use genre::GenreFilter;
pub use sort::{RatingSort, ReleaseDateSort};
