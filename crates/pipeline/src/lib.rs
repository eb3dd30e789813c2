//! Pipeline for joining, filtering and ordering the movie catalog.
//!
//! This crate provides:
//! - Stage trait and implementations for genre filtering and sorting
//! - FilterPipeline for composing stages
//! - `apply`, the pure function from raw collections to displayed movies
//!
//! ## Architecture
//! The pipeline processes movies in stages:
//! 1. GenreFilter keeps movies linked to the selected genre (if any)
//! 2. ReleaseDateSort or RatingSort orders the survivors (if requested)
//!
//! ## Example Usage
//! ```ignore
//! use catalog::SortCriterion;
//!
//! let shown = pipeline::apply(&movies, &links, Some(genre_id), SortCriterion::ByRatingDesc);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use filter_pipeline::{FilterPipeline, apply};
pub use traits::{PipelineContext, Stage};
