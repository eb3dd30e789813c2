//! # Catalog Crate
//!
//! Domain types for the movie catalog browser and the decoding of the
//! JSON collections the catalog endpoints serve.
//!
//! ## Main Components
//!
//! - **types**: Movie, Genre, MovieGenreLink and the FilterCriteria driving the view
//! - **parser**: Decode `/genres`, `/movies` and `/movies_genres` bodies
//! - **error**: Error types for decoding
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{parse_movies, SortCriterion};
//!
//! let movies = parse_movies(body)?;
//! let sort: SortCriterion = "rating".parse()?;
//! ```

pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataError, Result, UnknownSortCriterion};
pub use parser::{parse_genres, parse_links, parse_movies};
pub use types::{
    // Type aliases
    GenreId,
    LinkId,
    MovieId,
    // Core types
    FilterCriteria,
    Genre,
    Movie,
    MovieGenreLink,
    SortCriterion,
};
