//! Core domain types for the movie catalog.
//!
//! The catalog is made of three independently fetched collections:
//! movies, genres and the links that associate them. None of them
//! references the others directly; the join happens in the pipeline.

use crate::error::UnknownSortCriterion;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie
pub type MovieId = u32;

/// Unique identifier for a genre
pub type GenreId = u32;

/// Unique identifier for a single movie-genre association row
pub type LinkId = u32;

// =============================================================================
// Catalog Entities
// =============================================================================

/// A movie as served by `GET /movies`.
///
/// Deserialization goes through the lenient wire row in [`crate::parser`],
/// so `year` and `rating` may arrive as numbers, numeric strings or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "crate::parser::MovieRow")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub plot: String,
    /// Release year, if known
    pub year: Option<i32>,
    /// Review score in `0.0..=10.0`, if known
    pub rating: Option<f32>,
    pub image_url: String,
    pub wikipedia_url: Option<String>,
}

impl Movie {
    /// Create a movie with only the identifying fields set.
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            plot: String::new(),
            year: None,
            rating: None,
            image_url: String::new(),
            wikipedia_url: None,
        }
    }

    /// Set the release year (builder pattern)
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the rating (builder pattern)
    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the plot (builder pattern)
    pub fn with_plot(mut self, plot: impl Into<String>) -> Self {
        self.plot = plot.into();
        self
    }

    /// Short plot teaser for cards: the first `max_chars` characters
    /// followed by an ellipsis.
    pub fn plot_excerpt(&self, max_chars: usize) -> String {
        let mut excerpt: String = self.plot.chars().take(max_chars).collect();
        excerpt.push_str("...");
        excerpt
    }
}

/// A genre as served by `GET /genres`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Genre {
    pub fn new(id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One edge of the many-to-many movie/genre relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieGenreLink {
    pub id: LinkId,
    pub movie_id: MovieId,
    pub genre_id: GenreId,
}

impl MovieGenreLink {
    pub fn new(id: LinkId, movie_id: MovieId, genre_id: GenreId) -> Self {
        Self {
            id,
            movie_id,
            genre_id,
        }
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// How the displayed movies are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortCriterion {
    /// Keep the order the movies arrived in
    #[default]
    None,
    /// Newest release year first
    ByReleaseDateDesc,
    /// Highest rating first, unrated last
    ByRatingDesc,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 3] = [
        SortCriterion::None,
        SortCriterion::ByReleaseDateDesc,
        SortCriterion::ByRatingDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortCriterion::None => "none",
            SortCriterion::ByReleaseDateDesc => "release-date",
            SortCriterion::ByRatingDesc => "rating",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriterion {
    type Err = UnknownSortCriterion;

    /// Accepts the kebab-case names as well as the `releaseDate` / `rating`
    /// option values used by the web front end (empty string means none).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortCriterion::None),
            "release-date" | "releaseDate" => Ok(SortCriterion::ByReleaseDateDesc),
            "rating" => Ok(SortCriterion::ByRatingDesc),
            other => Err(UnknownSortCriterion(other.to_string())),
        }
    }
}

/// The user-controlled inputs of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    /// `None` means "all genres"
    pub selected_genre: Option<GenreId>,
    pub sort: SortCriterion,
}

impl FilterCriteria {
    pub fn new(selected_genre: Option<GenreId>, sort: SortCriterion) -> Self {
        Self {
            selected_genre,
            sort,
        }
    }
}
