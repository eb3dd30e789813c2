//! The read contracts of the three catalog collections.
//!
//! Sources are held as `Arc<dyn ...>` and called from spawned tasks,
//! hence the `Send + Sync` bound.

use crate::error::Result;
use async_trait::async_trait;
use catalog::{Genre, GenreId, Movie, MovieGenreLink};

/// Exposes the full genre list.
#[async_trait]
pub trait GenreSource: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Genre>>;
}

/// Exposes the full movie list.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Movie>>;
}

/// Exposes movie-genre association rows.
#[async_trait]
pub trait LinkSource: Send + Sync {
    /// Returns every link when `genre_id` is `None`, otherwise only the
    /// links whose `genre_id` equals the argument.
    async fn list_links(&self, genre_id: Option<GenreId>) -> Result<Vec<MovieGenreLink>>;
}
