//! Decoding of the JSON collections served by the catalog endpoints.
//!
//! - `/genres`: `[{"id": 1, "name": "Drama"}, ...]`
//! - `/movies`: `[{"id": 1, "title": .., "plot": .., "year": .., "rating": ..,
//!   "imageUrl": .., "wikipediaUrl": ..}, ...]`
//! - `/movies_genres`: `[{"id": 1, "movie_id": 3, "genre_id": 5}, ...]`
//!
//! Movies are decoded leniently: numeric columns may be serialized as
//! strings by the backend, and out-of-range ratings are dropped rather
//! than failing the whole collection.

use crate::error::{DataError, Result};
use crate::types::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

const MAX_RATING: f32 = 10.0;

/// A numeric column that may arrive as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

/// Raw movie row as it appears on the wire.
#[doc(hidden)]
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRow {
    id: MovieId,
    title: String,
    #[serde(default)]
    plot: Option<String>,
    #[serde(default)]
    year: Option<Numeric>,
    #[serde(default)]
    rating: Option<Numeric>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    wikipedia_url: Option<String>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        let year = row.year.and_then(|value| parse_year(row.id, value));
        let rating = row.rating.and_then(|value| parse_rating(row.id, value));
        let wikipedia_url = row
            .wikipedia_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Movie {
            id: row.id,
            title: row.title,
            plot: row.plot.unwrap_or_default(),
            year,
            rating,
            image_url: row.image_url.unwrap_or_default(),
            wikipedia_url,
        }
    }
}

fn parse_year(movie_id: MovieId, value: Numeric) -> Option<i32> {
    let year = match &value {
        Numeric::Number(n) if n.fract() == 0.0 && n.abs() <= f64::from(i32::MAX) => {
            Some(*n as i32)
        }
        Numeric::Number(_) => None,
        Numeric::Text(s) if s.trim().is_empty() => return None,
        Numeric::Text(s) => s.trim().parse::<i32>().ok(),
    };
    if year.is_none() {
        warn!(movie_id, ?value, "Ignoring unparseable release year");
    }
    year
}

fn parse_rating(movie_id: MovieId, value: Numeric) -> Option<f32> {
    let rating = match &value {
        Numeric::Number(n) => Some(*n as f32),
        Numeric::Text(s) if s.trim().is_empty() => return None,
        Numeric::Text(s) => s.trim().parse::<f32>().ok(),
    };
    match rating {
        Some(r) if r.is_finite() && (0.0..=MAX_RATING).contains(&r) => Some(r),
        _ => {
            warn!(movie_id, ?value, "Ignoring rating outside 0-10");
            None
        }
    }
}

fn parse_collection<T: DeserializeOwned>(collection: &'static str, body: &[u8]) -> Result<Vec<T>> {
    serde_json::from_slice(body).map_err(|source| DataError::Json { collection, source })
}

/// Parse the body of `GET /genres`
pub fn parse_genres(body: &[u8]) -> Result<Vec<Genre>> {
    parse_collection("genres", body)
}

/// Parse the body of `GET /movies`
pub fn parse_movies(body: &[u8]) -> Result<Vec<Movie>> {
    parse_collection("movies", body)
}

/// Parse the body of `GET /movies_genres`
pub fn parse_links(body: &[u8]) -> Result<Vec<MovieGenreLink>> {
    parse_collection("movie-genre links", body)
}
