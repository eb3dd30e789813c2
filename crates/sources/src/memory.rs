//! In-memory catalog implementing all three source traits.
//!
//! Link scoping mirrors the server: an equality filter on `genre_id`.
//! Individual endpoints can be marked unavailable to simulate outages.

use crate::error::{FetchError, Result};
use crate::http::{GENRES_PATH, LINKS_PATH, MOVIES_PATH};
use crate::traits::{GenreSource, LinkSource, MovieSource};
use async_trait::async_trait;
use catalog::{Genre, GenreId, Movie, MovieGenreLink};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    genres: Vec<Genre>,
    movies: Vec<Movie>,
    links: Vec<MovieGenreLink>,
    unavailable: HashSet<&'static str>,
}

impl StaticCatalog {
    pub fn new(genres: Vec<Genre>, movies: Vec<Movie>, links: Vec<MovieGenreLink>) -> Self {
        Self {
            genres,
            movies,
            links,
            unavailable: HashSet::new(),
        }
    }

    /// Make requests to `path` (one of the endpoint paths) fail.
    pub fn with_unavailable(mut self, path: &'static str) -> Self {
        self.unavailable.insert(path);
        self
    }

    fn check(&self, path: &'static str) -> Result<()> {
        if self.unavailable.contains(path) {
            return Err(FetchError::Unavailable {
                endpoint: path.to_string(),
                reason: "marked unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GenreSource for StaticCatalog {
    async fn list_all(&self) -> Result<Vec<Genre>> {
        self.check(GENRES_PATH)?;
        Ok(self.genres.clone())
    }
}

#[async_trait]
impl MovieSource for StaticCatalog {
    async fn list_all(&self) -> Result<Vec<Movie>> {
        self.check(MOVIES_PATH)?;
        Ok(self.movies.clone())
    }
}

#[async_trait]
impl LinkSource for StaticCatalog {
    async fn list_links(&self, genre_id: Option<GenreId>) -> Result<Vec<MovieGenreLink>> {
        self.check(LINKS_PATH)?;
        let links: Vec<MovieGenreLink> = match genre_id {
            Some(genre_id) => self
                .links
                .iter()
                .filter(|link| link.genre_id == genre_id)
                .copied()
                .collect(),
            None => self.links.clone(),
        };
        debug!(?genre_id, count = links.len(), "Served links from memory");
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new(
            vec![Genre::new(5, "Horror"), Genre::new(6, "Comedy")],
            vec![Movie::new(1, "Alien"), Movie::new(2, "Airplane!")],
            vec![
                MovieGenreLink::new(1, 1, 5),
                MovieGenreLink::new(2, 2, 6),
                MovieGenreLink::new(3, 1, 6),
            ],
        )
    }

    #[tokio::test]
    async fn test_links_are_scoped_by_genre() {
        let catalog = catalog();

        let all = catalog.list_links(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let comedy = catalog.list_links(Some(6)).await.unwrap();
        assert_eq!(comedy.iter().map(|l| l.id).collect::<Vec<_>>(), vec![2, 3]);

        let unknown = catalog.list_links(Some(99)).await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_endpoint_fails_only_itself() {
        let catalog = catalog().with_unavailable(MOVIES_PATH);

        let err = MovieSource::list_all(&catalog).await.unwrap_err();
        assert_eq!(err.endpoint(), MOVIES_PATH);
        assert!(GenreSource::list_all(&catalog).await.is_ok());
        assert!(catalog.list_links(None).await.is_ok());
    }
}
