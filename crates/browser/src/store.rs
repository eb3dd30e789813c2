//! # Catalog Store
//!
//! The single piece of mutable state in the browser: the three raw
//! collections plus the current filter criteria.
//!
//! Every update builds a new immutable [`CatalogSnapshot`] and swaps it in
//! whole, so a reader holding an `Arc<CatalogSnapshot>` never observes a
//! half-applied update (for example new movies next to old links).

use std::sync::Arc;

use catalog::{FilterCriteria, Genre, GenreId, Movie, MovieGenreLink};

/// A fully-formed, self-consistent view of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub movies: Arc<[Movie]>,
    pub genres: Arc<[Genre]>,
    pub links: Arc<[MovieGenreLink]>,
    /// Genre the current link set was fetched for (`None` = unscoped)
    pub links_scope: Option<GenreId>,
    pub criteria: FilterCriteria,
    /// Incremented by every applied update
    pub revision: u64,
}

impl CatalogSnapshot {
    fn empty(criteria: FilterCriteria) -> Self {
        Self {
            movies: Arc::from(Vec::new()),
            genres: Arc::from(Vec::new()),
            links: Arc::from(Vec::new()),
            links_scope: None,
            criteria,
            revision: 0,
        }
    }
}

/// The fields an update replaces; everything left unset is preserved.
///
/// ```ignore
/// store.update(SnapshotUpdate::default().movies(movies));
/// store.update(SnapshotUpdate::default().links(Some(5), links).criteria(criteria));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotUpdate {
    movies: Option<Vec<Movie>>,
    genres: Option<Vec<Genre>>,
    links: Option<(Option<GenreId>, Vec<MovieGenreLink>)>,
    criteria: Option<FilterCriteria>,
}

impl SnapshotUpdate {
    pub fn movies(mut self, movies: Vec<Movie>) -> Self {
        self.movies = Some(movies);
        self
    }

    pub fn genres(mut self, genres: Vec<Genre>) -> Self {
        self.genres = Some(genres);
        self
    }

    /// Replace the link set along with the genre it was scoped to.
    pub fn links(mut self, scope: Option<GenreId>, links: Vec<MovieGenreLink>) -> Self {
        self.links = Some((scope, links));
        self
    }

    pub fn criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_none()
            && self.genres.is_none()
            && self.links.is_none()
            && self.criteria.is_none()
    }
}

#[derive(Debug)]
pub struct CatalogStore {
    current: Arc<CatalogSnapshot>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::with_criteria(FilterCriteria::default())
    }

    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            current: Arc::new(CatalogSnapshot::empty(criteria)),
        }
    }

    /// The snapshot as of the last applied update.
    pub fn current_snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current)
    }

    /// Apply `update` and return the resulting snapshot.
    ///
    /// An empty update leaves the store (and its revision) untouched.
    pub fn update(&mut self, update: SnapshotUpdate) -> Arc<CatalogSnapshot> {
        if update.is_empty() {
            return self.current_snapshot();
        }

        let mut next = CatalogSnapshot::clone(&self.current);
        if let Some(movies) = update.movies {
            next.movies = movies.into();
        }
        if let Some(genres) = update.genres {
            next.genres = genres.into();
        }
        if let Some((scope, links)) = update.links {
            next.links = links.into();
            next.links_scope = scope;
        }
        if let Some(criteria) = update.criteria {
            next.criteria = criteria;
        }
        next.revision += 1;

        self.current = Arc::new(next);
        self.current_snapshot()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
