//! # View Controller
//!
//! Synchronous state machine behind the catalog view. It decides which
//! fetches to issue, applies their completions to the [`CatalogStore`] and
//! recomputes the rendered sequence through the pipeline after every
//! change. It performs no I/O itself; the event loop in
//! [`crate::runtime`] executes the requests it returns.
//!
//! ## Phases
//! - `Loading`: initial load (or refresh) until movies and links resolved
//! - `Ready`: the pipeline output is what is shown
//! - `FilterChanging`: a genre change is waiting for its scoped links
//!
//! ## Staleness
//! Every request carries a ticket. Only the latest ticket per source is
//! outstanding; a completion with any other ticket is stale and ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use catalog::{FilterCriteria, Genre, GenreId, Movie, MovieGenreLink, SortCriterion};
use sources::FetchError;
use tracing::{debug, info, warn};

use crate::store::{CatalogStore, SnapshotUpdate};

/// Identifies one outstanding fetch.
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    FilterChanging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    Genres,
    Movies,
    Links,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Genres => "genres",
            SourceKind::Movies => "movies",
            SourceKind::Links => "movie-genre links",
        })
    }
}

/// A fetch the controller wants executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRequest {
    Genres { ticket: Ticket },
    Movies { ticket: Ticket },
    Links { ticket: Ticket, genre_id: Option<GenreId> },
}

impl FetchRequest {
    pub fn ticket(&self) -> Ticket {
        match *self {
            FetchRequest::Genres { ticket }
            | FetchRequest::Movies { ticket }
            | FetchRequest::Links { ticket, .. } => ticket,
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            FetchRequest::Genres { .. } => SourceKind::Genres,
            FetchRequest::Movies { .. } => SourceKind::Movies,
            FetchRequest::Links { .. } => SourceKind::Links,
        }
    }
}

/// The outcome of an executed [`FetchRequest`].
#[derive(Debug)]
pub enum FetchCompletion {
    Genres {
        ticket: Ticket,
        result: Result<Vec<Genre>, FetchError>,
    },
    Movies {
        ticket: Ticket,
        result: Result<Vec<Movie>, FetchError>,
    },
    Links {
        ticket: Ticket,
        genre_id: Option<GenreId>,
        result: Result<Vec<MovieGenreLink>, FetchError>,
    },
}

impl FetchCompletion {
    pub fn ticket(&self) -> Ticket {
        match *self {
            FetchCompletion::Genres { ticket, .. }
            | FetchCompletion::Movies { ticket, .. }
            | FetchCompletion::Links { ticket, .. } => ticket,
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            FetchCompletion::Genres { .. } => SourceKind::Genres,
            FetchCompletion::Movies { .. } => SourceKind::Movies,
            FetchCompletion::Links { .. } => SourceKind::Links,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The completion updated the store
    Applied,
    /// The completion was superseded by a newer request and discarded
    Stale,
}

/// A source whose last fetch failed; shown as a recoverable warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: SourceKind,
    pub message: String,
}

/// Everything needed to render the catalog view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    /// Loading indicator; cleared in `Ready` whatever the fetch outcomes were
    pub loading: bool,
    /// Pipeline output for the current snapshot
    pub movies: Arc<[Movie]>,
    pub genres: Arc<[Genre]>,
    /// The genre fetch has not resolved yet
    pub genres_loading: bool,
    pub criteria: FilterCriteria,
    /// Genre the shown link set was fetched for; differs from
    /// `criteria.selected_genre` while a genre change is in flight
    pub links_scope: Option<GenreId>,
    pub failures: Vec<SourceFailure>,
    pub revision: u64,
}

impl ViewState {
    pub fn has_error(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingLinks {
    ticket: Ticket,
    genre_id: Option<GenreId>,
}

pub struct ViewController {
    store: CatalogStore,
    next_ticket: Ticket,
    /// Set by a (re)load, cleared once movies and links both resolved
    loading: bool,
    pending_genres: Option<Ticket>,
    pending_movies: Option<Ticket>,
    pending_links: Option<PendingLinks>,
    failures: BTreeMap<SourceKind, String>,
    rendered: Arc<[Movie]>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::with_criteria(FilterCriteria::default())
    }

    /// Start from preselected criteria; the initial link fetch is scoped
    /// to `criteria.selected_genre`.
    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            store: CatalogStore::with_criteria(criteria),
            next_ticket: 1,
            loading: true,
            pending_genres: None,
            pending_movies: None,
            pending_links: None,
            failures: BTreeMap::new(),
            rendered: Arc::from(Vec::new()),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.pending_links.is_some() {
            Phase::FilterChanging
        } else {
            Phase::Ready
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.store.current_snapshot().criteria
    }

    /// Issue the initial concurrent fetches of genres, movies and links.
    pub fn start(&mut self) -> Vec<FetchRequest> {
        self.loading = true;
        self.failures.clear();

        let genres = self.issue_ticket();
        let movies = self.issue_ticket();
        self.pending_genres = Some(genres);
        self.pending_movies = Some(movies);
        let links = self.request_links(self.criteria().selected_genre);

        info!(genre = ?self.criteria().selected_genre, "Loading catalog");
        vec![
            FetchRequest::Genres { ticket: genres },
            FetchRequest::Movies { ticket: movies },
            links,
        ]
    }

    /// Re-fetch every collection wholesale; any outstanding fetch becomes stale.
    pub fn refresh(&mut self) -> Vec<FetchRequest> {
        info!("Refreshing catalog");
        self.start()
    }

    /// Change the selected genre. Returns the scoped link fetch to run,
    /// or `None` when the selection did not change.
    pub fn select_genre(&mut self, genre_id: Option<GenreId>) -> Option<FetchRequest> {
        let criteria = self.criteria();
        if criteria.selected_genre == genre_id {
            return None;
        }

        self.store.update(SnapshotUpdate::default().criteria(FilterCriteria {
            selected_genre: genre_id,
            ..criteria
        }));
        let request = self.request_links(genre_id);
        self.recompute();
        debug!(?genre_id, phase = ?self.phase(), "Genre selection changed");
        Some(request)
    }

    /// Change the sort order. Never fetches; returns whether anything changed.
    pub fn set_sort(&mut self, sort: SortCriterion) -> bool {
        let criteria = self.criteria();
        if criteria.sort == sort {
            return false;
        }
        self.store
            .update(SnapshotUpdate::default().criteria(FilterCriteria { sort, ..criteria }));
        self.recompute();
        true
    }

    /// Apply a finished fetch, unless a newer request superseded it.
    ///
    /// Failed fetches are logged and stored as empty collections so the
    /// pipeline always sees well-formed input.
    pub fn complete(&mut self, completion: FetchCompletion) -> Applied {
        let ticket = completion.ticket();
        let update = match completion {
            FetchCompletion::Genres { ticket, result } => {
                if self.pending_genres != Some(ticket) {
                    return self.stale(SourceKind::Genres, ticket);
                }
                self.pending_genres = None;
                let genres = self.settle(SourceKind::Genres, result);
                SnapshotUpdate::default().genres(genres)
            }
            FetchCompletion::Movies { ticket, result } => {
                if self.pending_movies != Some(ticket) {
                    return self.stale(SourceKind::Movies, ticket);
                }
                self.pending_movies = None;
                let movies = self.settle(SourceKind::Movies, result);
                SnapshotUpdate::default().movies(movies)
            }
            FetchCompletion::Links {
                ticket,
                genre_id,
                result,
            } => {
                let current = self.pending_links.filter(|pending| pending.ticket == ticket);
                let Some(pending) = current else {
                    return self.stale(SourceKind::Links, ticket);
                };
                if pending.genre_id != genre_id || self.criteria().selected_genre != genre_id {
                    return self.stale(SourceKind::Links, ticket);
                }
                self.pending_links = None;
                let links = self.settle(SourceKind::Links, result);
                SnapshotUpdate::default().links(genre_id, links)
            }
        };

        self.store.update(update);
        if self.loading && self.pending_movies.is_none() && self.pending_links.is_none() {
            self.loading = false;
            info!("Catalog ready");
        }
        self.recompute();
        debug!(ticket, phase = ?self.phase(), shown = self.rendered.len(), "Applied fetch");
        Applied::Applied
    }

    /// The state to render right now.
    pub fn view(&self) -> ViewState {
        let snapshot = self.store.current_snapshot();
        let phase = self.phase();
        ViewState {
            phase,
            loading: phase != Phase::Ready,
            movies: Arc::clone(&self.rendered),
            genres: Arc::clone(&snapshot.genres),
            genres_loading: self.pending_genres.is_some(),
            criteria: snapshot.criteria,
            links_scope: snapshot.links_scope,
            failures: self
                .failures
                .iter()
                .map(|(source, message)| SourceFailure {
                    source: *source,
                    message: message.clone(),
                })
                .collect(),
            revision: snapshot.revision,
        }
    }

    fn issue_ticket(&mut self) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    fn request_links(&mut self, genre_id: Option<GenreId>) -> FetchRequest {
        let ticket = self.issue_ticket();
        if let Some(previous) = self.pending_links.replace(PendingLinks { ticket, genre_id }) {
            debug!(superseded = previous.ticket, ticket, "Superseding in-flight link fetch");
        }
        FetchRequest::Links { ticket, genre_id }
    }

    fn settle<T>(&mut self, source: SourceKind, result: Result<Vec<T>, FetchError>) -> Vec<T> {
        match result {
            Ok(items) => {
                self.failures.remove(&source);
                items
            }
            Err(err) => {
                warn!(%source, error = %err, "Fetch failed, showing no {source}");
                self.failures.insert(source, err.to_string());
                Vec::new()
            }
        }
    }

    fn stale(&self, source: SourceKind, ticket: Ticket) -> Applied {
        debug!(%source, ticket, "Discarding stale response");
        Applied::Stale
    }

    fn recompute(&mut self) {
        let snapshot = self.store.current_snapshot();
        self.rendered = pipeline::apply(
            &snapshot.movies,
            &snapshot.links,
            snapshot.criteria.selected_genre,
            snapshot.criteria.sort,
        )
        .into();
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}
