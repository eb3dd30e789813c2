//! # Browser Runtime
//!
//! Runs a [`ViewController`] as a single tokio task (the event loop).
//!
//! - Fetches execute as spawned tasks; their completions come back over
//!   an mpsc channel, so the controller and its store have one writer
//! - A newer request for the same source aborts the older task
//! - The rendered [`ViewState`] is published on a watch channel after
//!   every change
//! - The loop stops once every [`BrowserHandle`] has been dropped

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use catalog::{FilterCriteria, GenreId, SortCriterion};
use sources::{GenreSource, LinkSource, MovieSource};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info};

use crate::controller::{
    Applied, FetchCompletion, FetchRequest, Phase, SourceKind, Ticket, ViewController, ViewState,
};

const COMMAND_QUEUE: usize = 32;

/// The three collaborators the browser reads from.
#[derive(Clone)]
pub struct CatalogSources {
    pub genres: Arc<dyn GenreSource>,
    pub movies: Arc<dyn MovieSource>,
    pub links: Arc<dyn LinkSource>,
}

impl CatalogSources {
    pub fn new(
        genres: Arc<dyn GenreSource>,
        movies: Arc<dyn MovieSource>,
        links: Arc<dyn LinkSource>,
    ) -> Self {
        Self {
            genres,
            movies,
            links,
        }
    }

    /// Use one value implementing all three traits (the HTTP client or a
    /// static catalog) for every collection.
    pub fn from_shared<S>(source: Arc<S>) -> Self
    where
        S: GenreSource + MovieSource + LinkSource + 'static,
    {
        Self {
            genres: source.clone(),
            movies: source.clone(),
            links: source,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    SelectGenre(Option<GenreId>),
    SetSort(SortCriterion),
    Refresh,
}

struct Envelope {
    command: Command,
    ack: oneshot::Sender<()>,
}

/// Client side of a running browser. Cheap to clone.
#[derive(Clone)]
pub struct BrowserHandle {
    commands: mpsc::Sender<Envelope>,
    view: watch::Receiver<ViewState>,
}

impl BrowserHandle {
    /// Select a genre (`None` for all genres). Resolves once the event
    /// loop has applied the change and issued the scoped link fetch.
    pub async fn select_genre(&self, genre_id: Option<GenreId>) -> Result<()> {
        self.send(Command::SelectGenre(genre_id)).await
    }

    pub async fn set_sort(&self, sort: SortCriterion) -> Result<()> {
        self.send(Command::SetSort(sort)).await
    }

    /// Re-fetch every collection.
    pub async fn refresh(&self) -> Result<()> {
        self.send(Command::Refresh).await
    }

    /// The most recently published view.
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// A receiver notified on every published view.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    /// Wait until the view is in the `Ready` phase and return it.
    pub async fn wait_ready(&self) -> Result<ViewState> {
        let mut view = self.view.clone();
        let ready = view
            .wait_for(|state| state.phase == Phase::Ready)
            .await
            .context("Catalog browser stopped before becoming ready")?;
        Ok(ready.clone())
    }

    async fn send(&self, command: Command) -> Result<()> {
        let (ack, applied) = oneshot::channel();
        self.commands
            .send(Envelope { command, ack })
            .await
            .map_err(|_| anyhow!("Catalog browser has stopped"))?;
        applied
            .await
            .context("Catalog browser stopped before applying the command")
    }
}

pub struct CatalogBrowser;

impl CatalogBrowser {
    /// Start a browser showing every genre, unsorted.
    pub fn spawn(sources: CatalogSources) -> (BrowserHandle, JoinHandle<()>) {
        Self::spawn_with_criteria(sources, FilterCriteria::default())
    }

    /// Start a browser with preselected criteria. Must be called from
    /// within a tokio runtime.
    pub fn spawn_with_criteria(
        sources: CatalogSources,
        criteria: FilterCriteria,
    ) -> (BrowserHandle, JoinHandle<()>) {
        let mut controller = ViewController::with_criteria(criteria);
        let initial = controller.start();
        let (view_tx, view_rx) = watch::channel(controller.view());
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_QUEUE);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        let event_loop = EventLoop {
            controller,
            sources,
            commands: commands_rx,
            completions: completions_rx,
            completions_tx,
            view: view_tx,
            in_flight: HashMap::new(),
        };
        let task = tokio::spawn(event_loop.run(initial));

        let handle = BrowserHandle {
            commands: commands_tx,
            view: view_rx,
        };
        (handle, task)
    }
}

struct EventLoop {
    controller: ViewController,
    sources: CatalogSources,
    commands: mpsc::Receiver<Envelope>,
    completions: mpsc::UnboundedReceiver<FetchCompletion>,
    completions_tx: mpsc::UnboundedSender<FetchCompletion>,
    view: watch::Sender<ViewState>,
    in_flight: HashMap<SourceKind, (Ticket, AbortHandle)>,
}

impl EventLoop {
    async fn run(mut self, initial: Vec<FetchRequest>) {
        info!("Catalog browser started");
        self.dispatch_all(initial);

        loop {
            tokio::select! {
                Some(completion) = self.completions.recv() => {
                    self.in_flight_done(&completion);
                    if self.controller.complete(completion) == Applied::Applied {
                        self.publish();
                    }
                }
                envelope = self.commands.recv() => {
                    let Some(Envelope { command, ack }) = envelope else {
                        break;
                    };
                    self.handle(command);
                    self.publish();
                    let _ = ack.send(());
                }
            }
        }

        for (_, (_, task)) in self.in_flight.drain() {
            task.abort();
        }
        info!("Catalog browser stopped");
    }

    fn handle(&mut self, command: Command) {
        debug!(?command, "Handling command");
        match command {
            Command::SelectGenre(genre_id) => {
                if let Some(request) = self.controller.select_genre(genre_id) {
                    self.dispatch(request);
                }
            }
            Command::SetSort(sort) => {
                self.controller.set_sort(sort);
            }
            Command::Refresh => {
                let requests = self.controller.refresh();
                self.dispatch_all(requests);
            }
        }
    }

    fn dispatch_all(&mut self, requests: Vec<FetchRequest>) {
        for request in requests {
            self.dispatch(request);
        }
    }

    /// Spawn the fetch for `request`, aborting an older one for the same source.
    fn dispatch(&mut self, request: FetchRequest) {
        let tx = self.completions_tx.clone();
        let task = match request {
            FetchRequest::Genres { ticket } => {
                let source = Arc::clone(&self.sources.genres);
                tokio::spawn(async move {
                    let result = source.list_all().await;
                    let _ = tx.send(FetchCompletion::Genres { ticket, result });
                })
            }
            FetchRequest::Movies { ticket } => {
                let source = Arc::clone(&self.sources.movies);
                tokio::spawn(async move {
                    let result = source.list_all().await;
                    let _ = tx.send(FetchCompletion::Movies { ticket, result });
                })
            }
            FetchRequest::Links { ticket, genre_id } => {
                let source = Arc::clone(&self.sources.links);
                tokio::spawn(async move {
                    let result = source.list_links(genre_id).await;
                    let _ = tx.send(FetchCompletion::Links {
                        ticket,
                        genre_id,
                        result,
                    });
                })
            }
        };

        let entry = (request.ticket(), task.abort_handle());
        if let Some((superseded, previous)) = self.in_flight.insert(request.kind(), entry) {
            debug!(superseded, kind = %request.kind(), "Aborting superseded fetch");
            previous.abort();
        }
    }

    fn in_flight_done(&mut self, completion: &FetchCompletion) {
        let kind = completion.kind();
        let current = self.in_flight.get(&kind).map(|(ticket, _)| *ticket);
        if current == Some(completion.ticket()) {
            self.in_flight.remove(&kind);
        }
    }

    fn publish(&self) {
        self.view.send_replace(self.controller.view());
    }
}
