//! # Browser Crate
//!
//! The interactive catalog view: fetch orchestration, state and the
//! rendered movie sequence.
//!
//! ## Components
//!
//! - `store`: immutable [`CatalogSnapshot`]s swapped in whole by [`CatalogStore`]
//! - `controller`: the [`ViewController`] state machine (phases, tickets, failures)
//! - `runtime`: [`CatalogBrowser`] runs the controller on tokio and hands
//!   out a [`BrowserHandle`]
//!
//! ## Example Usage
//!
//! ```ignore
//! use browser::{CatalogBrowser, CatalogSources};
//!
//! let client = Arc::new(HttpCatalogClient::new(&config)?);
//! let (browser, _task) = CatalogBrowser::spawn(CatalogSources::from_shared(client));
//!
//! let view = browser.wait_ready().await?;
//! browser.select_genre(Some(5)).await?;
//! browser.set_sort(SortCriterion::ByRatingDesc).await?;
//! ```

pub mod controller;
pub mod runtime;
pub mod store;

pub use controller::{
    Applied, FetchCompletion, FetchRequest, Phase, SourceFailure, SourceKind, Ticket,
    ViewController, ViewState,
};
pub use runtime::{BrowserHandle, CatalogBrowser, CatalogSources};
pub use store::{CatalogSnapshot, CatalogStore, SnapshotUpdate};
