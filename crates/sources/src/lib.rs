//! # Sources Crate
//!
//! Read-only sources for the three catalog collections.
//!
//! ## Components
//!
//! ### Traits
//! - `GenreSource` / `MovieSource`: `list_all()`, no filtering
//! - `LinkSource`: `list_links(genre_id)`, scoped server-side when a genre is given
//!
//! ### Implementations
//! - `HttpCatalogClient`: talks to `/genres`, `/movies` and `/movies_genres`
//! - `StaticCatalog`: in-memory data with the same scoping rules
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{HttpCatalogClient, LinkSource, SourceConfig};
//!
//! let config = SourceConfig::load(None)?;
//! let client = HttpCatalogClient::new(&config)?;
//! let horror_links = client.list_links(Some(5)).await?;
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use config::SourceConfig;
pub use error::FetchError;
pub use http::HttpCatalogClient;
pub use memory::StaticCatalog;
pub use traits::{GenreSource, LinkSource, MovieSource};
