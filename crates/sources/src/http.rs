//! HTTP implementation of the catalog sources.
//!
//! One `reqwest::Client` serves all three endpoints; the client is cheap
//! to clone and shares its connection pool.

use crate::config::SourceConfig;
use crate::error::{FetchError, Result};
use crate::traits::{GenreSource, LinkSource, MovieSource};
use anyhow::Context;
use async_trait::async_trait;
use catalog::{Genre, GenreId, Movie, MovieGenreLink, parse_genres, parse_links, parse_movies};
use reqwest::Client;
use tracing::{debug, instrument};

pub const GENRES_PATH: &str = "/genres";
pub const MOVIES_PATH: &str = "/movies";
pub const LINKS_PATH: &str = "/movies_genres";

#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Build a client for the catalog served at `config.base_url`.
    pub fn new(config: &SourceConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(http, config.normalized_base_url()))
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` (with optional query pairs) and return the raw body.
    async fn get_body(&self, path: &str, query: &[(&str, String)]) -> Result<(String, Vec<u8>)> {
        let endpoint = format!("{}{}", self.base_url, path);
        let transport = |source| FetchError::Transport {
            endpoint: endpoint.clone(),
            source,
        };

        let response = self
            .http
            .get(&endpoint)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        debug!(endpoint = %endpoint, bytes = body.len(), "Fetched catalog collection");
        Ok((endpoint, body.to_vec()))
    }
}

#[async_trait]
impl GenreSource for HttpCatalogClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_all(&self) -> Result<Vec<Genre>> {
        let (endpoint, body) = self.get_body(GENRES_PATH, &[]).await?;
        parse_genres(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }
}

#[async_trait]
impl MovieSource for HttpCatalogClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_all(&self) -> Result<Vec<Movie>> {
        let (endpoint, body) = self.get_body(MOVIES_PATH, &[]).await?;
        parse_movies(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }
}

#[async_trait]
impl LinkSource for HttpCatalogClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_links(&self, genre_id: Option<GenreId>) -> Result<Vec<MovieGenreLink>> {
        let query: Vec<(&str, String)> = genre_id
            .map(|id| vec![("genre_id", id.to_string())])
            .unwrap_or_default();
        let (endpoint, body) = self.get_body(LINKS_PATH, &query).await?;
        parse_links(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }
}
