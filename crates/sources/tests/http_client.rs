//! Integration tests for the HTTP sources.
//!
//! Each test starts an in-process axum server on a random local port
//! that serves the catalog endpoints from fixed fixtures.

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::Query,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog::{Genre, Movie, MovieGenreLink};
use sources::{FetchError, GenreSource, HttpCatalogClient, LinkSource, MovieSource, SourceConfig};
use tokio::net::TcpListener;

fn fixture_links() -> Vec<MovieGenreLink> {
    vec![
        MovieGenreLink::new(1, 1, 5),
        MovieGenreLink::new(2, 3, 5),
        MovieGenreLink::new(3, 2, 7),
    ]
}

async fn genres() -> Json<Vec<Genre>> {
    Json(vec![Genre::new(5, "Horror"), Genre::new(7, "Comedy")])
}

async fn movies() -> Json<serde_json::Value> {
    // Ratings serialized as strings, as a decimal column would be
    Json(serde_json::json!([
        {"id": 1, "title": "Alien", "plot": "In space...", "year": 1979, "rating": "8.5",
         "imageUrl": "https://img/alien.jpg", "wikipediaUrl": "https://wiki/Alien"},
        {"id": 2, "title": "Airplane!", "plot": "Surely...", "year": 1980, "rating": null,
         "imageUrl": "https://img/airplane.jpg", "wikipediaUrl": null},
    ]))
}

async fn links(Query(params): Query<HashMap<String, String>>) -> Json<Vec<MovieGenreLink>> {
    let links = fixture_links();
    match params.get("genre_id").and_then(|id| id.parse::<u32>().ok()) {
        Some(genre_id) => Json(links.into_iter().filter(|l| l.genre_id == genre_id).collect()),
        None => Json(links),
    }
}

async fn spawn_catalog_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn client_for(app: Router) -> HttpCatalogClient {
    let base_url = spawn_catalog_server(app).await;
    let config = SourceConfig {
        base_url,
        timeout: Duration::from_secs(5),
    };
    HttpCatalogClient::new(&config).unwrap()
}

fn catalog_app() -> Router {
    Router::new()
        .route("/genres", get(genres))
        .route("/movies", get(movies))
        .route("/movies_genres", get(links))
}

#[tokio::test]
async fn test_fetches_genres_and_movies() {
    let client = client_for(catalog_app()).await;

    let genres = GenreSource::list_all(&client).await.unwrap();
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[0].name, "Horror");

    let movies: Vec<Movie> = MovieSource::list_all(&client).await.unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].rating, Some(8.5));
    assert_eq!(movies[1].rating, None);
    assert_eq!(movies[1].wikipedia_url, None);
}

#[tokio::test]
async fn test_links_unscoped_and_scoped() {
    let client = client_for(catalog_app()).await;

    let all = client.list_links(None).await.unwrap();
    assert_eq!(all, fixture_links());

    let horror = client.list_links(Some(5)).await.unwrap();
    assert_eq!(horror.iter().map(|l| l.movie_id).collect::<Vec<_>>(), vec![1, 3]);

    let empty = client.list_links(Some(42)).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let app = Router::new().route(
        "/movies",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = client_for(app).await;

    let err = MovieSource::list_all(&client).await.unwrap_err();
    match err {
        FetchError::Status { endpoint, status } => {
            assert_eq!(status, 500);
            assert!(endpoint.ends_with("/movies"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    // Unrouted path answers 404
    let err = GenreSource::list_all(&client).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let app = Router::new().route("/genres", get(|| async { "<html>not json</html>" }));
    let client = client_for(app).await;

    let err = GenreSource::list_all(&client).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Bind and immediately drop a listener to find a port nobody serves
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = SourceConfig {
        base_url: format!("http://{addr}"),
        timeout: Duration::from_secs(2),
    };
    let client = HttpCatalogClient::new(&config).unwrap();

    let err = client.list_links(None).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }), "got {err:?}");
}
