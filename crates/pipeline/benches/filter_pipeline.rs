//! Benchmarks for the filter pipeline
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a generated catalog of 5000 movies spread over 20 genres.

use catalog::{Movie, MovieGenreLink, SortCriterion};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::Rng;

const MOVIES: u32 = 5_000;
const GENRES: u32 = 20;
const LINKS_PER_MOVIE: u32 = 3;

fn generate_catalog() -> (Vec<Movie>, Vec<MovieGenreLink>) {
    let mut rng = rand::rng();

    let movies: Vec<Movie> = (1..=MOVIES)
        .map(|id| {
            let mut movie =
                Movie::new(id, format!("Movie {id}")).with_year(rng.random_range(1920..2026));
            if rng.random_bool(0.9) {
                movie = movie.with_rating(rng.random_range(0.0..=10.0));
            }
            movie
        })
        .collect();

    let mut links = Vec::new();
    for movie_id in 1..=MOVIES {
        for _ in 0..LINKS_PER_MOVIE {
            let id = links.len() as u32 + 1;
            links.push(MovieGenreLink::new(id, movie_id, rng.random_range(1..=GENRES)));
        }
    }

    (movies, links)
}

fn bench_unfiltered_rating_sort(c: &mut Criterion) {
    let (movies, links) = generate_catalog();

    c.bench_function("apply_all_genres_by_rating", |b| {
        b.iter(|| {
            let out = pipeline::apply(
                black_box(&movies),
                black_box(&links),
                None,
                SortCriterion::ByRatingDesc,
            );
            black_box(out)
        })
    });
}

fn bench_genre_filter_release_sort(c: &mut Criterion) {
    let (movies, links) = generate_catalog();

    c.bench_function("apply_single_genre_by_release_date", |b| {
        b.iter(|| {
            let out = pipeline::apply(
                black_box(&movies),
                black_box(&links),
                Some(black_box(7)),
                SortCriterion::ByReleaseDateDesc,
            );
            black_box(out)
        })
    });
}

criterion_group!(benches, bench_unfiltered_rating_sort, bench_genre_filter_release_sort);
criterion_main!(benches);
