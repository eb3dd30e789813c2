use anyhow::{Context, Result, bail};
use browser::{BrowserHandle, CatalogBrowser, CatalogSources, ViewState};
use catalog::{FilterCriteria, Genre, GenreId, Movie, SortCriterion};
use clap::{Parser, Subcommand};
use colored::Colorize;
use sources::{HttpCatalogClient, SourceConfig};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const PLOT_EXCERPT_CHARS: usize = 80;

/// movie-catalog - Browse a movie catalog by genre, rating and release date
#[derive(Parser)]
#[command(name = "movie-catalog")]
#[command(about = "Browse a movie catalog served over HTTP", long_about = None)]
struct Cli {
    /// TOML file with `base_url` and `timeout_secs`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog server base URL (overrides config file and CATALOG_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the movies for a genre and sort order
    List {
        /// Genre ID to filter by (all genres when omitted)
        #[arg(long)]
        genre: Option<GenreId>,

        /// none, release-date or rating
        #[arg(long, default_value = "none")]
        sort: SortCriterion,
    },

    /// Print the available genres
    Genres,

    /// Interactive browser reading commands from stdin
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config =
        SourceConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    debug!(?config, "Resolved source configuration");

    let client =
        Arc::new(HttpCatalogClient::new(&config).context("Failed to build HTTP client")?);
    println!("Using catalog at {}", client.base_url());
    let sources = CatalogSources::from_shared(client);

    match cli.command {
        Commands::List { genre, sort } => {
            handle_list(sources, FilterCriteria::new(genre, sort)).await?
        }
        Commands::Genres => handle_genres(sources).await?,
        Commands::Browse => handle_browse(sources).await?,
    }

    Ok(())
}

/// Handle the 'list' command
async fn handle_list(sources: CatalogSources, criteria: FilterCriteria) -> Result<()> {
    let start = Instant::now();
    let (browser, _task) = CatalogBrowser::spawn_with_criteria(sources, criteria);
    let view = browser.wait_ready().await?;
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    print_view(&view);
    Ok(())
}

/// Handle the 'genres' command
async fn handle_genres(sources: CatalogSources) -> Result<()> {
    let (browser, _task) = CatalogBrowser::spawn(sources);
    let mut views = browser.subscribe();
    // Readiness does not wait for genres, so wait for the genre fetch itself
    let view = views
        .wait_for(|view| !view.genres_loading)
        .await
        .context("Catalog browser stopped before genres arrived")?
        .clone();

    print_genres(&view.genres);
    print_failures(&view);
    Ok(())
}

/// Handle the 'browse' command
async fn handle_browse(sources: CatalogSources) -> Result<()> {
    let (browser, _task) = CatalogBrowser::spawn(sources);
    let view = browser.wait_ready().await?;
    print_view(&view);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".cyan().bold());
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        match run_browse_command(&browser, line.trim()).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => println!("{} {err:#}", "error:".red().bold()),
        }
    }
    Ok(())
}

/// Execute one interactive command. Returns `false` on quit.
async fn run_browse_command(browser: &BrowserHandle, line: &str) -> Result<bool> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(true);
    };
    let argument = words.next();

    match command {
        "genre" => {
            let genre = parse_genre(argument.unwrap_or(""))?;
            browser.select_genre(genre).await?;
            let pending = browser.view();
            if let Some(name) = genre.and_then(|id| genre_name(&pending.genres, id)) {
                println!("Loading {name}...");
            }
            print_view(&browser.wait_ready().await?);
        }
        "sort" => {
            let sort: SortCriterion = argument.unwrap_or("none").parse()?;
            browser.set_sort(sort).await?;
            print_view(&browser.view());
        }
        "refresh" => {
            browser.refresh().await?;
            print_view(&browser.wait_ready().await?);
        }
        "genres" => print_genres(&browser.view().genres),
        "show" => print_view(&browser.view()),
        "help" => print_help(),
        "quit" | "exit" => return Ok(false),
        other => bail!("Unknown command '{other}', type 'help' for the list"),
    }
    Ok(true)
}

/// `all` (or nothing) selects every genre.
fn parse_genre(raw: &str) -> Result<Option<GenreId>> {
    match raw {
        "" | "all" => Ok(None),
        id => id
            .parse()
            .map(Some)
            .with_context(|| format!("Genre must be an ID or 'all', got '{id}'")),
    }
}

fn genre_name(genres: &[Genre], id: GenreId) -> Option<&str> {
    genres.iter().find(|g| g.id == id).map(|g| g.name.as_str())
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  genre <id|all>    filter by genre");
    println!("  sort <criterion>  none, release-date or rating");
    println!("  refresh           reload everything from the server");
    println!("  genres            list genres");
    println!("  show              print the current list");
    println!("  quit");
}

fn print_genres(genres: &[Genre]) {
    println!("{}", "Genres:".bold().blue());
    for genre in genres {
        println!("  {} {}", genre.id.to_string().green(), genre.name);
    }
}

/// Print the header, one card per movie and any fetch failures.
fn print_view(view: &ViewState) {
    let genre = match view.criteria.selected_genre {
        Some(id) => genre_name(&view.genres, id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("genre {id}")),
        None => "All genres".to_string(),
    };
    println!(
        "{}",
        format!("{genre} · sorted by {} · {} movies", view.criteria.sort, view.movies.len())
            .bold()
            .blue()
    );

    if let Some(notice) = selection_notice(view) {
        println!("  {}", notice.dimmed());
    }
    if view.movies.is_empty() {
        println!("  {}", "No movies to show".dimmed());
    }
    for (rank, movie) in view.movies.iter().enumerate() {
        print_movie_card(rank + 1, movie);
    }
    print_failures(view);
}

fn print_movie_card(rank: usize, movie: &Movie) {
    let mut heading = format!("{}. {}", rank.to_string().green(), movie.title.bold());
    if let Some(year) = movie.year {
        heading.push_str(&format!(" ({year})"));
    }
    if let Some(rating) = movie.rating {
        heading.push_str(&format!(" {}", format!("★ {rating:.1}").yellow()));
    }
    println!("{heading}");

    if let Some(excerpt) = plot_line(movie) {
        println!("   {excerpt}");
    }
    if let Some(url) = &movie.wikipedia_url {
        println!("   More: {}", url.underline());
    }
}

/// The plot excerpt for a card, or `None` when the movie has no plot.
fn plot_line(movie: &Movie) -> Option<String> {
    if movie.plot.trim().is_empty() {
        return None;
    }
    Some(movie.plot_excerpt(PLOT_EXCERPT_CHARS))
}

/// Shown while the link set still belongs to the previous genre selection.
fn selection_notice(view: &ViewState) -> Option<&'static str> {
    (view.links_scope.is_some() && view.links_scope != view.criteria.selected_genre)
        .then_some("Loading movies for the new genre...")
}

fn print_failures(view: &ViewState) {
    for failure in &view.failures {
        println!(
            "{} could not load {}: {}",
            "warning:".yellow().bold(),
            failure.source,
            failure.message
        );
    }
}
