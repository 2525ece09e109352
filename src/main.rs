// src/main.rs

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use cinegrid::application::commands::*;
use cinegrid::application::dto::{ListingViewDto, MovieDetailDto, MovieDto, PosterThemeDto};
use cinegrid::application::state::AppState;
use cinegrid::config::{load_config, API_KEY_ENV_VAR};
use cinegrid::db::{create_connection_pool, initialize_database, verify_database_integrity};
use cinegrid::domain::MovieSortOrder;
use cinegrid::error::{AppError, AppResult};
use cinegrid::events::{EventBus, FavoriteAdded, FavoriteRemoved, MovieSelected, MoviesLoaded};
use cinegrid::infrastructure::{PosterCache, PreferenceStore, TcpConnectivityProbe};
use cinegrid::integrations::TmdbClient;
use cinegrid::repositories::{FavoriteMovieRepository, SqliteFavoriteMovieRepository};
use cinegrid::services::{DetailService, FavoriteService, ListingService};

#[derive(Parser)]
#[command(name = "cinegrid")]
#[command(about = "CineGrid - Browse popular movies and keep favorites locally")]
#[command(version)]
struct Cli {
    /// Print results as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    Popular,
    TopRated,
    Favorite,
}

impl From<OrderArg> for MovieSortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Popular => MovieSortOrder::Popular,
            OrderArg::TopRated => MovieSortOrder::TopRated,
            OrderArg::Favorite => MovieSortOrder::Favorite,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the movie grid under a sort order
    Browse {
        /// Sort order; defaults to the last one used
        #[arg(long, value_enum)]
        order: Option<OrderArg>,

        /// How many pages to load (ignored for the favorite order)
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show one movie with its trailers, reviews and favorite status
    Detail {
        movie_id: i64,

        /// Also compute the poster color theme
        #[arg(long)]
        theme: bool,
    },
    /// Mark a movie as favorite
    Favorite { movie_id: i64 },
    /// Remove a movie from favorites
    Unfavorite { movie_id: i64 },
    /// List favorite movies, most popular first
    Favorites,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let json = cli.json;
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                println!("{}", serde_json::json!({ "error": e }));
            } else {
                error!("{}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    // 1. CONFIGURATION
    let config = load_config();
    let api_key = config.api_key.clone().ok_or_else(|| {
        AppError::Other(format!(
            "No catalog API key configured. Set {} or add \"api_key\" to config.json",
            API_KEY_ENV_VAR
        ))
    })?;
    let probe_addr: SocketAddr = config.probe_addr.parse().map_err(|e| {
        AppError::Other(format!("Invalid probe address {:?}: {}", config.probe_addr, e))
    })?;

    // 2. INFRASTRUCTURE
    let event_bus = Arc::new(EventBus::new());
    let pool = Arc::new(create_connection_pool()?);
    let catalog = Arc::new(TmdbClient::with_base_urls(
        api_key,
        config.api_base_url.clone(),
        config.image_base_url.clone(),
    ));
    let connectivity = Arc::new(TcpConnectivityProbe::new(probe_addr));
    let preferences = Arc::new(PreferenceStore::new()?);
    let poster_cache = Arc::new(PosterCache::new()?);

    // Initialize schema (idempotent) and refuse to run on a corrupt file
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }

    // 3. REPOSITORIES
    // The type `Arc<dyn Trait>` is used to match the service constructor signatures exactly.
    let favorite_repo: Arc<dyn FavoriteMovieRepository> =
        Arc::new(SqliteFavoriteMovieRepository::new(pool.clone()));

    // 4. SERVICES
    let listing_service = Arc::new(ListingService::new(
        catalog.clone(),
        favorite_repo.clone(),
        connectivity.clone(),
        preferences.clone(),
        event_bus.clone(),
    ));
    let favorite_service = Arc::new(FavoriteService::new(
        favorite_repo.clone(),
        event_bus.clone(),
    ));
    let detail_service = Arc::new(DetailService::new(
        catalog.clone(),
        favorite_repo.clone(),
        poster_cache.clone(),
        event_bus.clone(),
    ));

    // 5. EVENT OBSERVER REGISTRATION (WIRING)
    register_event_observers(&event_bus);

    // 6. APPLICATION STATE
    let state = AppState {
        event_bus,
        listing_service,
        favorite_service,
        detail_service,
    };

    // 7. COMMAND DISPATCH
    let result = dispatch(&cli, &state).await;

    // Join the loader task before exit so nothing is dropped mid-flight
    state.listing_service.shutdown().await;

    result
}

fn register_event_observers(event_bus: &EventBus) {
    event_bus.subscribe::<MoviesLoaded, _>(|event| {
        info!(
            "Grid updated: {} page {}, {} movies ({})",
            event.order,
            event.page,
            event.count,
            if event.fresh { "fresh" } else { "appended" }
        );
    });
    event_bus.subscribe::<MovieSelected, _>(|event| {
        debug!("Movie selected: {} ({})", event.title, event.movie_id);
    });
    event_bus.subscribe::<FavoriteAdded, _>(|event| {
        info!("Favorite added: {} ({})", event.title, event.movie_id);
    });
    event_bus.subscribe::<FavoriteRemoved, _>(|event| {
        info!("Favorite removed: {} ({})", event.title, event.movie_id);
    });
}

async fn dispatch(cli: &Cli, state: &AppState) -> AppResult<()> {
    match &cli.command {
        Commands::Browse { order, pages } => {
            let view = browse_movies(state, order.map(MovieSortOrder::from), *pages).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_listing(&view);
            }
            Ok(())
        }
        Commands::Detail { movie_id, theme } => {
            let detail = movie_detail(state, *movie_id).await?;
            let theme_dto = if *theme {
                poster_theme(state, *movie_id).await?
            } else {
                None
            };
            if cli.json {
                let payload = serde_json::json!({ "detail": detail, "theme": theme_dto });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print_detail(&detail, theme_dto.as_ref());
            }
            Ok(())
        }
        Commands::Favorite { movie_id } => {
            let movie = add_favorite(state, *movie_id).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&movie)?);
            } else {
                println!("Added \"{}\" to favorites", movie.title);
            }
            Ok(())
        }
        Commands::Unfavorite { movie_id } => {
            remove_favorite(state, *movie_id).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "removed": movie_id }));
            } else {
                println!("Removed movie {} from favorites", movie_id);
            }
            Ok(())
        }
        Commands::Favorites => {
            let movies = list_favorites(state).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&movies)?);
            } else {
                print_movies(&movies);
            }
            Ok(())
        }
    }
}

fn print_listing(view: &ListingViewDto) {
    println!("{} ({}, page {})", view.order, view.view, view.page);
    print_movies(&view.movies);
}

fn print_movies(movies: &[MovieDto]) {
    if movies.is_empty() {
        println!("  (no movies)");
        return;
    }
    for movie in movies {
        let year = movie
            .release_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".to_string());
        println!(
            "  {:>8}  {:<40}  {}  {:.1}",
            movie.id, movie.title, year, movie.vote_average
        );
    }
}

fn print_detail(detail: &MovieDetailDto, theme: Option<&PosterThemeDto>) {
    let movie = &detail.movie;
    match movie.release_year {
        Some(year) => println!("{} ({})", movie.title, year),
        None => println!("{}", movie.title),
    }
    if !movie.genres.is_empty() {
        println!("Genres: {}", movie.genres.join(", "));
    }
    println!(
        "Rating: {:.1}  Popularity: {:.1}",
        movie.vote_average, movie.popularity
    );
    if detail.is_favorite {
        println!("In favorites");
    }
    if !movie.overview.is_empty() {
        println!("\n{}", movie.overview);
    }
    if !detail.trailers.is_empty() {
        println!("\nTrailers:");
        for trailer in &detail.trailers {
            println!("  {} - {}", trailer.name, trailer.watch_url);
        }
    }
    if !detail.reviews.is_empty() {
        println!("\nReviews:");
        for review in &detail.reviews {
            println!("  {} - {}", review.author, review.url);
        }
    }
    if let Some(theme) = theme {
        println!(
            "\nPoster theme: {} (brightness {:.1}, {})",
            theme.average_color,
            theme.brightness,
            if theme.is_dark { "dark" } else { "light" }
        );
    }
}
