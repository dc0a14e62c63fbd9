pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod search;
pub mod util;

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use api::Movie;
use cache::{RecommendationCache, RecommendationList, StoredRecommendations};
use search::{SearchController, SearchCriteria, SearchPhase};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("Cache error: {0}")]
    Cache(#[from] cache::CacheError),
    #[error("API client error: {0}")]
    Api(#[from] api::ApiError),
}

#[derive(Debug, Clone)]
pub enum Command {
    /// Run a search from a URL query string, scrolling through up to `pages` pages.
    Search {
        query_string: String,
        pages: u32,
        genres: Vec<String>,
    },
    Recommendations,
    ClearCache,
}

pub struct RunOptions {
    pub config_path: String,
    /// Fail when the config file is missing instead of using defaults.
    pub config_required: bool,
    pub api_url: Option<String>,
}

pub fn load_config(options: &RunOptions) -> Result<config::Config, AppError> {
    let mut config = if options.config_required || Path::new(&options.config_path).exists() {
        info!("Using config file: {}", options.config_path);
        config::Config::from_file(&options.config_path)?
    } else {
        info!("No config file at {}, using defaults", options.config_path);
        config::Config::default()
    };
    if let Some(ref url) = options.api_url {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

pub async fn run(options: RunOptions, command: Command) -> Result<(), AppError> {
    let config = load_config(&options)?;

    let storage_path = config.get_storage_path();
    info!("Opening storage at {}", storage_path);
    let repo = Arc::new(db::SqliteRepository::new(&storage_path).await?);
    let cache = Arc::new(StoredRecommendations::new(repo.clone()));

    match command {
        Command::Search {
            query_string,
            pages,
            genres,
        } => {
            let api = Arc::new(api::HttpSearchApi::from_config(&config.api)?);
            info!("Search API at {}", config.api.base_url);
            let criteria = SearchCriteria::from_query_string(&query_string);
            let mut controller = SearchController::new(api, cache, criteria).await;
            run_search(&mut controller, pages, &genres).await?;
        }
        Command::Recommendations => {
            for list in RecommendationList::ALL {
                let movies = cache.get(list).await?.unwrap_or_default();
                print_carousel(list, &movies);
            }
        }
        Command::ClearCache => {
            for list in RecommendationList::ALL {
                cache.clear(list).await?;
            }
            info!("Recommendation cache cleared");
        }
    }

    repo.close().await;
    Ok(())
}

async fn run_search(
    controller: &mut SearchController,
    pages: u32,
    genres: &[String],
) -> Result<(), AppError> {
    let mut criteria = controller.criteria().clone();
    for genre in genres {
        criteria = controller.toggle_genre(genre);
    }
    controller.navigate(criteria).await;

    // Stand-in for the user scrolling to the bottom of the list.
    for _ in 1..pages {
        if !controller.on_sensor(true).await {
            break;
        }
    }

    print_results(controller).await?;
    Ok(())
}

async fn print_results(controller: &SearchController) -> Result<(), AppError> {
    let criteria = controller.criteria();
    println!(
        "\"{}\" search results",
        criteria.query.as_deref().unwrap_or("null")
    );
    println!("url: ?{}", criteria.to_query_string());

    let state = controller.state();
    if state.phase() == SearchPhase::Unloaded {
        println!("(no results loaded)");
    }

    if !state.genres.is_empty() {
        println!();
        println!("Genres:");
        for genre in &state.genres {
            let id = genre.id().unwrap_or_default();
            let mark = if controller.clicked_genres().contains(&id) {
                "x"
            } else {
                " "
            };
            println!("  [{}] {} ({})", mark, genre.name().unwrap_or("?"), id);
        }
    }

    for list in RecommendationList::ALL {
        print_carousel(list, &controller.recommendations(list).await?);
    }

    println!();
    println!(
        "Movies ({} loaded, page {}{}):",
        state.movies.len(),
        controller.page(),
        if state.has_more { ", more available" } else { "" }
    );
    for (i, movie) in state.movies.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, describe(movie));
    }
    Ok(())
}

fn print_carousel(list: RecommendationList, movies: &[Movie]) {
    println!();
    println!("{}", list.title());
    if movies.is_empty() {
        println!("  (empty)");
    }
    for movie in movies {
        println!("  - {}", describe(movie));
    }
}

fn describe(movie: &Movie) -> String {
    match (movie.title(), movie.id()) {
        (Some(title), Some(id)) => format!("{} [{}]", title, id),
        (Some(title), None) => title.to_string(),
        (None, Some(id)) => format!("[{}]", id),
        (None, None) => movie.0.to_string(),
    }
}
