use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use searchflix_rs::{Command, RunOptions};

const DEFAULT_CONFIG: &str = "searchflix.yaml";

#[derive(Parser, Debug)]
#[command(name = "searchflix")]
#[command(about = "Movie search client with infinite-scroll paging", long_about = None)]
struct Args {
    #[arg(short, long)]
    config: Option<String>,
    /// Override the search API base URL from the config file
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    debug: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Search using a URL query string, e.g. "query=batman&sort=score"
    Search {
        query_string: String,
        /// Number of pages to scroll through
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
        /// Toggle a genre facet before searching (repeatable)
        #[arg(short, long = "genre")]
        genres: Vec<String>,
    },
    /// Show the cached recommendation lists
    Recommendations,
    /// Forget the cached recommendation lists
    ClearCache,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug {
        "searchflix_rs=debug"
    } else {
        "searchflix_rs=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = RunOptions {
        config_required: args.config.is_some(),
        config_path: args.config.unwrap_or_else(|| DEFAULT_CONFIG.to_string()),
        api_url: args.api_url,
    };

    let command = match args.command {
        Cmd::Search {
            query_string,
            pages,
            genres,
        } => Command::Search {
            query_string,
            pages,
            genres,
        },
        Cmd::Recommendations => Command::Recommendations,
        Cmd::ClearCache => Command::ClearCache,
    };

    if let Err(e) = searchflix_rs::run(options, command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
