use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelstash")]
#[command(about = "Reelstash - Search the movie catalog and keep a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to the application log file instead of stderr
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by title
    #[command(long_about = "Search the movie catalog by title. Shows up to the first ten matches; type=movie is fixed, as is the result cap.")]
    Search {
        /// Title to search for
        query: String,
    },
    /// Show the full record for one title
    Details {
        /// IMDb id, e.g. tt0111161
        imdb_id: String,
    },
    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List watchlist entries in order
    List,
    /// Add a title by IMDb id
    Add {
        imdb_id: String,
    },
    /// Remove a title by IMDb id
    Remove {
        imdb_id: String,
    },
    /// Move a title to a new position (1-based)
    Move {
        imdb_id: String,
        position: usize,
    },
    /// Remove every entry
    Clear,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (API key masked)
    Show,
    /// Interactively write a config file
    Init,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = movie_explorer_config::PathManager::default();
    let log_file = cli.log_file.then(|| paths.log_file());
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let out = output::Output::new(cli.output, cli.quiet);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "reelstash starting");

    match cli.command {
        Commands::Search { query } => commands::search::run(&paths, &out, &query).await,
        Commands::Details { imdb_id } => commands::details::run(&paths, &out, &imdb_id).await,
        Commands::Watchlist { cmd } => commands::watchlist::run(&paths, &out, cmd).await,
        Commands::Config { cmd } => commands::config::run(&paths, &out, cmd),
    }
}
