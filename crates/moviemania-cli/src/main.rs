use clap::{ArgAction, Parser, Subcommand};
use commands::{config, interactive, movies, watched};
use moviemania_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "moviemania")]
#[command(about = "MovieMania - search movies, rate them, keep track of what you've watched")]
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

    /// Write logs to a daily-rotated file instead of stderr (logs/moviemania.log
    /// under the MovieMania directory when no path is given)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Search the movie database by title. Queries shorter than the configured minimum (3 characters by default) are not sent.")]
    Search {
        /// Title to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show full details for a movie
    Show {
        /// IMDb id, e.g. tt0372784
        id: String,
    },
    /// Rate a movie and add it to the watched list
    #[command(long_about = "Fetch the movie's details and add it to the watched list with the given rating. Movies already in the list keep their entry; use `rate` to change the rating.")]
    Add {
        /// IMDb id, e.g. tt0372784
        id: String,

        /// Your rating (1-10)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// Change the rating of a watched movie
    Rate {
        /// IMDb id of a watched movie
        id: String,

        /// New rating (1-10)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// Remove a movie from the watched list
    Remove {
        /// IMDb id of a watched movie
        id: String,
    },
    /// Show the watched list and its summary
    Watched,
    /// Interactive search session (default)
    #[command(long_about = "Start an interactive session. Type to search, select results with :N, rate with :r N, add with :a. An empty line acts as Enter (focus and clear the search); :esc closes the open movie.")]
    Interactive,
    /// Configure the movie database connection
    #[command(long_about = "View or change MovieMania configuration. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure OMDb access
    #[command(long_about = "Store the OMDb API key and optionally change the API base URL. Get a free key at https://www.omdbapi.com/apikey.aspx.")]
    Omdb {
        /// OMDb API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .map(|path| path.unwrap_or_else(|| PathManager::default().log_file()));
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Search { query } => movies::run_search(query.join(" "), &output).await,
        Commands::Show { id } => movies::run_show(&id, &output).await,
        Commands::Add { id, rating } => movies::run_add(&id, rating, &output).await,
        Commands::Rate { id, rating } => watched::run_rate(&id, rating, &output),
        Commands::Remove { id } => watched::run_remove(&id, &output),
        Commands::Watched => watched::run_watched(&output),
        Commands::Interactive => interactive::run_interactive(&output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
    }
}
