use clap::{Parser, Subcommand};
use eztv::{
    ClientConfig, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, DEFAULT_SHOW_ENDPOINT,
    DEFAULT_TORRENT_ENDPOINT, EpisodeTorrent, EztvClient, EztvError, Show, ShowEpisode,
};
use humansize::{DECIMAL, format_size};
use serde::Serialize;
use std::process;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors reported by the command line interface
#[derive(Debug, Error)]
enum CliError {
    /// The API call failed
    #[error("{0}")]
    Api(#[from] EztvError),

    /// A result could not be rendered as JSON
    #[error("Failed to write JSON output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Query the EZTV show metadata and torrent index APIs
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the show metadata service
    #[arg(long, env = "EZTV_SHOW_ENDPOINT", default_value = DEFAULT_SHOW_ENDPOINT)]
    show_endpoint: String,

    /// Base URL of the torrent index service
    #[arg(long, env = "EZTV_TORRENT_ENDPOINT", default_value = DEFAULT_TORRENT_ENDPOINT)]
    torrent_endpoint: String,

    /// Torrents requested per page when listing a show's torrents
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Maximum number of torrent pages fetched for a show
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check whether the show service is alive
    Ping,
    /// Show details of a show
    Show { imdb_id: String },
    /// Show a single episode of a show
    Episode {
        imdb_id: String,
        season: u32,
        episode: u32,
    },
    /// List the episodes of a season
    Season { imdb_id: String, season: u32 },
    /// List shows, one page at a time
    List {
        #[arg(default_value_t = 1)]
        page: u32,
    },
    /// Search shows by keyword
    Search { keyword: String },
    /// List every torrent of a show
    Torrents { imdb_id: String },
    /// List the torrents of a single episode
    EpisodeTorrents {
        imdb_id: String,
        season: u32,
        episode: u32,
    },
    /// List the latest torrents across all shows
    Latest {
        #[arg(long, default_value_t = 30)]
        limit: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

/// Prints `value` as pretty JSON to stdout
fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Prints the headline of a show followed by its non-empty details
fn print_show(show: &Show) {
    println!("{} ({}) [{}]", show.title, show.year, show.imdb_id);
    if !show.network.is_empty() {
        println!("  Network: {}", show.network);
    }
    if !show.genres.is_empty() {
        println!("  Genres: {}", show.genres.join(", "));
    }
    if show.num_seasons > 0 {
        println!("  Seasons: {}", show.num_seasons);
    }
}

/// Prints an episode with one line per available torrent quality
fn print_episode(episode: &ShowEpisode) {
    println!(
        "S{:02}E{:02} - {}",
        episode.season, episode.episode, episode.title
    );
    for (quality, torrent) in &episode.torrents {
        println!(
            "  {:>6}: {} seeds, {} peers",
            quality, torrent.seeds, torrent.peers
        );
    }
}

/// Prints one line per torrent, or a notice when there are none
fn print_torrents(torrents: &[EpisodeTorrent]) {
    if torrents.is_empty() {
        println!("No torrents found.");
        return;
    }

    for torrent in torrents {
        println!(
            "S{:02}E{:02} {} ({}, {} seeds, released {})",
            torrent.season,
            torrent.episode,
            torrent.filename,
            format_size(torrent.size, DECIMAL),
            torrent.seeds,
            torrent.date_released.format("%Y-%m-%d")
        );
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Build the client from the command line options
    let config = ClientConfig::default()
        .with_show_endpoint(cli.show_endpoint)
        .with_torrent_endpoint(cli.torrent_endpoint)
        .with_page_size(cli.page_size)
        .with_max_pages(cli.max_pages);
    let client = EztvClient::new(config)?;

    // Dispatch the subcommand
    match cli.command {
        Command::Ping => {
            let status = client.ping()?;
            if cli.json {
                return print_json(&status);
            }
            println!(
                "{} (server {}, version {}, {} shows, up {}s)",
                status.status, status.server, status.version, status.total_shows, status.uptime
            );
        }
        Command::Show { imdb_id } => {
            let show = client.show_details(&imdb_id)?;
            if cli.json {
                return print_json(&show);
            }
            print_show(&show);
            if !show.synopsis.is_empty() {
                println!("\n{}\n", show.synopsis);
            }
            println!("{} episode(s)", show.episodes.len());
        }
        Command::Episode {
            imdb_id,
            season,
            episode,
        } => {
            let episode = client.episode(&imdb_id, season, episode)?;
            if cli.json {
                return print_json(&episode);
            }
            print_episode(&episode);
            if !episode.overview.is_empty() {
                println!("\n{}", episode.overview);
            }
        }
        Command::Season { imdb_id, season } => {
            let episodes = client.season(&imdb_id, season)?;
            if cli.json {
                return print_json(&episodes);
            }
            if episodes.is_empty() {
                println!("No episodes found for season {}.", season);
            }
            for episode in &episodes {
                print_episode(episode);
            }
        }
        Command::List { page } => {
            let shows = client.list_shows(page)?;
            if cli.json {
                return print_json(&shows);
            }
            shows.iter().for_each(print_show);
        }
        Command::Search { keyword } => {
            let shows = client.search_shows(&keyword)?;
            if cli.json {
                return print_json(&shows);
            }
            if shows.is_empty() {
                println!("No shows found for '{}'.", keyword);
            }
            shows.iter().for_each(print_show);
        }
        Command::Torrents { imdb_id } => {
            let torrents = client.show_torrents(&imdb_id)?;
            if cli.json {
                return print_json(&torrents);
            }
            print_torrents(&torrents);
        }
        Command::EpisodeTorrents {
            imdb_id,
            season,
            episode,
        } => {
            let torrents = client.episode_torrents(&imdb_id, season, episode)?;
            if cli.json {
                return print_json(&torrents);
            }
            print_torrents(&torrents);
        }
        Command::Latest { limit, page } => {
            let torrents = client.torrents(limit, page)?;
            if cli.json {
                return print_json(&torrents);
            }
            print_torrents(&torrents);
        }
    }

    Ok(())
}

fn main() {
    // Logs go to stderr so stdout stays parseable with --json
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
