use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use podlist_acquire::{search_episodes, Episode, FetchConfig, Podcast, SiteConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

#[derive(Parser)]
#[command(name = "podlist")]
#[command(about = "List, search and resolve podcast episodes from a podcast directory")]
#[command(version)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Per-request network timeout in seconds (0 disables the timeout)
    #[arg(long, global = true, default_value_t = 30)]
    timeout_secs: u64,

    /// Site host prefixed to relative episode links
    #[arg(long, global = true, default_value = podlist_acquire::podcast::DEFAULT_SITE_HOST)]
    site: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// List a window of episodes, newest first
    Episodes {
        #[command(flatten)]
        window: WindowArgs,

        /// Also resolve each episode's audio link
        #[arg(long)]
        with_audio: bool,

        /// Print JSON instead of one line per episode
        #[arg(long)]
        json: bool,
    },

    /// Search a window of episodes by title or description
    Search {
        #[command(flatten)]
        window: WindowArgs,

        /// Case-insensitive regular expression
        #[arg(short, long)]
        query: String,

        /// Print JSON instead of one line per episode
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct WindowArgs {
    /// Podcast URL on the directory (e.g., "https://gpodder.net/podcast/example")
    #[arg(short, long)]
    podcast: String,

    /// Position of the first episode, counting from the newest
    #[arg(short, long, default_value_t = 0)]
    offset: usize,

    /// Number of episodes to fetch
    #[arg(short, long, default_value_t = 20)]
    count: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy HTML-parsing crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // Logs go to stderr so stdout stays clean for listings and JSON
    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    let fetch = FetchConfig {
        timeout: (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs)),
        ..FetchConfig::default()
    };
    let site = SiteConfig {
        site_host: cli.site,
        ..SiteConfig::default()
    };

    match cli.command {
        Commands::Episodes {
            window,
            with_audio,
            json,
        } => {
            tracing::info!(podcast = %window.podcast, offset = window.offset, count = window.count, "Listing episodes");
            let podcast = Podcast::with_config(&window.podcast, site, &fetch)
                .context("Failed to set up HTTP client")?;
            let episodes = podcast.episodes(window.offset, window.count).await;
            if with_audio {
                resolve_audio(&episodes).await;
            }
            print_episodes(&episodes, json)?;
        }
        Commands::Search {
            window,
            query,
            json,
        } => {
            tracing::info!(podcast = %window.podcast, query = %query, "Searching episodes");
            let podcast = Podcast::with_config(&window.podcast, site, &fetch)
                .context("Failed to set up HTTP client")?;
            let episodes = podcast.episodes(window.offset, window.count).await;
            let matched = search_episodes(&episodes, &query);
            tracing::info!(searched = episodes.len(), matched = matched.len(), "Search complete");
            print_episodes(&matched, json)?;
        }
    }

    Ok(())
}

/// Resolve audio links for every episode concurrently. Failures are logged
/// and leave that episode without a link.
async fn resolve_audio(episodes: &[Arc<Episode>]) {
    let mut tasks = JoinSet::new();
    for episode in episodes {
        let episode = Arc::clone(episode);
        tasks.spawn(async move {
            if let Err(e) = episode.audio_url().await {
                tracing::warn!(episode = %episode.url, error = %e, "Could not resolve audio link");
            }
        });
    }
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            tracing::error!(error = %e, "Audio resolution task failed");
        }
    }
}

fn print_episodes(episodes: &[Arc<Episode>], json: bool) -> Result<()> {
    if json {
        let records: Vec<_> = episodes.iter().map(|e| e.to_record()).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for episode in episodes {
        println!("{}  {}", episode.release_date, episode.title);
        println!("    {}", episode.url);
        if let Some(audio) = episode.cached_audio_url() {
            println!("    audio: {audio}");
        }
    }
    Ok(())
}
