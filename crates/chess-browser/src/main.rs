//! Chess Browser - upload PGN files and search the stored games.

use anyhow::Context;
use chess_browser::config::BrowserConfig;
use chess_browser::db::{self, DbPool};
use chess_browser::models::Winner;
use chess_browser::progress::{self, ProgressTracker};
use chess_browser::query::{DateRange, GameFilter};
use chess_browser::repo::GameRepo;
use chess_browser::report::{self, LineEnding};
use chess_browser::upload::Uploader;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-browser")]
#[command(about = "Upload PGN game collections and search them")]
struct Cli {
    /// Path to the SQLite database (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Configuration file (defaults to ./chess-browser.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload the games of one or more PGN files
    Upload {
        /// PGN files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Search stored games
    Query(QueryArgs),
    /// Show how many events, players and games are stored
    Stats,
}

#[derive(Args, Debug, Default)]
struct QueryArgs {
    /// Exact name of the white player
    #[arg(long)]
    white: Option<String>,

    /// Exact name of the black player
    #[arg(long)]
    black: Option<String>,

    /// Leading moves, e.g. "1. e4 c5"
    #[arg(long)]
    opening: Option<String>,

    /// Winning side: white, black or draw
    #[arg(long)]
    winner: Option<Winner>,

    /// First event date to include (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Last event date to include (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Include the moves of each game
    #[arg(long)]
    show_moves: bool,

    /// End text report lines with CRLF
    #[arg(long)]
    crlf: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Pgn,
}

impl QueryArgs {
    fn filter(&self) -> anyhow::Result<GameFilter> {
        let dates = match (self.from, self.to) {
            (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
            _ => None,
        };
        Ok(GameFilter {
            white: self.white.clone(),
            black: self.black.clone(),
            opening: self.opening.clone(),
            winner: self.winner,
            dates,
        })
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => BrowserConfig::read(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BrowserConfig::load()?,
    };

    let db_path = cli.db.clone().unwrap_or(config.database.path.clone());
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    tracing::debug!("Database: {:?}", db_path);
    let db = db::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    match cli.command {
        Commands::Upload { files } => run_upload(db, files).await,
        Commands::Query(args) => run_query(db, &config, args).await,
        Commands::Stats => {
            let totals = tokio::task::spawn_blocking(move || GameRepo::new(db).counts()).await??;
            println!("Events:  {}", totals.events);
            println!("Players: {}", totals.players);
            println!("Games:   {}", totals.games);
            Ok(())
        }
    }
}

async fn run_upload(db: DbPool, files: Vec<PathBuf>) -> anyhow::Result<()> {
    for path in files {
        let (mut sink, mut rx) = progress::channel();
        let uploader = Uploader::new(db.clone());
        let worker_path = path.clone();
        let worker =
            tokio::task::spawn_blocking(move || uploader.upload_file(&worker_path, &mut sink));

        let mut tracker = ProgressTracker::default();
        while let Some(event) = rx.recv().await {
            if tracker.apply(event) {
                tracing::info!(
                    "{}: {}/{} games ({}%)",
                    path.display(),
                    tracker.done(),
                    tracker.total(),
                    tracker.percent()
                );
            }
        }

        let summary = worker
            .await?
            .with_context(|| format!("Failed to upload {}", path.display()))?;
        println!(
            "{}: {} games, {} inserted, {} duplicates, {} skipped",
            path.display(),
            summary.total,
            summary.inserted,
            summary.duplicates,
            summary.skipped
        );
    }
    Ok(())
}

async fn run_query(db: DbPool, config: &BrowserConfig, args: QueryArgs) -> anyhow::Result<()> {
    let filter = args.filter()?;
    let games = tokio::task::spawn_blocking(move || GameRepo::new(db).search(&filter)).await??;

    let show_moves = args.show_moves || config.output.show_moves;
    let line_ending = if args.crlf {
        LineEnding::Crlf
    } else {
        config.output.line_ending
    };

    let output = match args.format {
        OutputFormat::Text => report::render_text(&games, show_moves, line_ending),
        OutputFormat::Json => report::render_json(&games, show_moves)?,
        OutputFormat::Pgn => report::render_pgn(&games)?,
    };
    print!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("chess-browser").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_upload_requires_files() {
        assert!(parse(&["upload"]).is_err());

        let cli = parse(&["upload", "a.pgn", "b.pgn", "--db", "x.db"]).unwrap();
        match cli.command {
            Commands::Upload { files } => assert_eq!(files.len(), 2),
            _ => panic!("expected upload"),
        }
        assert_eq!(cli.db, Some(PathBuf::from("x.db")));
    }

    #[test]
    fn test_query_parses_all_filters() {
        let cli = parse(&[
            "query",
            "--white",
            "Carlsen, Magnus",
            "--opening",
            "1. e4 c5",
            "--winner",
            "b",
            "--from",
            "2020-01-01",
            "--to",
            "2020-12-31",
            "--format",
            "json",
            "--crlf",
        ])
        .unwrap();

        let Commands::Query(args) = cli.command else {
            panic!("expected query");
        };
        assert_eq!(args.winner, Some(Winner::Black));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.crlf);

        let filter = args.filter().unwrap();
        assert_eq!(filter.white.as_deref(), Some("Carlsen, Magnus"));
        assert_eq!(filter.opening_prefix().as_deref(), Some("1.e4 c5"));
        let range = filter.dates.unwrap();
        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }

    #[test]
    fn test_date_bounds_must_come_together() {
        assert!(parse(&["query", "--from", "2020-01-01"]).is_err());
        assert!(parse(&["query", "--to", "2020-01-01"]).is_err());
        assert!(parse(&["query", "--from", "2020-13-01", "--to", "2020-12-31"]).is_err());
    }

    #[test]
    fn test_reversed_date_range_is_rejected() {
        let cli = parse(&["query", "--from", "2021-01-01", "--to", "2020-01-01"]).unwrap();
        let Commands::Query(args) = cli.command else {
            panic!("expected query");
        };
        assert!(args.filter().is_err());
    }

    #[test]
    fn test_unknown_winner_is_rejected() {
        assert!(parse(&["query", "--winner", "nobody"]).is_err());
    }

    #[test]
    fn test_verbose_is_counted() {
        let cli = parse(&["-vv", "stats"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Stats));
    }
}
