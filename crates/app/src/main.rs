use std::fmt;
use std::io::{self, Write};

use drill_core::model::QuizConfig;
use drill_core::{OperandGenerator, RandomProblemGenerator};
use services::QuizSession;
use storage::Storage;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod intent;
mod play;
mod render;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  drill [play]    [--db <sqlite_url> | --memory] [--seed <u64>] [--reset-settings]");
    eprintln!("  drill history   [--db <sqlite_url>] [--json]");
    eprintln!("  drill reset     [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://drill.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_DB_URL, DRILL_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    History,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "history" => Some(Self::History),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    in_memory: bool,
    seed: Option<u64>,
    json: bool,
    reset_settings: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("DRILL_DB_URL")
            .ok()
            .map_or_else(|| normalize_sqlite_url("drill.sqlite3".into()), normalize_sqlite_url);
        let mut seed = std::env::var("DRILL_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());
        let mut in_memory = false;
        let mut json = false;
        let mut reset_settings = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--memory" => in_memory = true,
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--json" => json = true,
                "--reset-settings" => reset_settings = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            in_memory,
            seed,
            json,
            reset_settings,
        })
    }

    fn generator(&self) -> Box<dyn OperandGenerator> {
        match self.seed {
            Some(seed) => Box::new(RandomProblemGenerator::seeded(seed)),
            None => Box::new(RandomProblemGenerator::new()),
        }
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    // Logs go to stderr so they never interleave with the quiz on stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means play.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some(first) if first.starts_with('-') => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = if parsed.in_memory {
        Storage::in_memory()
    } else {
        prepare_sqlite_file(&parsed.db_url)?;
        Storage::sqlite(&parsed.db_url).await?
    };
    tracing::debug!(db = %parsed.db_url, in_memory = parsed.in_memory, ?cmd, "storage ready");

    if parsed.reset_settings {
        storage.quiz_store().save_config(QuizConfig::default()).await?;
    }

    let mut session = QuizSession::initialize(storage.quiz_store(), parsed.generator())
        .await
        .map_err(|err| {
            if err.is_invalid_configuration() {
                eprintln!("saved settings are invalid; start with --reset-settings to restore defaults");
            }
            err
        })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cmd {
        Command::Play => {
            writeln!(out, "Arithmetic drill. Type :help for commands.")?;
            play::run(&mut session, BufReader::new(tokio::io::stdin()), &mut out).await?;
        }
        Command::History => {
            if parsed.json {
                writeln!(out, "{}", serde_json::to_string_pretty(session.history())?)?;
            } else {
                writeln!(out, "Score: {}", session.score())?;
                writeln!(out, "{}", render::history(session.history()))?;
            }
        }
        Command::Reset => {
            session.reset().await;
            writeln!(out, "Score and history cleared.")?;
        }
    }

    if let Some(err) = session.take_persistence_error() {
        return Err(err.into());
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
