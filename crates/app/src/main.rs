use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, QuizConfig, QuizHandle};
use tracing::info;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTriviaUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTriviaUrl { raw } => write!(f, "invalid --trivia-url value: {raw}"),
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

struct DesktopApp {
    quiz: QuizHandle,
}

impl UiApp for DesktopApp {
    fn quiz(&self) -> QuizHandle {
        self.quiz.clone()
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    config: QuizConfig,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--trivia-url <url>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --trivia-url https://opentdb.com");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_TRIVIA_URL, QUIZ_OFFLINE=1, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut config = QuizConfig::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--trivia-url" => {
                    let value = require_value(args, "--trivia-url")?;
                    if !(value.starts_with("http://") || value.starts_with("https://")) {
                        return Err(ArgsError::InvalidTriviaUrl { raw: value });
                    }
                    config = config.with_trivia_url(value);
                }
                "--offline" => config = config.with_offline(true),
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self { db_url, config }))
    }
}

/// Turn a bare path or `sqlite:` URL into an absolute `sqlite://` URL.
fn normalize_sqlite_url(raw: String) -> String {
    let raw = raw.trim().to_string();
    if raw.starts_with("sqlite::memory:") || raw.starts_with("sqlite://") {
        return raw;
    }

    let path = PathBuf::from(raw.strip_prefix("sqlite:").unwrap_or(&raw));
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Directory that must exist before `SQLite` can create the database file.
fn database_dir(db_url: &str) -> Option<&Path> {
    let path = db_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    init_tracing();
    info!(
        db = %parsed.db_url,
        trivia = %parsed.config.trivia.base_url,
        offline = parsed.config.offline,
        "starting quiz"
    );

    // Storage is opened and migrated before the window exists.
    if let Some(dir) = database_dir(&parsed.db_url) {
        std::fs::create_dir_all(dir)?;
    }
    let services =
        AppServices::new_sqlite(&parsed.db_url, Clock::system(), &parsed.config).await?;
    let quiz = services.spawn_quiz();

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
