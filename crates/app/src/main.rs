use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuestionBank;
use services::{AudioBackend, AudioMixer, HighScoreService, SilentAudio};
use storage::Storage;
use ui::{App, UiApp, build_app_context};

mod audio;

use audio::RodioAudio;

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
const DEFAULT_SOUNDS_DIR: &str = "assets/sounds";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
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

struct DesktopApp {
    question_bank: Arc<QuestionBank>,
    high_scores: Arc<HighScoreService>,
    audio: AudioMixer,
    initial_high_score: u32,
}

impl UiApp for DesktopApp {
    fn question_bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.question_bank)
    }

    fn high_scores(&self) -> Arc<HighScoreService> {
        Arc::clone(&self.high_scores)
    }

    fn audio(&self) -> AudioMixer {
        self.audio.clone()
    }

    fn initial_high_score(&self) -> u32 {
        self.initial_high_score
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    db_url: String,
    sounds_dir: PathBuf,
    questions: Option<PathBuf>,
    muted: bool,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--sounds <dir>] [--questions <file.json>] [--mute]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --sounds {DEFAULT_SOUNDS_DIR}");
    eprintln!("  --questions <bundled questions>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_SOUNDS_DIR, QUIZ_QUESTIONS, RUST_LOG");
}

impl Args {
    /// Flags win over environment values, which win over defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            db_url: env("QUIZ_DB_URL")
                .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url),
            sounds_dir: env("QUIZ_SOUNDS_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_SOUNDS_DIR), PathBuf::from),
            questions: env("QUIZ_QUESTIONS").map(PathBuf::from),
            muted: false,
            help: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--sounds" => parsed.sounds_dir = require_value(args, "--sounds")?.into(),
                "--questions" => parsed.questions = Some(require_value(args, "--questions")?.into()),
                "--mute" => parsed.muted = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
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

    let path = Path::new(path);
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

fn load_question_bank(path: Option<&Path>) -> Result<QuestionBank, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(QuestionBank::builtin()?);
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    let bank = QuestionBank::from_json(&raw)
        .map_err(|err| format!("invalid question file {}: {err}", path.display()))?;
    log::info!("loaded {} questions from {}", bank.len(), path.display());
    Ok(bank)
}

/// Falls back to silence when no output device is available.
fn build_audio(sounds_dir: PathBuf, muted: bool) -> AudioMixer {
    if !sounds_dir.is_dir() {
        log::warn!("sounds directory {} not found; playing without sound files", sounds_dir.display());
    }
    let backend: Arc<dyn AudioBackend> = match RodioAudio::spawn(sounds_dir) {
        Ok(rodio) => Arc::new(rodio),
        Err(err) => {
            log::warn!("audio disabled: {err}");
            Arc::new(SilentAudio)
        }
    };
    AudioMixer::new(backend).with_muted(muted)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|err| {
        eprintln!("{err}");
        print_usage();
        err
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let question_bank = Arc::new(load_question_bank(args.questions.as_deref())?);

    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    let high_scores = Arc::new(HighScoreService::new(Arc::clone(&storage.scores)));
    let initial_high_score = high_scores.load().await;
    log::info!("high score on startup: {initial_high_score}");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        question_bank,
        high_scores,
        audio: build_audio(args.sounds_dir, args.muted),
        initial_high_score,
    });
    let context = build_app_context(&app);

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
    pretty_env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(ToString::to_string);
        Args::parse(&mut iter, |key| {
            env.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
        })
    }

    #[test]
    fn defaults_without_flags_or_env() {
        let args = parse(&[], &[]).unwrap();
        assert_eq!(args.db_url, DEFAULT_DB_URL);
        assert_eq!(args.sounds_dir, PathBuf::from(DEFAULT_SOUNDS_DIR));
        assert_eq!(args.questions, None);
        assert!(!args.muted);
    }

    #[test]
    fn flags_override_environment() {
        let env = [("QUIZ_DB_URL", "sqlite://env.db"), ("QUIZ_SOUNDS_DIR", "/env/sounds")];
        let args = parse(&["--db", "sqlite://flag.db", "--mute"], &env).unwrap();
        assert_eq!(args.db_url, "sqlite://flag.db");
        assert_eq!(args.sounds_dir, PathBuf::from("/env/sounds"));
        assert!(args.muted);
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert_eq!(
            parse(&["--sounds"], &[]),
            Err(ArgsError::MissingValue { flag: "--sounds" })
        );
        assert_eq!(
            parse(&["--volume"], &[]),
            Err(ArgsError::UnknownArg("--volume".into()))
        );
        assert!(matches!(
            parse(&["--db", " "], &[]),
            Err(ArgsError::InvalidDbUrl { .. })
        ));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:quiz.db".into());
        let path = url.strip_prefix("sqlite://").unwrap();
        assert!(Path::new(path).is_absolute());
        assert!(path.ends_with("quiz.db"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }

    #[test]
    fn bundled_bank_loads_without_a_file() {
        let bank = load_question_bank(None).unwrap();
        assert!(!bank.is_empty());
        assert!(load_question_bank(Some(Path::new("/does/not/exist.json"))).is_err());
    }
}
