use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use wordsprint::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore, SourceKind},
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    session::SessionConfig,
    timer::SystemClock,
    word_source::{HttpWordSource, LocalWordSource, StaticWordSource, WordSource},
};

const TICK_RATE_MS: u64 = 100;

/// one-minute typing test: type the words, space to commit
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed test for the terminal. Type each word and press space to commit it; the countdown starts with your first keystroke and your score is the number of words typed correctly."
)]
pub struct Cli {
    /// length of the test in seconds
    #[clap(short = 'd', long = "duration")]
    duration_secs: Option<u64>,

    /// countdown tick interval in milliseconds
    #[clap(long)]
    tick_ms: Option<u64>,

    /// number of words shown at once
    #[clap(short = 'n', long)]
    window_size: Option<usize>,

    /// number of words to request per session
    #[clap(short = 'w', long)]
    word_count: Option<usize>,

    /// only use words of this length
    #[clap(long, conflicts_with = "any_length")]
    word_length: Option<usize>,

    /// use words of any length
    #[clap(long)]
    any_length: bool,

    /// where words come from
    #[clap(long, value_enum)]
    source: Option<SourceKind>,

    /// word service to query when the source is `api`
    #[clap(long)]
    api_url: Option<String>,

    /// start the countdown as soon as the words are shown instead of on the first keystroke
    #[clap(long)]
    start_immediately: bool,

    /// type these words instead of fetched ones
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// config file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective settings to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line values take precedence over the config file
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(secs) = self.duration_secs {
            cfg.duration_secs = secs;
        }
        if let Some(ms) = self.tick_ms {
            cfg.tick_ms = ms;
        }
        if let Some(size) = self.window_size {
            cfg.window_size = size;
        }
        if let Some(count) = self.word_count {
            cfg.word_count = count;
        }
        if self.word_length.is_some() {
            cfg.word_length = self.word_length;
        }
        if self.any_length {
            cfg.word_length = None;
        }
        if let Some(source) = self.source {
            cfg.source = source;
        }
        if let Some(ref url) = self.api_url {
            cfg.api_url = url.clone();
        }
        if self.start_immediately {
            cfg.start_immediately = true;
        }
        cfg
    }

    fn config_store(&self) -> FileConfigStore {
        match self.config {
            Some(ref path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn word_source(&self, cfg: &Config) -> Arc<dyn WordSource> {
        if let Some(ref prompt) = self.prompt {
            return Arc::new(StaticWordSource::from_prompt(prompt));
        }
        match cfg.source {
            SourceKind::Api => Arc::new(HttpWordSource::new(
                cfg.api_url.clone(),
                cfg.word_count,
                cfg.word_length,
            )),
            SourceKind::Offline => Arc::new(LocalWordSource::new(cfg.word_count, cfg.word_length)),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let cfg = load_settings(&cli, AppDirs::log_path().as_deref())?;
    tracing::info!(source = %cfg.source, duration = cfg.duration_secs, "starting");

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut app = App::new(
        SessionConfig::from(&cfg),
        cli.word_source(&cfg),
        Box::new(SystemClock::new()),
        runner.sender(),
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Logging comes up first so problems reading the config file are recorded.
fn load_settings(cli: &Cli, log_path: Option<&Path>) -> Result<Config, Box<dyn Error>> {
    if let Some(path) = log_path {
        if let Err(err) = logging::init(path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = cli.config_store();
    let cfg = cli.apply(store.load());
    if cli.save_config {
        store.save(&cfg)?;
    }
    Ok(cfg)
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    app.restart();

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        app.handle_event(runner.step());
        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["wordsprint"]);

        assert_eq!(cli.duration_secs, None);
        assert_eq!(cli.window_size, None);
        assert_eq!(cli.prompt, None);
        assert!(!cli.start_immediately);
        assert!(!cli.save_config);
        assert_eq!(cli.apply(Config::default()), Config::default());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "wordsprint",
            "-d",
            "30",
            "-n",
            "25",
            "-w",
            "80",
            "--word-length",
            "6",
            "--source",
            "offline",
            "--start-immediately",
        ]);
        let cfg = cli.apply(Config::default());

        assert_eq!(cfg.duration_secs, 30);
        assert_eq!(cfg.window_size, 25);
        assert_eq!(cfg.word_count, 80);
        assert_eq!(cfg.word_length, Some(6));
        assert_eq!(cfg.source, SourceKind::Offline);
        assert!(cfg.start_immediately);
        assert_eq!(cfg.tick_ms, 1000);
    }

    #[test]
    fn test_cli_any_length() {
        let cli = Cli::parse_from(["wordsprint", "--any-length"]);
        assert_eq!(cli.apply(Config::default()).word_length, None);
    }

    #[test]
    fn test_cli_length_conflicts_with_any_length() {
        let res = Cli::try_parse_from(["wordsprint", "--any-length", "--word-length", "4"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_cli_api_url() {
        let cli = Cli::parse_from(["wordsprint", "--api-url", "http://localhost:9000/word"]);
        assert_eq!(
            cli.apply(Config::default()).api_url,
            "http://localhost:9000/word"
        );
    }

    #[test]
    fn test_prompt_source_wins() {
        let cli = Cli::parse_from(["wordsprint", "-p", "hi stupid mark"]);
        let source = cli.word_source(&Config::default());

        assert_eq!(source.fetch_words().unwrap(), vec!["hi", "stupid", "mark"]);
    }

    #[test]
    fn test_offline_source_selected() {
        let cli = Cli::parse_from(["wordsprint", "--source", "offline", "-w", "7"]);
        let cfg = cli.apply(Config::default());

        assert_eq!(cli.word_source(&cfg).fetch_words().unwrap().len(), 7);
    }

    #[test]
    fn test_malformed_config_warning_reaches_log() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        let log_path = dir.path().join("state").join("wordsprint.log");
        std::fs::write(&config_path, "{ not json").unwrap();

        let cli = Cli::parse_from(["wordsprint", "--config", config_path.to_str().unwrap()]);
        let cfg = load_settings(&cli, Some(&log_path)).unwrap();

        assert_eq!(cfg, Config::default());
        let log = std::fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("ignoring malformed config"));
    }

    #[test]
    fn test_config_path_override() {
        let cli = Cli::parse_from(["wordsprint", "--config", "/tmp/ws.json"]);
        assert_eq!(cli.config_store().path(), std::path::Path::new("/tmp/ws.json"));
    }
}
