mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use kanatype::config::{Config, ConfigStore, FileConfigStore};
use kanatype::provider::{HiraganaProvider, KanjiProvider, TargetProvider};
use kanatype::runtime::{CrosstermEventSource, GameEvent, Runner};
use kanatype::session::{Phase, Session, SessionConfig};
use kanatype::TICK_RATE_MS;

/// terminal typing game for hiragana and kanji readings
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing game for Japanese script acquisition: type romaji against rotating batches of hiragana words or kanji readings, with live kana conversion, scoring, and WPM tracking."
)]
pub struct Cli {
    /// seconds on the countdown clock
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// number of words shown per batch
    #[clap(short = 'b', long)]
    batch_size: Option<usize>,

    /// disable strict mode (strict mode clamps input that runs past the target length)
    #[clap(long)]
    relaxed: bool,

    /// which script to practice
    #[clap(short = 'm', long, value_enum)]
    mode: Option<GameMode>,

    /// load a custom word list (JSON) instead of the embedded one
    #[clap(short = 'w', long)]
    wordlist: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum GameMode {
    Hiragana,
    Kanji,
}

impl GameMode {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "hiragana" => Some(GameMode::Hiragana),
            "kanji" => Some(GameMode::Kanji),
            _ => None,
        }
    }
}

/// Stored configuration merged with whatever the CLI overrides for this run.
fn effective_config(cli: &Cli, stored: &Config) -> (GameMode, SessionConfig) {
    let mode = cli
        .mode
        .or_else(|| GameMode::from_name(&stored.mode))
        .unwrap_or(GameMode::Hiragana);
    let session_config = SessionConfig {
        initial_secs: cli.seconds.unwrap_or(stored.initial_secs),
        batch_size: cli.batch_size.unwrap_or(stored.batch_size),
        strict: if cli.relaxed { false } else { stored.strict },
        ..SessionConfig::default()
    };
    (mode, session_config)
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    /// Raw romaji buffer, mirrored back from the session after clamping.
    pub input: String,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            input: String::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let stored = store.load();
    let (mode, session_config) = effective_config(&cli, &stored);

    let provider: Box<dyn TargetProvider> = match (mode, &cli.wordlist) {
        (GameMode::Hiragana, None) => Box::new(HiraganaProvider::embedded()),
        (GameMode::Hiragana, Some(path)) => Box::new(HiraganaProvider::from_path(path)),
        (GameMode::Kanji, None) => Box::new(KanjiProvider::embedded()),
        (GameMode::Kanji, Some(path)) => Box::new(KanjiProvider::from_path(path)),
    };

    // a failed load is terminal: surface it and leave nothing to start
    let pool = provider
        .load_pool()
        .map_err(|e| format!("failed to load {mode} word list: {e}"))?;

    let session = Session::new(pool, session_config.clone())?;
    let mut app = App::new(session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // persist the settings that actually ran
    let _ = store.save(&Config {
        initial_secs: session_config.initial_secs,
        batch_size: session_config.batch_size,
        strict: session_config.strict,
        mode: mode.to_string().to_lowercase(),
    });

    result.map_err(Into::into)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let events = CrosstermEventSource::new();
    let runner = Runner::new(events, Duration::from_millis(TICK_RATE_MS));

    loop {
        terminal.draw(|f| draw(app, f))?;

        match runner.step() {
            GameEvent::Tick => app.session.on_tick(),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}

fn draw(app: &App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}

/// Returns true when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char(' ') => match app.session.phase() {
            Phase::Idle => {
                app.input.clear();
                app.session.start();
            }
            Phase::Over => {
                app.input.clear();
                app.session.reset();
            }
            Phase::Running => {}
        },
        KeyCode::Backspace => {
            if app.session.phase() == Phase::Running {
                app.input.pop();
                let buffer = app.input.clone();
                app.session.on_input(&buffer);
                app.input = app.session.raw_input().to_string();
            }
        }
        KeyCode::Char(c) => {
            if app.session.phase() == Phase::Running {
                app.input.push(c);
                let buffer = app.input.clone();
                app.session.on_input(&buffer);
                // the strict clamp may have truncated the buffer
                app.input = app.session.raw_input().to_string();
            }
        }
        _ => {}
    }

    false
}
