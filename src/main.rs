mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::{Duration, Instant},
};
use tomato::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controller::{SessionController, Status},
    display::DisplayState,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner, TimerEvent},
    scheduler::TimerQueue,
};
use tracing::{info, warn};

/// pomodoro countdown timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A pomodoro timer for the terminal. Cycles 30 minutes of work and 5 minute breaks, with a 20 minute break after every fourth work session."
)]
pub struct Cli {
    /// glyph shown once per completed work session
    #[clap(short = 'm', long)]
    mark: Option<String>,

    /// do not ring the terminal bell when a phase ends
    #[clap(long)]
    no_bell: bool,

    /// save the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// write logs to this file instead of the state directory
    #[clap(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layer command line overrides on top of the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(mark) = &self.mark {
            config.mark_glyph = mark.clone();
        }
        if self.no_bell {
            config.bell = false;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyOutcome {
    Handled,
    Ignored,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub controller: SessionController<DisplayState, TimerQueue>,
    pub config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            controller: SessionController::new(DisplayState::default(), TimerQueue::new()),
            config,
        }
    }

    pub fn display(&self) -> &DisplayState {
        self.controller.display()
    }

    pub fn status(&self) -> Status {
        self.controller.status()
    }

    fn on_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => KeyOutcome::Quit,
            KeyCode::Char('s') if self.display().start_enabled => {
                self.controller.start_or_resume();
                KeyOutcome::Handled
            }
            KeyCode::Char('p') if self.display().stop_enabled => {
                self.controller.stop();
                KeyOutcome::Handled
            }
            KeyCode::Char('r') => {
                self.controller.reset();
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Feeds wall-clock time to the countdown. Returns true when the bell should ring.
    fn on_elapsed(&mut self, elapsed: Duration) -> bool {
        self.controller.advance(elapsed);
        self.controller.display_mut().take_alert() && self.config.bell
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        // running without a log is fine
        let _ = logging::init_file_logging(&path);
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        if let Err(e) = store.save(&config) {
            warn!(path = %store.path().display(), error = %e, "could not save config");
        }
    }
    info!(?config, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend + Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let mut last = Instant::now();

    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = runner.step();

        let now = Instant::now();
        if app.on_elapsed(now - last) {
            execute!(terminal.backend_mut(), Print('\x07'))?;
        }
        last = now;

        if let TimerEvent::Key(key) = event {
            if app.on_key(key) == KeyOutcome::Quit {
                break;
            }
        }

        terminal.draw(|f| ui(app, f))?;
    }

    info!("quit");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
