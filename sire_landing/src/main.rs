mod app;
mod effects;
mod sections;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sire_core::{CardSet, LandingConfig};

use app::App;

/// ~30fps
const FRAME: Duration = Duration::from_millis(33);

#[derive(Parser)]
#[command(name = "sire", about = "Sire Media creator-campaign landing page")]
struct Cli {
    /// TOML file with layout, geometry and timing overrides
    #[arg(long, default_value = "landing.toml")]
    config: PathBuf,
    /// JSON card dataset; the built-in deck is used when omitted
    #[arg(long)]
    cards: Option<PathBuf>,
    /// Disable stacking, flips and count-up animations
    #[arg(long)]
    reduced_motion: bool,
    /// Where to write logs; the terminal is owned by the UI
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: PathBuf) -> color_eyre::Result<()> {
    let file = File::create(&path)
        .wrap_err_with(|| format!("cannot open log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("sire-landing.log"));
    init_logging(log_file)?;

    let mut config = LandingConfig::load(&cli.config)
        .wrap_err_with(|| format!("invalid config {}", cli.config.display()))?;
    if cli.reduced_motion {
        config.reduced_motion = true;
    }
    let cards = match &cli.cards {
        Some(path) => CardSet::load(path)
            .wrap_err_with(|| format!("invalid card dataset {}", path.display()))?,
        None => CardSet::builtin()?,
    };
    tracing::info!(
        cards = cards.len(),
        reduced_motion = config.reduced_motion,
        "starting landing page"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let mut app = App::new(cards, config);
    let result = run_app(&mut terminal, &mut app);
    app.unmount_all();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "landing page exited with error");
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> color_eyre::Result<()> {
    let mut last = Instant::now();

    loop {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && app.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                Event::Resize(w, h) => {
                    app.handle_resize(w, h);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now - last);
        last = now;
    }

    Ok(())
}
