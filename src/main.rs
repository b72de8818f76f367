#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use anyhow::Context;
use blockfall::app::{App, AppResult};
use blockfall::config::{self, Config};
use blockfall::ui;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info, warn};
use ratatui::{Terminal, prelude::*};

const LOG_PATH: &str = "blockfall.log";

fn main() -> AppResult<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_PATH)
        .with_context(|| format!("failed to create log file {LOG_PATH}"))?;

    // Redirect stderr to the log file so log output stays off the game screen
    let stderr_fd = io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting blockfall");

    let config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!(
                "Configuration loaded from {}",
                config::loader::get_config_file_path().display()
            );
            config
        }
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {e}");
            Config::default()
        }
    };

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let frame_rate = Duration::from_millis(config.display.frame_rate_ms.max(1));
    let app = App::new(config);
    let res = run_app(&mut terminal, app, frame_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }

    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    frame_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();

    // Flush any input left over from before the game took the terminal
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if app.needs_redraw || last_render.elapsed() >= frame_rate {
            terminal.draw(|f| ui::render(f, &app))?;
            app.needs_redraw = false;
            last_render = Instant::now();
        }

        app.on_tick();

        if app.should_quit {
            info!("Quitting with score {}", app.engine.score());
            return Ok(());
        }

        if event::poll(Duration::from_millis(5))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    debug!("Key event: {key:?}");
                    app.handle_key(key);
                }
                Event::Resize(..) => app.needs_redraw = true,
                _ => {}
            }
        }
    }
}
