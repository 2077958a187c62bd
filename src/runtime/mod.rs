use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::RodioBackend;
use crate::studio::Studio;

mod cadence;
mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = settings::load_settings();
    let settings = loaded.settings;
    logging::init_logging(&settings.log)?;
    if let Some(reason) = loaded.fallback {
        warn!("{reason}");
    }

    let backend = RodioBackend::open_default()?;
    let mut studio = Studio::new(Box::new(backend), settings.audio.master_volume);

    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    startup::import_args(&mut studio, &args, &settings.library);

    let mut app = App::new(studio, &settings.ui);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::new(&settings, Instant::now());
    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut state);

    // Cadences stop before any handle is released.
    state.teardown();
    app.studio.shutdown();
    info!("shutdown complete");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    run_result
}
