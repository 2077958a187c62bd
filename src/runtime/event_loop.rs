use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::app::{App, Focus, Mode, Prompt};
use crate::config;
use crate::library::collect_candidates;
use crate::runtime::cadence::Cadence;
use crate::runtime::startup::prompt_path;
use crate::studio::{StudioError, View};
use crate::timer::Tick;
use crate::ui;
use crate::waveform;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Pulls position/duration/play state from the handles.
    pub poll: Cadence,
    /// Counts the sleep timer down; runs only while it is armed.
    pub sleep: Cadence,
    /// Last frame size, for mouse hit-testing.
    pub screen: Rect,
    /// `Studio::sleep_arms` when the sleep cadence was last started.
    sleep_arms: u64,
}

impl EventLoopState {
    pub fn new(settings: &config::Settings, now: Instant) -> Self {
        let mut poll = Cadence::new(Duration::from_millis(settings.audio.poll_interval_ms));
        poll.start(now);
        Self {
            poll,
            sleep: Cadence::new(Duration::from_millis(settings.audio.sleep_tick_ms)),
            screen: Rect::default(),
            sleep_arms: 0,
        }
    }

    /// Start or stop the sleep cadence to match the timer. Every arm,
    /// including one that replaces a running countdown, restarts the phase.
    fn sync_sleep_cadence(&mut self, app: &App, now: Instant) {
        let arms = app.studio.sleep_arms();
        if !app.studio.sleep_timer().is_armed() {
            self.sleep.cancel();
        } else if arms != self.sleep_arms || !self.sleep.is_running() {
            self.sleep.start(now);
        }
        self.sleep_arms = arms;
    }

    /// Stop every cadence. Idempotent.
    pub fn teardown(&mut self) {
        self.poll.cancel();
        self.sleep.cancel();
    }
}

/// Main terminal event loop: handles input, fires the cadences and redraws.
/// Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();
        if state.poll.fire(now) > 0 {
            app.studio.poll();
        }
        for _ in 0..state.sleep.fire(now) {
            if !matches!(app.studio.tick_sleep_timer(), Tick::Counting(_)) {
                state.sleep.cancel();
                break;
            }
        }
        app.collect_notices(now);
        app.clamp_selection();

        terminal.draw(|f| {
            state.screen = f.area();
            ui::draw(f, app, settings);
        })?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key_event(key, settings, app) {
                    break;
                }
            }
            Event::Mouse(mouse) => handle_mouse_event(mouse, app, state.screen),
            _ => {}
        }
        state.sync_sleep_cadence(app, Instant::now());
    }

    state.teardown();
    Ok(())
}

fn log_rejection(result: Result<impl Sized, StudioError>) {
    if let Err(err) = result {
        debug!("rejected: {err}");
    }
}

fn handle_mouse_event(mouse: MouseEvent, app: &mut App, screen: Rect) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let inner = ui::layout(screen).waveform_inner();
    let inside = mouse.row >= inner.y
        && mouse.row < inner.y + inner.height
        && mouse.column >= inner.x
        && mouse.column < inner.x + inner.width;
    if !inside {
        return;
    }
    let Some(id) = app.selected_track_id() else {
        return;
    };
    let Some(duration) = app.studio.tracks().get(&id).map(|t| t.duration) else {
        return;
    };
    let target = waveform::seek_target(duration, mouse.column - inner.x, inner.width);
    log_rejection(app.studio.seek(&id, target));
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
) -> bool {
    match app.mode {
        Mode::Input { .. } => {
            handle_input_key(key, settings, app);
            return false;
        }
        Mode::PickPlaylist { .. } => {
            handle_picker_key(key, app);
            return false;
        }
        Mode::Normal => {}
    }

    let step = settings.controls.volume_step;
    let scrub = Duration::from_secs(settings.controls.scrub_seconds);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('P') => {
            app.studio.toggle_all();
        }
        KeyCode::Char('-') => {
            let v = app.studio.master_volume() - step;
            app.studio.set_master_volume(v);
        }
        KeyCode::Char('=') | KeyCode::Char('+') => {
            let v = app.studio.master_volume() + step;
            app.studio.set_master_volume(v);
        }
        KeyCode::Char('t') => {
            app.cycle_sleep_timer();
        }
        KeyCode::Char('T') => app.clear_sleep_timer(),
        KeyCode::Char('o') => app.begin_input(Prompt::Import),
        KeyCode::Char('n') => app.begin_input(Prompt::NewPlaylist),
        KeyCode::Char('1') => app.studio.show_all_tracks(),
        KeyCode::Char('2') => app.studio.show_active_playlist(),
        _ if app.focus == Focus::Playlists => handle_playlist_key(key, app),
        _ => handle_track_key(key, app, step, scrub),
    }

    false
}

fn handle_playlist_key(key: KeyEvent, app: &mut App) {
    let Some(id) = app.selected_playlist_id() else {
        return;
    };
    match key.code {
        KeyCode::Enter => {
            log_rejection(app.studio.select_playlist(&id));
            app.selected_track = 0;
        }
        KeyCode::Char('d') => log_rejection(app.studio.delete_playlist(&id)),
        _ => {}
    }
}

fn handle_track_key(key: KeyEvent, app: &mut App, step: f32, scrub: Duration) {
    if key.code == KeyCode::Char('a') {
        app.open_picker();
        return;
    }
    let Some(id) = app.selected_track_id() else {
        return;
    };
    let Some((volume, position)) = app.studio.tracks().get(&id).map(|t| (t.volume, t.position))
    else {
        return;
    };

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => log_rejection(app.studio.toggle_play(&id)),
        KeyCode::Char('l') => log_rejection(app.studio.toggle_loop(&id)),
        KeyCode::Char('m') => log_rejection(app.studio.toggle_mute(&id)),
        KeyCode::Char('[') => log_rejection(app.studio.set_volume(&id, volume - step)),
        KeyCode::Char(']') => log_rejection(app.studio.set_volume(&id, volume + step)),
        KeyCode::Char('H') | KeyCode::Left => {
            log_rejection(app.studio.seek(&id, position.saturating_sub(scrub)))
        }
        KeyCode::Char('L') | KeyCode::Right => {
            log_rejection(app.studio.seek(&id, position + scrub))
        }
        KeyCode::Char('x') if app.studio.view() == View::ActivePlaylist => {
            let playlist = app.studio.playlists().active_id().clone();
            log_rejection(app.studio.remove_from_playlist(&id, &playlist));
        }
        KeyCode::Char('x') | KeyCode::Char('X') => log_rejection(app.studio.remove_track(&id)),
        _ => {}
    }
}

fn handle_input_key(key: KeyEvent, settings: &config::Settings, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.cancel_mode(),
        KeyCode::Backspace => app.pop_input_char(),
        KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
        KeyCode::Enter => match app.submit_input() {
            Some((Prompt::Import, text)) => {
                if let Some(path) = prompt_path(&text) {
                    let candidates = collect_candidates(&[path], &settings.library);
                    app.studio.import(&candidates);
                }
            }
            Some((Prompt::NewPlaylist, name)) => {
                if app.studio.create_playlist(&name).is_ok() {
                    app.selected_track = 0;
                }
            }
            None => {}
        },
        _ => {}
    }
}

fn handle_picker_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.cancel_mode(),
        KeyCode::Char('j') | KeyCode::Down => app.picker_next(),
        KeyCode::Char('k') | KeyCode::Up => app.picker_prev(),
        KeyCode::Enter => {
            let track = app.selected_track_id();
            if let (Some(track), Some(playlist)) = (track, app.pick()) {
                log_rejection(app.studio.add_to_playlist(&track, &playlist));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::audio::fake::FakeBackend;
    use crate::studio::Studio;

    fn app() -> App {
        let studio = Studio::new(FakeBackend::new().boxed(), 1.0);
        App::new(studio, &config::UiSettings::default())
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn rearming_restarts_the_sleep_cadence() {
        let settings = config::Settings::default();
        let t0 = Instant::now();
        let mut state = EventLoopState::new(&settings, t0);
        let mut app = app();

        app.studio.arm_sleep_timer(300);
        state.sync_sleep_cadence(&app, t0);

        let t1 = t0 + Duration::from_millis(990);
        app.studio.arm_sleep_timer(2);
        state.sync_sleep_cadence(&app, t1);

        assert_eq!(state.sleep.fire(t1 + Duration::from_millis(20)), 0);
        assert_eq!(state.sleep.fire(t1 + Duration::from_millis(1000)), 1);
    }

    #[test]
    fn unrelated_events_keep_the_sleep_phase() {
        let settings = config::Settings::default();
        let t0 = Instant::now();
        let mut state = EventLoopState::new(&settings, t0);
        let mut app = app();

        app.studio.arm_sleep_timer(60);
        state.sync_sleep_cadence(&app, t0);
        state.sync_sleep_cadence(&app, t0 + Duration::from_millis(900));

        assert_eq!(state.sleep.fire(t0 + Duration::from_millis(1000)), 1);
    }

    #[test]
    fn clearing_the_timer_cancels_the_cadence() {
        let settings = config::Settings::default();
        let t0 = Instant::now();
        let mut state = EventLoopState::new(&settings, t0);
        let mut app = app();

        app.studio.arm_sleep_timer(60);
        state.sync_sleep_cadence(&app, t0);
        assert!(state.sleep.is_running());

        assert!(!handle_key_event(press('T'), &settings, &mut app));
        state.sync_sleep_cadence(&app, t0);
        assert!(!state.sleep.is_running());
    }

    #[test]
    fn cycling_presets_while_armed_restarts_the_cadence() {
        let settings = config::Settings::default();
        let t0 = Instant::now();
        let mut state = EventLoopState::new(&settings, t0);
        let mut app = app();

        handle_key_event(press('t'), &settings, &mut app);
        state.sync_sleep_cadence(&app, t0);
        let t1 = t0 + Duration::from_millis(990);
        handle_key_event(press('t'), &settings, &mut app);
        state.sync_sleep_cadence(&app, t1);

        assert_eq!(app.studio.sleep_timer().remaining(), 600);
        assert_eq!(state.sleep.fire(t1 + Duration::from_millis(20)), 0);
    }

    #[test]
    fn q_quits_and_other_keys_do_not() {
        let settings = config::Settings::default();
        let mut app = app();
        assert!(!handle_key_event(press('j'), &settings, &mut app));
        assert!(handle_key_event(press('q'), &settings, &mut app));
    }
}
