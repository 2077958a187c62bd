use std::time::{Duration, Instant};

use super::*;
use crate::audio::fake::FakeBackend;
use crate::config::UiSettings;
use crate::library::ImportCandidate;
use crate::studio::{Notice, Studio};

fn app_with(names: &[&str]) -> App {
    let mut studio = Studio::new(FakeBackend::new().boxed(), 1.0);
    let candidates: Vec<_> = names
        .iter()
        .map(|n| ImportCandidate::new(format!("/music/{n}"), "audio/mpeg"))
        .collect();
    studio.import(&candidates);
    studio.take_notices();
    App::new(studio, &UiSettings::default())
}

#[test]
fn track_cursor_wraps_both_ways() {
    let mut app = app_with(&["a.mp3", "b.mp3", "c.mp3"]);
    app.prev();
    assert_eq!(app.selected_track, 2);
    app.next();
    assert_eq!(app.selected_track, 0);
    app.next();
    assert_eq!(app.selected_track, 1);
}

#[test]
fn cursor_is_inert_on_empty_lists() {
    let mut app = app_with(&[]);
    app.next();
    app.prev();
    assert_eq!(app.selected_track, 0);
    assert!(app.selected_track_id().is_none());
}

#[test]
fn focus_switches_which_cursor_moves() {
    let mut app = app_with(&["a.mp3"]);
    app.studio.create_playlist("Mix").unwrap();
    app.toggle_focus();
    assert_eq!(app.focus, Focus::Playlists);
    app.next();
    assert_eq!(app.selected_playlist, 1);
    assert_eq!(app.selected_track, 0);
    assert_eq!(
        app.selected_playlist_id(),
        Some(app.studio.active_playlist().id.clone())
    );
}

#[test]
fn clamp_selection_follows_removals() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    app.selected_track = 1;
    let id = app.selected_track_id().unwrap();
    app.studio.remove_track(&id).unwrap();
    app.clamp_selection();
    assert_eq!(app.selected_track, 0);
}

#[test]
fn notices_become_toasts_that_expire() {
    let mut app = app_with(&["a.mp3"]);
    let start = Instant::now();
    app.studio.arm_sleep_timer(60);
    app.collect_notices(start);
    assert_eq!(
        app.latest_toast().map(|t| t.notice.clone()),
        Some(Notice::SleepTimerArmed(60))
    );

    app.collect_notices(start + Duration::from_millis(2999));
    assert!(app.latest_toast().is_some());
    app.collect_notices(start + Duration::from_millis(3000));
    assert!(app.latest_toast().is_none());
}

#[test]
fn sleep_presets_cycle_and_wrap_to_off() {
    let mut app = app_with(&[]);
    assert_eq!(app.cycle_sleep_timer(), 300);
    assert_eq!(app.studio.sleep_timer().remaining(), 300);
    for _ in 0..3 {
        app.cycle_sleep_timer();
    }
    assert_eq!(app.studio.sleep_timer().remaining(), 3600);
    assert_eq!(app.cycle_sleep_timer(), 0);
    assert!(!app.studio.sleep_timer().is_armed());
}

#[test]
fn clearing_the_timer_rewinds_presets() {
    let mut app = app_with(&[]);
    app.cycle_sleep_timer();
    app.cycle_sleep_timer();
    app.clear_sleep_timer();
    assert!(!app.studio.sleep_timer().is_armed());
    assert_eq!(app.cycle_sleep_timer(), 300);
}

#[test]
fn input_prompt_collects_text() {
    let mut app = app_with(&[]);
    app.begin_input(Prompt::NewPlaylist);
    for c in "Mixx".chars() {
        app.push_input_char(c);
    }
    app.pop_input_char();
    assert_eq!(
        app.submit_input(),
        Some((Prompt::NewPlaylist, "Mix".to_string()))
    );
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.submit_input(), None);
}

#[test]
fn picker_needs_a_selected_track() {
    let mut app = app_with(&[]);
    app.open_picker();
    assert_eq!(app.mode, Mode::Normal);
}

#[test]
fn picker_returns_the_chosen_playlist() {
    let mut app = app_with(&["a.mp3"]);
    let mix = app.studio.create_playlist("Mix").unwrap();
    app.studio.show_all_tracks();

    app.open_picker();
    app.picker_prev();
    assert_eq!(app.pick(), Some(mix));
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.pick(), None);
}

#[test]
fn presets_restart_after_the_timer_expires() {
    let mut app = app_with(&["a.mp3"]);
    assert_eq!(app.cycle_sleep_timer(), 300);
    while app.studio.sleep_timer().is_armed() {
        app.studio.tick_sleep_timer();
    }
    assert_eq!(app.cycle_sleep_timer(), 300);
    assert_eq!(app.studio.sleep_timer().remaining(), 300);
}
