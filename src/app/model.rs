//! Application model types: `App`, `Focus`, `Mode` and toasts.
//!
//! The `App` struct owns the `Studio` and adds what only the terminal needs:
//! which pane has focus, cursors, the text prompt and on-screen toasts.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::UiSettings;
use crate::library::TrackId;
use crate::playlist::PlaylistId;
use crate::studio::{Notice, Studio};

/// Which pane receives navigation keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Tracks,
    Playlists,
}

/// What a text prompt is collecting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// A file or directory path to import.
    Import,
    NewPlaylist,
}

impl Prompt {
    pub fn title(self) -> &'static str {
        match self {
            Self::Import => " import file or folder ",
            Self::NewPlaylist => " new playlist name ",
        }
    }
}

/// Input mode of the UI.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Input { prompt: Prompt, buffer: String },
    /// Choosing a playlist for the selected track.
    PickPlaylist { cursor: usize },
}

/// A notice shown on screen until `expires_at`.
#[derive(Clone, Debug)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: Instant,
}

/// The main application model.
pub struct App {
    pub studio: Studio,
    pub focus: Focus,
    pub mode: Mode,
    pub selected_track: usize,
    pub selected_playlist: usize,

    toasts: VecDeque<Toast>,
    toast_ttl: Duration,
    sleep_presets: Vec<u64>,
    sleep_preset: usize,
}

impl App {
    /// Create a new `App` around `studio`.
    pub fn new(studio: Studio, ui: &UiSettings) -> Self {
        let mut sleep_presets = ui.sleep_presets_secs.clone();
        if sleep_presets.is_empty() {
            sleep_presets.push(0);
        }
        Self {
            studio,
            focus: Focus::default(),
            mode: Mode::default(),
            selected_track: 0,
            selected_playlist: 0,
            toasts: VecDeque::new(),
            toast_ttl: Duration::from_millis(ui.toast_ms),
            sleep_presets,
            sleep_preset: 0,
        }
    }

    /// Id of the track under the cursor in the active view.
    pub fn selected_track_id(&self) -> Option<TrackId> {
        self.studio
            .visible_tracks()
            .get(self.selected_track)
            .map(|t| t.id.clone())
    }

    /// Id of the playlist under the sidebar cursor.
    pub fn selected_playlist_id(&self) -> Option<PlaylistId> {
        self.studio
            .playlists()
            .iter()
            .nth(self.selected_playlist)
            .map(|p| p.id.clone())
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Tracks => Focus::Playlists,
            Focus::Playlists => Focus::Tracks,
        };
    }

    /// Move the cursor of the focused pane down, wrapping to the top.
    pub fn next(&mut self) {
        match self.focus {
            Focus::Tracks => {
                self.selected_track = wrap_next(self.selected_track, self.studio.visible_tracks().len())
            }
            Focus::Playlists => {
                self.selected_playlist = wrap_next(self.selected_playlist, self.studio.playlists().len())
            }
        }
    }

    /// Move the cursor of the focused pane up, wrapping to the bottom.
    pub fn prev(&mut self) {
        match self.focus {
            Focus::Tracks => {
                self.selected_track = wrap_prev(self.selected_track, self.studio.visible_tracks().len())
            }
            Focus::Playlists => {
                self.selected_playlist = wrap_prev(self.selected_playlist, self.studio.playlists().len())
            }
        }
    }

    /// Keep both cursors inside their lists after the lists changed.
    pub fn clamp_selection(&mut self) {
        let tracks = self.studio.visible_tracks().len();
        self.selected_track = self.selected_track.min(tracks.saturating_sub(1));
        let playlists = self.studio.playlists().len();
        self.selected_playlist = self.selected_playlist.min(playlists.saturating_sub(1));
    }

    /// Move studio notices into the toast queue and drop expired toasts.
    pub fn collect_notices(&mut self, now: Instant) {
        for notice in self.studio.take_notices() {
            self.toasts.push_back(Toast {
                notice,
                expires_at: now + self.toast_ttl,
            });
        }
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Most recent toast still on screen.
    pub fn latest_toast(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    /// Advance to the next sleep preset and arm (or clear) the timer with it.
    /// An idle timer starts the cycle over from the first preset.
    pub fn cycle_sleep_timer(&mut self) -> u64 {
        if !self.studio.sleep_timer().is_armed() {
            self.sleep_preset = 0;
        }
        self.sleep_preset = (self.sleep_preset + 1) % self.sleep_presets.len();
        let secs = self.sleep_presets[self.sleep_preset];
        if secs == 0 {
            self.studio.clear_sleep_timer();
        } else {
            self.studio.arm_sleep_timer(secs);
        }
        secs
    }

    /// Clear the timer and rewind the preset cycle.
    pub fn clear_sleep_timer(&mut self) {
        self.sleep_preset = 0;
        self.studio.clear_sleep_timer();
    }

    pub fn begin_input(&mut self, prompt: Prompt) {
        self.mode = Mode::Input {
            prompt,
            buffer: String::new(),
        };
    }

    pub fn push_input_char(&mut self, c: char) {
        if let Mode::Input { buffer, .. } = &mut self.mode {
            buffer.push(c);
        }
    }

    pub fn pop_input_char(&mut self) {
        if let Mode::Input { buffer, .. } = &mut self.mode {
            buffer.pop();
        }
    }

    /// Leave input mode, returning what was typed.
    pub fn submit_input(&mut self) -> Option<(Prompt, String)> {
        match std::mem::take(&mut self.mode) {
            Mode::Input { prompt, buffer } => Some((prompt, buffer)),
            other => {
                self.mode = other;
                None
            }
        }
    }

    /// Open the playlist picker, or do nothing when no track is selected.
    pub fn open_picker(&mut self) {
        if self.selected_track_id().is_some() {
            self.mode = Mode::PickPlaylist { cursor: 0 };
        }
    }

    pub fn picker_next(&mut self) {
        let len = self.studio.playlists().len();
        if let Mode::PickPlaylist { cursor } = &mut self.mode {
            *cursor = wrap_next(*cursor, len);
        }
    }

    pub fn picker_prev(&mut self) {
        let len = self.studio.playlists().len();
        if let Mode::PickPlaylist { cursor } = &mut self.mode {
            *cursor = wrap_prev(*cursor, len);
        }
    }

    /// Leave the picker, returning the chosen playlist.
    pub fn pick(&mut self) -> Option<PlaylistId> {
        let Mode::PickPlaylist { cursor } = self.mode else {
            return None;
        };
        self.mode = Mode::Normal;
        self.studio.playlists().iter().nth(cursor).map(|p| p.id.clone())
    }

    pub fn cancel_mode(&mut self) {
        self.mode = Mode::Normal;
    }
}

fn wrap_next(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

fn wrap_prev(current: usize, len: usize) -> usize {
    match (len, current) {
        (0, _) => 0,
        (_, 0) => len - 1,
        _ => (current - 1).min(len - 1),
    }
}
