use std::time::Duration;

use log::info;

use crate::audio::MediaBackend;
use crate::library::{ImportCandidate, Track, TrackId, TrackRegistry};
use crate::playlist::{Playlist, PlaylistError, PlaylistId, PlaylistRegistry};
use crate::timer::{SleepTimer, Tick};

use super::error::StudioError;
use super::notice::Notice;

/// Which tracks the aggregate play state and the transport operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    AllTracks,
    /// The members of the active playlist.
    ActivePlaylist,
}

pub struct Studio {
    // Declared before `backend`: handles must drop before the output stream.
    tracks: TrackRegistry,
    playlists: PlaylistRegistry,
    sleep_timer: SleepTimer,
    sleep_arms: u64,
    master_volume: f32,
    view: View,
    notices: Vec<Notice>,
    backend: Box<dyn MediaBackend>,
}

impl Studio {
    pub fn new(backend: Box<dyn MediaBackend>, master_volume: f32) -> Self {
        Self {
            tracks: TrackRegistry::new(),
            playlists: PlaylistRegistry::new(),
            sleep_timer: SleepTimer::default(),
            sleep_arms: 0,
            master_volume: clamp_unit(master_volume),
            view: View::default(),
            notices: Vec::new(),
            backend,
        }
    }

    pub fn tracks(&self) -> &TrackRegistry {
        &self.tracks
    }

    pub fn playlists(&self) -> &PlaylistRegistry {
        &self.playlists
    }

    pub fn active_playlist(&self) -> &Playlist {
        self.playlists.active()
    }

    pub fn sleep_timer(&self) -> SleepTimer {
        self.sleep_timer
    }

    /// Bumped every time the sleep timer is (re)armed.
    pub fn sleep_arms(&self) -> u64 {
        self.sleep_arms
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Notifications raised since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        info!("{notice}");
        self.notices.push(notice);
    }

    fn in_view(&self, track: &Track) -> bool {
        match self.view {
            View::AllTracks => true,
            View::ActivePlaylist => self.playlists.active().contains(&track.id),
        }
    }

    /// Tracks in the active view, in import order.
    pub fn visible_tracks(&self) -> Vec<&Track> {
        self.tracks.iter().filter(|t| self.in_view(t)).collect()
    }

    fn visible_ids(&self) -> Vec<TrackId> {
        self.tracks
            .iter()
            .filter(|t| self.in_view(t))
            .map(|t| t.id.clone())
            .collect()
    }

    /// True iff the active view is non-empty and every member intends to play.
    pub fn all_playing(&self) -> bool {
        let mut visible = self.tracks.iter().filter(|t| self.in_view(t)).peekable();
        visible.peek().is_some() && visible.all(|t| t.intended_playing)
    }

    /// Import every audio candidate and bind the new tracks to the active
    /// playlist. Returns how many tracks were added.
    pub fn import(&mut self, candidates: &[ImportCandidate]) -> usize {
        let added = self
            .tracks
            .import(candidates, self.backend.as_ref(), self.master_volume);
        if added.is_empty() {
            return 0;
        }

        let active = self.playlists.active_id().clone();
        for id in &added {
            // The active playlist id is always valid.
            let _ = self.playlists.add_track(id, &active);
        }
        self.notify(Notice::TracksAdded(added.len()));
        added.len()
    }

    pub fn toggle_play(&mut self, id: &TrackId) -> Result<bool, StudioError> {
        self.tracks
            .toggle_play(id)
            .ok_or_else(|| StudioError::UnknownTrack(id.clone()))
    }

    pub fn toggle_loop(&mut self, id: &TrackId) -> Result<bool, StudioError> {
        self.tracks
            .toggle_loop(id)
            .ok_or_else(|| StudioError::UnknownTrack(id.clone()))
    }

    pub fn toggle_mute(&mut self, id: &TrackId) -> Result<bool, StudioError> {
        self.tracks
            .toggle_mute(id, self.master_volume)
            .ok_or_else(|| StudioError::UnknownTrack(id.clone()))
    }

    pub fn set_volume(&mut self, id: &TrackId, volume: f32) -> Result<f32, StudioError> {
        self.tracks
            .set_volume(id, volume, self.master_volume)
            .ok_or_else(|| StudioError::UnknownTrack(id.clone()))
    }

    pub fn seek(&mut self, id: &TrackId, position: Duration) -> Result<(), StudioError> {
        self.tracks
            .seek(id, position)
            .ok_or_else(|| StudioError::UnknownTrack(id.clone()))
    }

    /// Stop and release the track, delist it and purge it from every playlist.
    pub fn remove_track(&mut self, id: &TrackId) -> Result<(), StudioError> {
        if !self.tracks.remove(id) {
            return Err(StudioError::UnknownTrack(id.clone()));
        }
        self.playlists.purge_track(id);
        self.notify(Notice::TrackRemoved);
        Ok(())
    }

    /// Play or pause every track in the active view, flipping the aggregate.
    /// Returns the state every member was set to.
    pub fn toggle_all(&mut self) -> bool {
        let play = !self.all_playing();
        for id in self.visible_ids() {
            self.tracks.set_playing(&id, play);
        }
        play
    }

    /// Clamp and store the master volume and re-apply every track's gain.
    pub fn set_master_volume(&mut self, volume: f32) -> f32 {
        self.master_volume = clamp_unit(volume);
        self.tracks.apply_master_volume(self.master_volume);
        self.master_volume
    }

    /// Arm the sleep timer; zero seconds clears it.
    pub fn arm_sleep_timer(&mut self, seconds: u64) {
        if self.sleep_timer.arm(seconds) {
            self.sleep_arms += 1;
            self.notify(Notice::SleepTimerArmed(seconds));
        }
    }

    pub fn clear_sleep_timer(&mut self) {
        self.sleep_timer.clear();
    }

    /// Advance the sleep timer by one second. On expiry every track is
    /// paused regardless of the active view.
    pub fn tick_sleep_timer(&mut self) -> Tick {
        let tick = self.sleep_timer.tick();
        if tick == Tick::Expired {
            self.tracks.pause_all();
            self.notify(Notice::SleepTimerExpired);
        }
        tick
    }

    /// Create a playlist, make it active and switch the view to it.
    pub fn create_playlist(&mut self, name: &str) -> Result<PlaylistId, StudioError> {
        match self.playlists.create(name) {
            Ok(id) => {
                self.view = View::ActivePlaylist;
                self.notify(Notice::PlaylistCreated(name.trim().to_string()));
                Ok(id)
            }
            Err(err) => {
                if err == PlaylistError::BlankName {
                    self.notify(Notice::PlaylistNameRejected);
                }
                Err(err.into())
            }
        }
    }

    pub fn delete_playlist(&mut self, id: &PlaylistId) -> Result<(), StudioError> {
        match self.playlists.delete(id) {
            Ok(_) => {
                self.notify(Notice::PlaylistDeleted);
                Ok(())
            }
            Err(err) => {
                if err == PlaylistError::DefaultProtected {
                    self.notify(Notice::DefaultPlaylistProtected);
                }
                Err(err.into())
            }
        }
    }

    /// Add a track to a playlist. Returns `false` when it already was a member.
    pub fn add_to_playlist(
        &mut self,
        track_id: &TrackId,
        playlist_id: &PlaylistId,
    ) -> Result<bool, StudioError> {
        if !self.tracks.contains(track_id) {
            return Err(StudioError::UnknownTrack(track_id.clone()));
        }
        let added = self.playlists.add_track(track_id, playlist_id)?;
        let name = self
            .playlists
            .get(playlist_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        self.notify(Notice::TrackAddedToPlaylist(name));
        Ok(added)
    }

    pub fn remove_from_playlist(
        &mut self,
        track_id: &TrackId,
        playlist_id: &PlaylistId,
    ) -> Result<bool, StudioError> {
        Ok(self.playlists.remove_track(track_id, playlist_id)?)
    }

    /// Make a playlist active and show its members.
    pub fn select_playlist(&mut self, id: &PlaylistId) -> Result<(), StudioError> {
        self.playlists.select(id)?;
        self.view = View::ActivePlaylist;
        Ok(())
    }

    pub fn show_all_tracks(&mut self) {
        self.view = View::AllTracks;
    }

    pub fn show_active_playlist(&mut self) {
        self.view = View::ActivePlaylist;
    }

    /// Refresh observed position, duration and play state of every track.
    pub fn poll(&mut self) {
        self.tracks.poll();
    }

    /// Stop and release every track. The studio stays usable but empty.
    pub fn shutdown(&mut self) {
        self.sleep_timer.clear();
        let ids: Vec<TrackId> = self.tracks.iter().map(|t| t.id.clone()).collect();
        self.tracks.release_all();
        for id in &ids {
            self.playlists.purge_track(id);
        }
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
