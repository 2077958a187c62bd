use std::collections::HashMap;
use std::time::Duration;

use log::{info, warn};

use crate::audio::MediaBackend;

use super::import::ImportCandidate;
use super::model::{Track, TrackId};

/// Owns every imported track and its media handle.
///
/// Lookups go through a map keyed by id; `order` keeps import order for
/// display. Handles are released on removal and when the registry drops.
#[derive(Debug, Default)]
pub struct TrackRegistry {
    tracks: HashMap<TrackId, Track>,
    order: Vec<TrackId>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.tracks.contains_key(id)
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// Tracks in import order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.order.iter().filter_map(|id| self.tracks.get(id))
    }

    /// Open a handle for every audio candidate and register a track for it.
    ///
    /// Non-audio candidates are skipped silently; unreadable files are logged
    /// and skipped. Returns the ids of the new tracks in candidate order.
    pub fn import(
        &mut self,
        candidates: &[ImportCandidate],
        backend: &dyn MediaBackend,
        master_volume: f32,
    ) -> Vec<TrackId> {
        let mut added = Vec::new();

        for candidate in candidates.iter().filter(|c| c.is_audio()) {
            let handle = match backend.open(&candidate.path) {
                Ok(h) => h,
                Err(err) => {
                    warn!("skipping {}: {err}", candidate.path.display());
                    continue;
                }
            };

            let mut track = Track::new(&candidate.path, handle);
            let gain = track.effective_gain(master_volume);
            track.handle.set_gain(gain);
            track.handle.set_looping(track.looping);
            info!("imported {} as {}", track.name, track.id);

            added.push(track.id.clone());
            self.order.push(track.id.clone());
            self.tracks.insert(track.id.clone(), track);
        }

        added
    }

    /// Record the requested play state and command the handle.
    ///
    /// The intended flag is never rolled back when the handle refuses to
    /// start; the next poll reports the actual state.
    pub fn set_playing(&mut self, id: &TrackId, playing: bool) -> Option<bool> {
        let track = self.tracks.get_mut(id)?;
        command_playback(track, playing);
        Some(playing)
    }

    /// Flip the intended play state. Returns the new state.
    pub fn toggle_play(&mut self, id: &TrackId) -> Option<bool> {
        let playing = !self.tracks.get(id)?.intended_playing;
        self.set_playing(id, playing)
    }

    pub fn toggle_loop(&mut self, id: &TrackId) -> Option<bool> {
        let track = self.tracks.get_mut(id)?;
        track.looping = !track.looping;
        track.handle.set_looping(track.looping);
        Some(track.looping)
    }

    /// Flip mute. The stored volume is left untouched so unmuting restores it.
    pub fn toggle_mute(&mut self, id: &TrackId, master_volume: f32) -> Option<bool> {
        let track = self.tracks.get_mut(id)?;
        track.muted = !track.muted;
        let gain = track.effective_gain(master_volume);
        track.handle.set_gain(gain);
        Some(track.muted)
    }

    /// Store a clamped volume and re-apply the gain. Returns the stored value.
    pub fn set_volume(&mut self, id: &TrackId, volume: f32, master_volume: f32) -> Option<f32> {
        let track = self.tracks.get_mut(id)?;
        track.volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        let gain = track.effective_gain(master_volume);
        track.handle.set_gain(gain);
        Some(track.volume)
    }

    /// Move the handle to `position`. Bounds are left to the handle.
    pub fn seek(&mut self, id: &TrackId, position: Duration) -> Option<()> {
        let track = self.tracks.get_mut(id)?;
        match track.handle.seek(position) {
            Ok(()) => track.position = position,
            Err(err) => warn!("seek in {} failed: {err}", track.name),
        }
        Some(())
    }

    /// Stop and release the track's handle, then delist it.
    ///
    /// A failing pause is logged and cleanup continues.
    pub fn remove(&mut self, id: &TrackId) -> bool {
        let Some(track) = self.tracks.get_mut(id) else {
            return false;
        };
        if let Err(err) = track.handle.pause() {
            warn!("pausing {} before removal failed: {err}", track.name);
        }
        track.handle.release();
        track.intended_playing = false;
        track.actual_playing = false;

        self.tracks.remove(id);
        self.order.retain(|t| t != id);
        true
    }

    /// Re-derive every handle's gain from a new master volume.
    pub fn apply_master_volume(&mut self, master_volume: f32) {
        for track in self.tracks.values_mut() {
            let gain = track.effective_gain(master_volume);
            track.handle.set_gain(gain);
        }
    }

    /// Pause every track, whatever view it belongs to.
    pub fn pause_all(&mut self) {
        for track in self.tracks.values_mut() {
            command_playback(track, false);
        }
    }

    /// Pull position, duration and playing state back from every handle.
    pub fn poll(&mut self) {
        for track in self.tracks.values_mut() {
            track.handle.refresh();
            track.position = track.handle.position();
            track.duration = track.handle.duration().unwrap_or(Duration::ZERO);
            track.actual_playing = track.handle.is_playing();
        }
    }

    /// Release every handle and empty the registry.
    pub fn release_all(&mut self) {
        for id in std::mem::take(&mut self.order) {
            if let Some(mut track) = self.tracks.remove(&id) {
                if let Err(err) = track.handle.pause() {
                    warn!("pausing {} on teardown failed: {err}", track.name);
                }
                track.handle.release();
            }
        }
        self.tracks.clear();
    }
}

impl Drop for TrackRegistry {
    fn drop(&mut self) {
        self.release_all();
    }
}

fn command_playback(track: &mut Track, playing: bool) {
    track.intended_playing = playing;
    let result = if playing {
        track.handle.play()
    } else {
        track.handle.pause()
    };
    if let Err(err) = result {
        let action = if playing { "start" } else { "pause" };
        warn!("could not {action} {}: {err}", track.name);
    }
}
