//! Named groupings of tracks.
//!
//! Playlists reference tracks by id only; the track registry owns the
//! tracks. The `"default"` playlist always exists.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::library::TrackId;

pub const DEFAULT_PLAYLIST_ID: &str = "default";
pub const DEFAULT_PLAYLIST_NAME: &str = "Default Playlist";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("the default playlist cannot be deleted")]
    DefaultProtected,
    #[error("playlist names cannot be blank")]
    BlankName,
    #[error("no playlist with id {0}")]
    Unknown(PlaylistId),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistId(String);

impl PlaylistId {
    pub fn default_id() -> Self {
        Self(DEFAULT_PLAYLIST_ID.to_string())
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_PLAYLIST_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaylistId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    track_ids: Vec<TrackId>,
}

impl Playlist {
    fn new(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            track_ids: Vec::new(),
        }
    }

    /// Member ids in insertion order, without duplicates.
    pub fn track_ids(&self) -> &[TrackId] {
        &self.track_ids
    }

    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.track_ids.contains(track_id)
    }

    fn add(&mut self, track_id: TrackId) -> bool {
        if self.contains(&track_id) {
            return false;
        }
        self.track_ids.push(track_id);
        true
    }

    fn remove(&mut self, track_id: &TrackId) -> bool {
        let before = self.track_ids.len();
        self.track_ids.retain(|id| id != track_id);
        self.track_ids.len() != before
    }
}

/// All playlists plus the currently active one.
#[derive(Debug)]
pub struct PlaylistRegistry {
    playlists: Vec<Playlist>,
    active: PlaylistId,
    last_id_millis: u128,
}

impl Default for PlaylistRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistRegistry {
    pub fn new() -> Self {
        Self {
            playlists: vec![Playlist::new(PlaylistId::default_id(), DEFAULT_PLAYLIST_NAME)],
            active: PlaylistId::default_id(),
            last_id_millis: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter()
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    fn get_mut(&mut self, id: &PlaylistId) -> Result<&mut Playlist, PlaylistError> {
        self.playlists
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| PlaylistError::Unknown(id.clone()))
    }

    pub fn active_id(&self) -> &PlaylistId {
        &self.active
    }

    pub fn active(&self) -> &Playlist {
        self.get(&self.active).unwrap_or(&self.playlists[0])
    }

    /// Millisecond clock that never hands out the same value twice.
    fn next_id(&mut self) -> PlaylistId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        self.last_id_millis = now.max(self.last_id_millis + 1);
        PlaylistId(self.last_id_millis.to_string())
    }

    /// Create an empty playlist and make it active. The name is trimmed.
    pub fn create(&mut self, name: &str) -> Result<PlaylistId, PlaylistError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlaylistError::BlankName);
        }
        let id = self.next_id();
        self.playlists.push(Playlist::new(id.clone(), name));
        self.active = id.clone();
        Ok(id)
    }

    /// Delete a playlist. The active playlist falls back to the default one.
    pub fn delete(&mut self, id: &PlaylistId) -> Result<Playlist, PlaylistError> {
        if id.is_default() {
            return Err(PlaylistError::DefaultProtected);
        }
        let pos = self
            .playlists
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| PlaylistError::Unknown(id.clone()))?;
        let removed = self.playlists.remove(pos);
        if &self.active == id {
            self.active = PlaylistId::default_id();
        }
        Ok(removed)
    }

    pub fn select(&mut self, id: &PlaylistId) -> Result<(), PlaylistError> {
        if self.get(id).is_none() {
            return Err(PlaylistError::Unknown(id.clone()));
        }
        self.active = id.clone();
        Ok(())
    }

    /// Add a membership. Returns `false` when the track was already a member.
    pub fn add_track(
        &mut self,
        track_id: &TrackId,
        playlist_id: &PlaylistId,
    ) -> Result<bool, PlaylistError> {
        Ok(self.get_mut(playlist_id)?.add(track_id.clone()))
    }

    /// Remove a membership. Returns `false` when there was nothing to remove.
    pub fn remove_track(
        &mut self,
        track_id: &TrackId,
        playlist_id: &PlaylistId,
    ) -> Result<bool, PlaylistError> {
        Ok(self.get_mut(playlist_id)?.remove(track_id))
    }

    /// Drop `track_id` from every playlist.
    pub fn purge_track(&mut self, track_id: &TrackId) {
        for playlist in &mut self.playlists {
            playlist.remove(track_id);
        }
    }
}
