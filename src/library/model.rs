use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::audio::MediaHandle;

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 5;

/// Opaque track identifier: Unix milliseconds followed by a short random
/// base-36 suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(String);

impl TrackId {
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| ID_ALPHABET[rand::random::<u32>() as usize % ID_ALPHABET.len()] as char)
            .collect();
        Self(format!("{millis}{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One imported audio file and its independent playback state.
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub path: PathBuf,
    /// Stored level in `0.0..=1.0`. Muting never changes it.
    pub volume: f32,
    /// What the user asked for. Set synchronously with the command.
    pub intended_playing: bool,
    /// What the handle reported on the last poll.
    pub actual_playing: bool,
    pub looping: bool,
    pub muted: bool,
    /// Zero until the handle knows the length.
    pub duration: Duration,
    pub position: Duration,
    pub(super) handle: Box<dyn MediaHandle>,
}

impl Track {
    pub(super) fn new(path: &Path, handle: Box<dyn MediaHandle>) -> Self {
        Self {
            id: TrackId::generate(),
            name: display_name(path),
            path: path.to_path_buf(),
            volume: 1.0,
            intended_playing: false,
            actual_playing: false,
            looping: false,
            muted: false,
            duration: Duration::ZERO,
            position: Duration::ZERO,
            handle,
        }
    }

    pub fn effective_gain(&self, master_volume: f32) -> f32 {
        effective_gain(self.volume, self.muted, master_volume)
    }
}

impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("volume", &self.volume)
            .field("intended_playing", &self.intended_playing)
            .field("actual_playing", &self.actual_playing)
            .field("looping", &self.looping)
            .field("muted", &self.muted)
            .field("duration", &self.duration)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// Output level actually applied to a track's handle.
pub fn effective_gain(volume: f32, muted: bool, master_volume: f32) -> f32 {
    if muted { 0.0 } else { volume * master_volume }
}

/// Track name shown in the UI: the file name without its last extension.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("UNKNOWN")
        .to_string()
}
