use std::fmt;

use crate::format::format_time;

/// User-facing notification raised by a studio operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    TracksAdded(usize),
    TrackRemoved,
    PlaylistCreated(String),
    PlaylistDeleted,
    DefaultPlaylistProtected,
    PlaylistNameRejected,
    TrackAddedToPlaylist(String),
    SleepTimerArmed(u64),
    SleepTimerExpired,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::TracksAdded(_) => "Tracks added",
            Self::TrackRemoved => "Track removed",
            Self::PlaylistCreated(_) => "Playlist created",
            Self::PlaylistDeleted => "Playlist deleted",
            Self::DefaultPlaylistProtected => "Cannot delete default playlist",
            Self::PlaylistNameRejected => "Playlist not created",
            Self::TrackAddedToPlaylist(_) => "Track added to playlist",
            Self::SleepTimerArmed(_) => "Sleep timer set",
            Self::SleepTimerExpired => "Sleep timer ended",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::TracksAdded(n) => {
                format!("Added {n} new track{}", if *n == 1 { "" } else { "s" })
            }
            Self::TrackRemoved => "The track has been removed from your library".to_string(),
            Self::PlaylistCreated(name) => format!("Created new playlist: {name}"),
            Self::PlaylistDeleted => "The playlist has been removed".to_string(),
            Self::DefaultPlaylistProtected => "The default playlist cannot be deleted".to_string(),
            Self::PlaylistNameRejected => "Playlist names cannot be blank".to_string(),
            Self::TrackAddedToPlaylist(name) => format!("Added to {name}"),
            Self::SleepTimerArmed(secs) => {
                format!("Music will stop in {}", format_time(*secs as f64))
            }
            Self::SleepTimerExpired => "All tracks have been paused".to_string(),
        }
    }

    /// Rejections are rendered in a warning style.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::DefaultPlaylistProtected | Self::PlaylistNameRejected)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.description())
    }
}
