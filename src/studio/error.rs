use thiserror::Error;

use crate::library::TrackId;
use crate::playlist::PlaylistError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudioError {
    #[error("no track with id {0}")]
    UnknownTrack(TrackId),
    #[error(transparent)]
    Playlist(#[from] PlaylistError),
}
