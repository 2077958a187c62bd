//! Session state container.
//!
//! `Studio` owns the track registry, the playlists, the sleep timer and the
//! master volume. Every public method is one complete transition, so callers
//! can never leave a track delisted but still referenced by a playlist.

mod error;
mod model;
mod notice;

pub use error::StudioError;
pub use model::*;
pub use notice::Notice;
