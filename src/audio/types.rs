//! Media handle traits and the audio error type.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Failures raised by media handles and the backend that opens them.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode audio: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
    #[error("seek failed: {0}")]
    Seek(#[from] rodio::source::SeekError),
    #[error("no usable audio output: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("media handle was already released")]
    Released,
}

/// A playable resource bound to the bytes of one imported file.
///
/// Commands take effect asynchronously from the caller's point of view: a
/// successful `play` only means the request was accepted. Observed state
/// (`position`, `duration`, `is_playing`) is read back by the periodic poll.
pub trait MediaHandle {
    /// Start or resume playback. A drained source restarts from the top.
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self) -> Result<(), MediaError>;
    /// Output gain in `0.0..=1.0`, already combined with mute and master volume.
    fn set_gain(&mut self, gain: f32);
    fn set_looping(&mut self, looping: bool);
    fn seek(&mut self, position: Duration) -> Result<(), MediaError>;
    /// Housekeeping run on every poll, e.g. restarting a drained looping source.
    fn refresh(&mut self);
    fn position(&self) -> Duration;
    /// `None` until the length of the media is known.
    fn duration(&self) -> Option<Duration>;
    fn is_playing(&self) -> bool;
    /// Stop playback and drop the decoded data. Idempotent.
    fn release(&mut self);
}

/// Opens media handles for files on disk.
pub trait MediaBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn MediaHandle>, MediaError>;
}
