//! `MediaHandle` backed by a rodio `Sink`.
//!
//! The file bytes are kept in memory so that a source can be rebuilt when the
//! previous one drains (looping, or play after the end of the track).

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use lofty::prelude::AudioFile;
use lofty::probe::Probe;
use rodio::{Decoder, Sink, Source};

use super::types::{MediaError, MediaHandle};

pub struct SinkHandle {
    bytes: Arc<[u8]>,
    sink: Option<Sink>,
    looping: bool,
    duration: Option<Duration>,
    // A decoder has been appended and has not been seen drained yet.
    loaded: bool,
    // The last source ran to completion without looping.
    ended: bool,
}

impl SinkHandle {
    /// Wrap `sink` (paused immediately) around the encoded `bytes`.
    pub(super) fn new(bytes: Arc<[u8]>, sink: Sink) -> Self {
        sink.pause();
        let duration = read_duration(&bytes);
        Self {
            bytes,
            sink: Some(sink),
            looping: false,
            duration,
            loaded: false,
            ended: false,
        }
    }

    /// Append a fresh decoder when the sink has nothing queued.
    fn ensure_source(&mut self) -> Result<(), MediaError> {
        let sink = self.sink.as_ref().ok_or(MediaError::Released)?;
        if sink.empty() {
            let decoder = Decoder::new(Cursor::new(Arc::clone(&self.bytes)))?;
            if self.duration.is_none() {
                self.duration = decoder.total_duration();
            }
            sink.append(decoder);
            self.loaded = true;
            self.ended = false;
        }
        Ok(())
    }
}

impl MediaHandle for SinkHandle {
    fn play(&mut self) -> Result<(), MediaError> {
        self.ensure_source()?;
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        let sink = self.sink.as_ref().ok_or(MediaError::Released)?;
        sink.pause();
        Ok(())
    }

    fn set_gain(&mut self, gain: f32) {
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(gain.clamp(0.0, 1.0));
        }
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn seek(&mut self, position: Duration) -> Result<(), MediaError> {
        self.ensure_source()?;
        if let Some(sink) = self.sink.as_ref() {
            sink.try_seek(position)?;
        }
        self.ended = false;
        Ok(())
    }

    fn refresh(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if !self.loaded || !sink.empty() {
            return;
        }

        self.loaded = false;
        if self.looping && !sink.is_paused() {
            if let Err(err) = self.ensure_source() {
                warn!("could not restart looping source: {err}");
            }
        } else {
            self.ended = true;
            sink.pause();
        }
    }

    fn position(&self) -> Duration {
        match self.sink.as_ref() {
            Some(_) if self.ended => self.duration.unwrap_or_default(),
            Some(sink) => sink.get_pos(),
            None => Duration::ZERO,
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map(|s| !s.is_paused() && !s.empty())
            .unwrap_or(false)
    }

    fn release(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.bytes = Arc::from(Vec::new());
        self.loaded = false;
    }
}

impl Drop for SinkHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// Read the length from the container headers without decoding any audio.
pub(super) fn read_duration(bytes: &[u8]) -> Option<Duration> {
    let probed = Probe::new(Cursor::new(bytes)).guess_file_type().ok()?;
    let tagged = probed.read().ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}
