use std::fs;
use std::path::Path;
use std::sync::Arc;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::SinkHandle;
use super::types::{MediaBackend, MediaError, MediaHandle};

/// Opens one rodio `Sink` per track on the default output device.
///
/// Sinks only play while the stream is alive, so the backend must outlive
/// every handle it opened.
pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    pub fn open_default() -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which garbles the TUI.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

impl MediaBackend for RodioBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn MediaHandle>, MediaError> {
        let bytes = fs::read(path).map_err(|source| MediaError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let sink = Sink::connect_new(self.stream.mixer());
        Ok(Box::new(SinkHandle::new(Arc::from(bytes), sink)))
    }
}
