//! Audio playback handles.
//!
//! The studio never touches rodio directly: it asks a `MediaBackend` to open
//! a `MediaHandle` per imported file and drives that handle. The production
//! backend owns the output stream and gives every track its own `Sink`.

mod backend;
mod sink;
mod types;

pub use backend::RodioBackend;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;
