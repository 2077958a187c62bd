//! Track library: the tracks a user imported, the registry that owns them
//! and the collector that turns user-supplied paths into import candidates.

mod import;
mod model;
mod registry;

pub use import::*;
pub use model::*;
pub use registry::TrackRegistry;

#[cfg(test)]
mod tests;
