//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and wraps the studio with focus,
//! cursor, prompt and toast state.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
