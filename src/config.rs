//! Layered settings: struct defaults, then `config.toml`, then `MIXDECK__*`
//! environment variables.

mod load;
mod schema;

pub use schema::*;
