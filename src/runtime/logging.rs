use std::error::Error;
use std::fs::File;
use std::str::FromStr;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::LogSettings;

/// Send `log` records to a file; the terminal belongs to the UI.
pub fn init_logging(settings: &LogSettings) -> Result<(), Box<dyn Error>> {
    let level = LevelFilter::from_str(&settings.level).unwrap_or_else(|_| {
        eprintln!("mixdeck: unknown log level {:?}, using info", settings.level);
        LevelFilter::Info
    });
    let path = settings.resolved_path();
    WriteLogger::init(level, Config::default(), File::create(&path)?)?;
    log::info!("logging to {} at {level}", path.display());
    Ok(())
}
