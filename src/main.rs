mod app;
mod audio;
mod config;
mod format;
mod library;
mod playlist;
mod runtime;
mod studio;
mod timer;
mod ui;
mod waveform;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
