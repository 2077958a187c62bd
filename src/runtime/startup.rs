use std::path::PathBuf;

use log::info;

use crate::config::LibrarySettings;
use crate::library::collect_candidates;
use crate::studio::Studio;

/// Import every path given on the command line.
pub fn import_args(studio: &mut Studio, args: &[PathBuf], library: &LibrarySettings) -> usize {
    if args.is_empty() {
        return 0;
    }
    let candidates = collect_candidates(args, library);
    let added = studio.import(&candidates);
    info!(
        "startup import: {added} track(s) from {} candidate(s)",
        candidates.len()
    );
    added
}

/// Expand a leading `~` and trim what the user typed into the import prompt.
pub fn prompt_path(input: &str) -> Option<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(rest));
        }
    }
    Some(PathBuf::from(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::fake::FakeBackend;

    #[test]
    fn imports_files_and_folders_from_args() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        std::fs::write(dir.path().join("b.wav"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let backend = FakeBackend::new();
        let mut studio = Studio::new(backend.boxed(), 1.0);
        let added = import_args(
            &mut studio,
            &[dir.path().to_path_buf()],
            &LibrarySettings::default(),
        );
        assert_eq!(added, 2);
        assert_eq!(backend.spies().len(), 2);
    }

    #[test]
    fn no_args_imports_nothing() {
        let mut studio = Studio::new(FakeBackend::new().boxed(), 1.0);
        assert_eq!(import_args(&mut studio, &[], &LibrarySettings::default()), 0);
        assert!(studio.take_notices().is_empty());
    }

    #[test]
    fn prompt_paths_are_trimmed() {
        assert_eq!(prompt_path("  /tmp/x.mp3 "), Some(PathBuf::from("/tmp/x.mp3")));
        assert_eq!(prompt_path("   "), None);
    }
}
