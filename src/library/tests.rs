use std::fs;
use std::path::{Path, PathBuf};

use super::*;
use crate::audio::fake::FakeBackend;
use crate::config::LibrarySettings;

fn touch(dir: &Path, rel: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, b"").unwrap();
    path
}

fn names(candidates: &[ImportCandidate]) -> Vec<String> {
    candidates
        .iter()
        .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn media_types_come_from_the_extension() {
    let s = LibrarySettings::default();
    assert_eq!(media_type_for(Path::new("a.mp3"), &s), "audio/mpeg");
    assert_eq!(media_type_for(Path::new("a.FLAC"), &s), "audio/flac");
    assert_eq!(media_type_for(Path::new("a.oga"), &s), "audio/ogg");
    assert_eq!(media_type_for(Path::new("a.m4a"), &s), "audio/mp4");
    assert_eq!(media_type_for(Path::new("cover.jpg"), &s), OPAQUE_MEDIA_TYPE);
    assert_eq!(media_type_for(Path::new("README"), &s), OPAQUE_MEDIA_TYPE);
}

#[test]
fn extensions_outside_the_allow_list_are_not_audio() {
    let s = LibrarySettings {
        extensions: vec![".wav".into()],
        ..LibrarySettings::default()
    };
    assert_eq!(media_type_for(Path::new("a.wav"), &s), "audio/wav");
    assert_eq!(media_type_for(Path::new("a.mp3"), &s), OPAQUE_MEDIA_TYPE);
}

#[test]
fn display_name_strips_only_the_last_extension() {
    assert_eq!(display_name(Path::new("/m/My.Song.mp3")), "My.Song");
    assert_eq!(display_name(Path::new("/m/plain")), "plain");
    assert_eq!(display_name(Path::new("/")), "UNKNOWN");
}

#[test]
fn effective_gain_is_zero_when_muted() {
    assert_eq!(effective_gain(0.5, false, 0.5), 0.25);
    assert_eq!(effective_gain(0.5, true, 1.0), 0.0);
}

#[test]
fn generated_ids_are_unique_and_shaped() {
    let a = TrackId::generate();
    let b = TrackId::generate();
    assert_ne!(a, b);
    let suffix = &a.as_str()[a.as_str().len() - 5..];
    assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert!(a.as_str()[..a.as_str().len() - 5].parse::<u128>().is_ok());
}

#[test]
fn collect_walks_directories_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "b.mp3");
    touch(dir.path(), "a.flac");
    touch(dir.path(), "sub/c.wav");
    touch(dir.path(), "notes.txt");

    let found = collect_candidates(&[dir.path().to_path_buf()], &LibrarySettings::default());
    assert_eq!(names(&found), vec!["a.flac", "b.mp3", "notes.txt", "c.wav"]);
    let audio: Vec<_> = found.iter().filter(|c| c.is_audio()).collect();
    assert_eq!(audio.len(), 3);
}

#[test]
fn collect_respects_recursion_and_hidden_settings() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "top.mp3");
    touch(dir.path(), "deep/inner.mp3");
    touch(dir.path(), ".hidden/secret.mp3");
    touch(dir.path(), ".dot.mp3");

    let flat = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    assert_eq!(
        names(&collect_candidates(&[dir.path().to_path_buf()], &flat)),
        vec!["top.mp3"]
    );

    let hidden = LibrarySettings {
        include_hidden: true,
        ..LibrarySettings::default()
    };
    assert_eq!(
        collect_candidates(&[dir.path().to_path_buf()], &hidden).len(),
        4
    );
}

#[test]
fn collect_accepts_files_and_skips_missing_paths() {
    let dir = tempfile::tempdir().unwrap();
    let file = touch(dir.path(), "one.opus");
    let found = collect_candidates(
        &[file.clone(), dir.path().join("missing")],
        &LibrarySettings::default(),
    );
    assert_eq!(found, vec![ImportCandidate::new(file, "audio/opus")]);
}

#[test]
fn registry_keeps_import_order_and_applies_master_gain() {
    let backend = FakeBackend::new();
    let mut reg = TrackRegistry::new();
    let ids = reg.import(
        &[
            ImportCandidate::new("/m/z.mp3", "audio/mpeg"),
            ImportCandidate::new("/m/a.mp3", "audio/mpeg"),
        ],
        &backend,
        0.5,
    );

    let order: Vec<_> = reg.iter().map(|t| t.name.clone()).collect();
    assert_eq!(order, vec!["z", "a"]);
    assert_eq!(ids.len(), 2);
    assert_eq!(backend.spy_for("z.mp3").borrow().gain, 0.5);
}

#[test]
fn registry_removal_releases_and_forgets() {
    let backend = FakeBackend::new();
    let mut reg = TrackRegistry::new();
    let ids = reg.import(&[ImportCandidate::new("/m/a.mp3", "audio/mpeg")], &backend, 1.0);

    reg.set_playing(&ids[0], true);
    assert!(reg.remove(&ids[0]));
    assert!(!reg.remove(&ids[0]));
    assert!(reg.is_empty());
    assert!(backend.spy_for("a.mp3").borrow().released);
}

#[test]
fn pause_all_reaches_every_track() {
    let backend = FakeBackend::new();
    let mut reg = TrackRegistry::new();
    let ids = reg.import(
        &[
            ImportCandidate::new("/m/a.mp3", "audio/mpeg"),
            ImportCandidate::new("/m/b.mp3", "audio/mpeg"),
        ],
        &backend,
        1.0,
    );
    for id in &ids {
        reg.set_playing(id, true);
    }
    reg.pause_all();
    assert!(reg.iter().all(|t| !t.intended_playing));
    assert!(backend.spies().iter().all(|p| !p.borrow().playing));
}
