use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

/// Media types starting with this prefix are imported; anything else is skipped.
pub const AUDIO_MEDIA_PREFIX: &str = "audio/";
pub const OPAQUE_MEDIA_TYPE: &str = "application/octet-stream";

/// A file offered for import together with its declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCandidate {
    pub path: PathBuf,
    pub media_type: String,
}

impl ImportCandidate {
    pub fn new(path: impl Into<PathBuf>, media_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            media_type: media_type.into(),
        }
    }

    pub fn from_path(path: &Path, settings: &LibrarySettings) -> Self {
        Self::new(path, media_type_for(path, settings))
    }

    pub fn is_audio(&self) -> bool {
        self.media_type.starts_with(AUDIO_MEDIA_PREFIX)
    }
}

/// Declare a media type from the file extension.
///
/// Extensions missing from `settings.extensions` are never treated as audio.
pub fn media_type_for(path: &Path, settings: &LibrarySettings) -> &'static str {
    let Some(ext) = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
    else {
        return OPAQUE_MEDIA_TYPE;
    };

    let allowed = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| e == ext);
    if !allowed {
        return OPAQUE_MEDIA_TYPE;
    }

    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        _ => OPAQUE_MEDIA_TYPE,
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Expand user paths into import candidates.
///
/// Files are offered as-is; directories are walked according to `settings`.
/// Missing paths are logged and dropped.
pub fn collect_candidates(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<ImportCandidate> {
    let mut candidates = Vec::new();

    for root in paths {
        if root.is_file() {
            candidates.push(ImportCandidate::from_path(root, settings));
            continue;
        }
        if !root.is_dir() {
            warn!("import path does not exist: {}", root.display());
            continue;
        }

        let mut walker = WalkDir::new(root)
            .follow_links(settings.follow_links)
            .sort_by_file_name();
        // Non-recursive = only the root directory.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        for entry in walker
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
        {
            if entry.file_type().is_file() || entry.path().is_file() {
                candidates.push(ImportCandidate::from_path(entry.path(), settings));
            }
        }
    }

    candidates
}
