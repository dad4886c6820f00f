use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;
use crate::error::ScanError;

use super::model::Track;
use super::title::{display_title, read_title};

fn is_playable_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}

fn is_hidden(path: &Path) -> bool {
    file_name(path).starts_with('.')
}

fn is_metadata_file(path: &Path, settings: &LibrarySettings) -> bool {
    let name = file_name(path);
    settings
        .ignore_prefixes
        .iter()
        .any(|p| !p.is_empty() && name.starts_with(p.as_str()))
}

fn descend_into(entry: &DirEntry, settings: &LibrarySettings) -> bool {
    entry.depth() == 0 || !entry.file_type().is_dir() || settings.include_hidden || !is_hidden(entry.path())
}

/// Collect every playable file under `root`.
///
/// The result is sorted by path so that a seeded shuffle is reproducible
/// regardless of the order the filesystem hands entries back in. Any walk
/// error aborts the whole scan.
pub fn scan(root: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, ScanError> {
    let mut tracks: Vec<Track> = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|e| descend_into(e, settings));

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if !entry.file_type().is_file() {
            continue;
        }
        if is_metadata_file(path, settings) || (!settings.include_hidden && is_hidden(path)) {
            continue;
        }
        if !is_playable_file(path, settings) {
            continue;
        }

        debug!(path = %path.display(), "found playable file");
        tracks.push(Track {
            path: path.to_path_buf(),
            title: display_title(&read_title(path), &settings.extensions),
        });
    }

    tracks.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(tracks)
}
