use std::path::Path;

use lofty::prelude::*;

/// Title for `path`: the tag title when the file carries one, otherwise the
/// file name (extension included, see [`display_title`]).
pub fn read_title(path: &Path) -> String {
    let fallback = || {
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string()
    };

    let Ok(tagged) = lofty::read_from_path(path) else {
        return fallback();
    };

    tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .and_then(|tag| tag.title().map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(fallback)
}

/// Strip a trailing known extension (case-insensitive) so `Song.mp4` shows as `Song`.
pub fn display_title(raw: &str, extensions: &[String]) -> String {
    let raw = raw.trim();
    for ext in extensions {
        let ext = ext.trim().trim_start_matches('.');
        if ext.is_empty() || raw.len() <= ext.len() + 1 {
            continue;
        }
        let split = raw.len() - ext.len() - 1;
        if !raw.is_char_boundary(split) {
            continue;
        }
        let (stem, tail) = raw.split_at(split);
        if tail.starts_with('.') && tail[1..].eq_ignore_ascii_case(ext) {
            return stem.trim_end().to_string();
        }
    }
    raw.to_string()
}
