use std::path::PathBuf;

/// One playable file found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Track {
    pub path: PathBuf,
    /// Tag title, or the file name without a known extension.
    pub title: String,
}
