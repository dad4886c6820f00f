//! Utilities for creating `rodio` sinks from media paths.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` that the engine thread starts when it is ready.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::EngineError;

/// Open `path` and find a decodable audio track in it.
pub(super) fn open_source(path: &Path) -> Result<Decoder<BufReader<File>>, EngineError> {
    let media_error = |reason: String| EngineError::Media {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| media_error(e.to_string()))?;
    Decoder::new(BufReader::new(file)).map_err(|e| media_error(e.to_string()))
}

/// Create a paused `Sink` for the media file at `path`.
pub(super) fn create_sink(stream: &OutputStream, path: &Path) -> Result<Sink, EngineError> {
    let source = open_source(path)?;

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
