//! Music library: scanning a folder for playable files and deriving titles.

mod model;
mod scan;
mod title;

pub use model::Track;
pub use scan::scan;
pub use title::{display_title, read_title};

#[cfg(test)]
mod tests;
