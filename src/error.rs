use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the command line.
///
/// The renderer itself never fails on bad input (an unknown color or an empty
/// line just renders nothing). These cover the outer surface: files that
/// cannot be read and names that do not resolve to any art.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to read config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown ascii art: {0}")]
    UnknownArt(String),

    #[error("failed to read ascii art file {}: {source}", path.display())]
    ArtFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
