use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DedupError {
    #[error("input file not found: {path}")]
    MissingInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input files differ in length: {hashes} hashes, {moves} moves, {scores} scores")]
    LengthMismatch {
        hashes: usize,
        moves: usize,
        scores: usize,
    },

    #[error("input file is not valid UTF-8: {path}")]
    Utf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
