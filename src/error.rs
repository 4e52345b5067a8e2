use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Unrecognized file extension for {}: expected .{expected}", path.display())]
    UnrecognizedExtension { path: PathBuf, expected: &'static str },

    // Configuration errors
    #[error("Invalid window size: {size} (must be between 1 and {max})")]
    InvalidWindowSize { size: usize, max: usize },

    #[error("Invalid buffer size: {size} (must be between 2 and {max})")]
    InvalidBufferSize { size: usize, max: usize },

    // Token stream errors
    #[error("Back-reference distance {distance} exceeds decoded output {available}")]
    InvalidBackReference { distance: usize, available: usize },

    #[error("Inconsistent token: distance={distance}, length={length}")]
    InvalidToken { distance: usize, length: usize },

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

pub type Result<T> = std::result::Result<T, Error>;
