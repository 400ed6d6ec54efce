use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VmError {
    #[error("{} failed to open", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("backing store read failed for page {page}")]
    BackingStore {
        page: u8,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: invalid logical address {text:?}")]
    MalformedAddress { line: usize, text: String },

    #[error("page {page} faulted but all {frames} frames are allocated")]
    FramesExhausted { page: u8, frames: usize },

    #[error("frame count {frames} outside 1..={max}")]
    InvalidFrameCount { frames: usize, max: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VmError>;
