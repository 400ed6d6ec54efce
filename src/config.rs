use std::path::PathBuf;

use crate::constants::{DEFAULT_BACKING_STORE, NUM_FRAMES};

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub address_file: PathBuf,
    pub backing_store: PathBuf,
    /// Physical frames, 1..=`NUM_FRAMES`; `io::run` rejects anything else
    pub frames: usize,
}

impl Config {
    pub fn new(address_file: impl Into<PathBuf>) -> Self {
        Config {
            address_file: address_file.into(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address_file: PathBuf::new(),
            backing_store: PathBuf::from(DEFAULT_BACKING_STORE),
            frames: NUM_FRAMES,
        }
    }
}
