use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::constants::*;
use crate::error::{Result, VmError};

/// One page worth of signed bytes, as stored in a frame.
pub type Page = [i8; PAGE_SIZE];

pub struct PhysicalMemory {
    frames: Vec<Page>,
    /// First-fit cursor; only ever moves forward.
    next_free: usize,
}

impl PhysicalMemory {
    /// Create a physical memory with the full complement of frames
    pub fn new() -> Self {
        Self::with_frames(NUM_FRAMES)
    }

    /// Create a physical memory with `frames` frames, all zeroed
    ///
    /// # Panics
    /// If `frames` is zero or larger than `NUM_FRAMES`, since frame numbers
    /// must fit in a byte.
    pub fn with_frames(frames: usize) -> Self {
        assert!(
            (1..=NUM_FRAMES).contains(&frames),
            "frame count {} outside 1..={}",
            frames,
            NUM_FRAMES
        );
        PhysicalMemory {
            frames: vec![[0i8; PAGE_SIZE]; frames],
            next_free: 0,
        }
    }

    /// Copy `data` into the next free frame and return its number
    ///
    /// Frames are never reclaimed, so once every frame has been handed out
    /// this fails with `FramesExhausted`.
    pub fn allocate(&mut self, page: u8, data: &Page) -> Result<u8> {
        if self.next_free >= self.frames.len() {
            return Err(VmError::FramesExhausted {
                page,
                frames: self.frames.len(),
            });
        }
        let frame = self.next_free;
        self.frames[frame] = *data;
        self.next_free += 1;
        debug!(page, frame, "allocated frame");
        Ok(frame as u8)
    }

    /// Read a byte from physical memory
    #[inline]
    pub fn read(&self, frame: u8, offset: u8) -> i8 {
        self.frames[frame as usize][offset as usize]
    }

    /// Number of frames handed out so far
    pub fn allocated(&self) -> usize {
        self.next_free
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Calculate the starting address of a frame
    #[inline]
    pub fn frame_to_address(frame: u8) -> u32 {
        frame as u32 * PAGE_SIZE as u32
    }
}

impl Default for PhysicalMemory {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the backing store, addressed one page at a time.
#[derive(Debug)]
pub struct BackingStore<R> {
    reader: R,
}

impl BackingStore<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| VmError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(BackingStore { reader: file })
    }
}

impl<R: Read + Seek> BackingStore<R> {
    pub fn from_reader(reader: R) -> Self {
        BackingStore { reader }
    }

    /// Read the whole block for `page`, seeking to `page * PAGE_SIZE`
    ///
    /// A store too short to hold the full block is an error; partial pages
    /// are never returned.
    pub fn read_page(&mut self, page: u8) -> Result<Page> {
        let mut raw = [0u8; PAGE_SIZE];
        let offset = page as u64 * PAGE_SIZE as u64;
        self.reader
            .seek(SeekFrom::Start(offset))
            .and_then(|_| self.reader.read_exact(&mut raw))
            .map_err(|source| VmError::BackingStore { page, source })?;
        Ok(raw.map(|b| b as i8))
    }
}
