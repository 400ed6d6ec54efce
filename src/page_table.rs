use crate::constants::PT_SIZE;

/// Single-level page table, one entry per page number.
///
/// Entries start unmapped and are written at most once; there is no
/// eviction, so a mapping lives for the rest of the run.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: [Option<u8>; PT_SIZE],
}

impl PageTable {
    pub fn new() -> Self {
        PageTable {
            entries: [None; PT_SIZE],
        }
    }

    #[inline]
    pub fn lookup(&self, page: u8) -> Option<u8> {
        self.entries[page as usize]
    }

    /// Commit a page -> frame mapping
    ///
    /// # Panics
    /// If `page` is already mapped. The translator only installs after a
    /// miss, so this indicates a bug rather than bad input.
    pub fn install(&mut self, page: u8, frame: u8) {
        let entry = &mut self.entries[page as usize];
        assert!(
            entry.is_none(),
            "page {} already mapped to frame {:?}",
            page,
            entry
        );
        *entry = Some(frame);
    }

    /// Number of pages currently mapped
    pub fn mapped(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}
