//! Translation lookaside buffer.
//!
//! Fully associative, `TLB_ENTRIES` slots, least-recently-used replacement.
//! Each occupied slot carries the access time of its own last use; the
//! caller supplies that time from its reference counter.

use tracing::trace;

use crate::constants::TLB_ENTRIES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page: u8,
    pub frame: u8,
    pub last_access: u64,
}

#[derive(Debug, Clone)]
pub struct Tlb {
    slots: [Option<TlbEntry>; TLB_ENTRIES],
    hits: u64,
}

impl Tlb {
    pub fn new() -> Self {
        Tlb {
            slots: [None; TLB_ENTRIES],
            hits: 0,
        }
    }

    /// Look up `page`, refreshing its access time to `now` on a hit
    pub fn lookup(&mut self, page: u8, now: u64) -> Option<u8> {
        let entry = self.slots.iter_mut().flatten().find(|e| e.page == page)?;
        entry.last_access = now;
        self.hits += 1;
        Some(entry.frame)
    }

    /// Insert a mapping, evicting the least recently used entry when full
    ///
    /// Empty slots are filled first, in slot order. Among occupied slots the
    /// one with the smallest access time goes; ties go to the lowest slot.
    pub fn insert(&mut self, page: u8, frame: u8, now: u64) {
        let entry = TlbEntry {
            page,
            frame,
            last_access: now,
        };

        if let Some(slot) = self.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(entry);
            return;
        }

        let victim = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|e| (i, e.last_access)))
            .min_by_key(|&(_, t)| t)
            .map_or(0, |(i, _)| i);

        if let Some(old) = self.slots[victim] {
            trace!(evicted = old.page, page, slot = victim, "tlb eviction");
        }
        self.slots[victim] = Some(entry);
    }

    pub fn contains(&self, page: u8) -> bool {
        self.entries().any(|e| e.page == page)
    }

    /// Occupied entries in slot order
    pub fn entries(&self) -> impl Iterator<Item = &TlbEntry> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }
}

impl Default for Tlb {
    fn default() -> Self {
        Self::new()
    }
}
