use std::fmt;
use std::io::{Read, Seek};

use tracing::{debug, trace};

use crate::constants::*;
use crate::error::Result;
use crate::memory::{BackingStore, PhysicalMemory};
use crate::page_table::PageTable;
use crate::stats::Statistics;
use crate::tlb::Tlb;

/// Represents the decomposed components of a logical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub raw: u32,
    pub page: u8,
    pub offset: u8,
}

impl LogicalAddress {
    /// Decompose a raw address; bits above the low 16 are ignored
    pub fn from_raw(raw: u32) -> Self {
        let page = ((raw & PAGE_MASK) >> PAGE_SHIFT) as u8;
        let offset = (raw & OFFSET_MASK) as u8;

        LogicalAddress { raw, page, offset }
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LA({}) = (p={}, d={})", self.raw, self.page, self.offset)
    }
}

/// Where a translation was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    TlbHit,
    PageTableHit,
    PageFault,
}

/// Result of translating one logical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub logical: LogicalAddress,
    pub frame: u8,
    pub physical: u32,
    pub value: i8,
    pub resolution: Resolution,
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "logical address : {} physical address : {} value : {}",
            self.logical.raw, self.physical, self.value
        )
    }
}

/// Everything that persists between references: the page table, the TLB,
/// physical memory and the counters.
pub struct TranslatorState {
    page_table: PageTable,
    tlb: Tlb,
    memory: PhysicalMemory,
    clock: u64,
    page_table_hits: u64,
    page_faults: u64,
}

impl TranslatorState {
    pub fn new() -> Self {
        Self::with_frames(NUM_FRAMES)
    }

    pub fn with_frames(frames: usize) -> Self {
        TranslatorState {
            page_table: PageTable::new(),
            tlb: Tlb::new(),
            memory: PhysicalMemory::with_frames(frames),
            clock: 0,
            page_table_hits: 0,
            page_faults: 0,
        }
    }

    /// Translate one logical address, servicing a page fault from `store`
    /// if neither the TLB nor the page table knows the page.
    pub fn translate<R: Read + Seek>(
        &mut self,
        la: LogicalAddress,
        store: &mut BackingStore<R>,
    ) -> Result<Translation> {
        self.clock += 1;
        let now = self.clock;

        let (frame, resolution) = if let Some(frame) = self.tlb.lookup(la.page, now) {
            trace!(page = la.page, frame, "tlb hit");
            (frame, Resolution::TlbHit)
        } else if let Some(frame) = self.page_table.lookup(la.page) {
            trace!(page = la.page, frame, "page table hit");
            self.page_table_hits += 1;
            self.tlb.insert(la.page, frame, now);
            (frame, Resolution::PageTableHit)
        } else {
            self.page_faults += 1;
            (self.service_fault(la.page, store, now)?, Resolution::PageFault)
        };

        Ok(Translation {
            logical: la,
            frame,
            physical: PhysicalMemory::frame_to_address(frame) + la.offset as u32,
            value: self.memory.read(frame, la.offset),
            resolution,
        })
    }

    fn service_fault<R: Read + Seek>(
        &mut self,
        page: u8,
        store: &mut BackingStore<R>,
        now: u64,
    ) -> Result<u8> {
        debug!(page, "page fault");
        let data = store.read_page(page)?;
        let frame = self.memory.allocate(page, &data)?;
        self.page_table.install(page, frame);
        self.tlb.insert(page, frame, now);
        Ok(frame)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            references: self.clock,
            tlb_hits: self.tlb.hits(),
            page_table_hits: self.page_table_hits,
            page_faults: self.page_faults,
        }
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }
}

impl Default for TranslatorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a batch of raw addresses in order, stopping at the first error
pub fn translate_batch<R: Read + Seek>(
    state: &mut TranslatorState,
    store: &mut BackingStore<R>,
    raws: &[u32],
) -> Result<Vec<Translation>> {
    raws.iter()
        .map(|&raw| state.translate(LogicalAddress::from_raw(raw), store))
        .collect()
}
