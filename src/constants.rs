pub const OFFSET_BITS: u32 = 8;
pub const PAGE_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
pub const PT_SIZE: usize = 1 << PAGE_BITS;

pub const NUM_FRAMES: usize = 256;
pub const PM_SIZE: usize = NUM_FRAMES * PAGE_SIZE;

pub const TLB_ENTRIES: usize = 16;

pub const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;
pub const PAGE_MASK: u32 = ((1 << PAGE_BITS) - 1) << OFFSET_BITS;
pub const PAGE_SHIFT: u32 = OFFSET_BITS;

pub const DEFAULT_BACKING_STORE: &str = "BACKING_STORE.bin";
