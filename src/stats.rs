use std::fmt;

/// Reference counters for a run. Every reference lands in exactly one of
/// `tlb_hits`, `page_table_hits` or `page_faults`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub references: u64,
    pub tlb_hits: u64,
    pub page_table_hits: u64,
    pub page_faults: u64,
}

impl Statistics {
    pub fn page_fault_rate(&self) -> f64 {
        ratio(self.page_faults, self.references)
    }

    pub fn tlb_hit_rate(&self) -> f64 {
        ratio(self.tlb_hits, self.references)
    }
}

fn ratio(n: u64, d: u64) -> f64 {
    if d == 0 { 0.0 } else { n as f64 / d as f64 }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faults = self.page_fault_rate();
        let hits = self.tlb_hit_rate();
        writeln!(f, "Page-fault rate : {:.6} ({:.2}%)", faults, faults * 100.0)?;
        write!(f, "TLB hit rate : {:.6} ({:.2}%)", hits, hits * 100.0)
    }
}
