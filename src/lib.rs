pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod page_table;
pub mod stats;
pub mod tlb;
pub mod translation;

// Re-export commonly used items for convenience
pub use config::Config;
pub use constants::*;
pub use error::{Result, VmError};
pub use stats::Statistics;
pub use translation::{LogicalAddress, Resolution, Translation, TranslatorState};
