use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::constants::NUM_FRAMES;
use crate::error::{Result, VmError};
use crate::memory::BackingStore;
use crate::stats::Statistics;
use crate::translation::{LogicalAddress, TranslatorState};

/// Parse one line of the address file
///
/// Blank lines yield `None`. Anything else must be a non-negative decimal
/// integer; `line` is the 1-based line number used in the error.
pub fn parse_address(line: usize, text: &str) -> Result<Option<u32>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| VmError::MalformedAddress {
            line,
            text: trimmed.to_string(),
        })
}

/// Lazily read addresses from a line-oriented source
pub fn read_addresses<B: BufRead>(reader: B) -> impl Iterator<Item = Result<u32>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(text) => parse_address(i + 1, &text).transpose(),
            Err(e) => Some(Err(VmError::Io(e))),
        })
}

pub fn open_addresses<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| VmError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Translate every address in the configured file, writing one line per
/// address to `out` as it resolves, followed by the summary.
///
/// Output already written stays written if a later address fails.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<Statistics> {
    if !(1..=NUM_FRAMES).contains(&config.frames) {
        return Err(VmError::InvalidFrameCount {
            frames: config.frames,
            max: NUM_FRAMES,
        });
    }

    let addresses = open_addresses(&config.address_file)?;
    let mut store = BackingStore::open(&config.backing_store)?;
    let mut state = TranslatorState::with_frames(config.frames);

    info!(
        addresses = %config.address_file.display(),
        backing_store = %config.backing_store.display(),
        frames = config.frames,
        "starting translation"
    );

    for raw in read_addresses(addresses) {
        let translation = state.translate(LogicalAddress::from_raw(raw?), &mut store)?;
        writeln!(out, "{}", translation)?;
    }

    let stats = state.statistics();
    info!(
        references = stats.references,
        tlb_hits = stats.tlb_hits,
        page_table_hits = stats.page_table_hits,
        page_faults = stats.page_faults,
        "translation finished"
    );
    writeln!(out, "{}", stats)?;
    out.flush()?;
    Ok(stats)
}
