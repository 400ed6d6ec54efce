//! End-to-end runs against a backing store file on disk.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;
use vm_manager::io::run;
use vm_manager::{Config, PAGE_SIZE, PT_SIZE, VmError};

/// Byte (page, offset) of the store is (page * 7 + offset) truncated
fn store_byte(page: usize, offset: usize) -> i8 {
    (page * 7 + offset) as u8 as i8
}

fn setup(addresses: &str, store_len: usize) -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let store: Vec<u8> = (0..store_len)
        .map(|i| store_byte(i / PAGE_SIZE, i % PAGE_SIZE) as u8)
        .collect();
    let store_path = dir.path().join("BACKING_STORE.bin");
    fs::write(&store_path, store).unwrap();

    let addr_path = dir.path().join("addresses.txt");
    fs::write(&addr_path, addresses).unwrap();

    let config = Config {
        backing_store: store_path,
        ..Config::new(addr_path)
    };
    (dir, config)
}

fn full_store() -> usize {
    PT_SIZE * PAGE_SIZE
}

#[test]
fn test_single_address() {
    let (_dir, config) = setup("1\n", full_store());
    let mut out = Vec::new();
    let stats = run(&config, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        format!("logical address : 1 physical address : 1 value : {}", store_byte(0, 1))
    );
    assert_eq!(lines.next().unwrap(), "Page-fault rate : 1.000000 (100.00%)");
    assert_eq!(lines.next().unwrap(), "TLB hit rate : 0.000000 (0.00%)");
    assert_eq!(stats.page_faults, 1);
}

#[test]
fn test_repeated_address_hits_tlb() {
    let (_dir, config) = setup("1\n1\n", full_store());
    let mut out = Vec::new();
    let stats = run(&config, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], lines[1]);
    assert_eq!(stats.references, 2);
    assert_eq!(stats.tlb_hits, 1);
    assert_eq!(stats.page_faults, 1);
    assert_eq!(lines[3], "TLB hit rate : 0.500000 (50.00%)");
}

#[test]
fn test_seventeen_pages_then_first_again() {
    let mut input: String = (0..17u32).map(|p| format!("{}\n", p << 8)).collect();
    input.push_str("3\n");
    let (_dir, config) = setup(&input, full_store());

    let mut out = Vec::new();
    let stats = run(&config, &mut out).unwrap();

    assert_eq!(stats.references, 18);
    assert_eq!(stats.page_faults, 17);
    assert_eq!(stats.page_table_hits, 1);
    assert_eq!(stats.tlb_hits, 0);

    let text = String::from_utf8(out).unwrap();
    let last = text.lines().nth(17).unwrap();
    assert_eq!(
        last,
        format!("logical address : 3 physical address : 3 value : {}", store_byte(0, 3))
    );
}

#[test]
fn test_physical_address_uses_allocated_frame() {
    // page 244 faults first, so it lands in frame 0
    let (_dir, config) = setup("62493\n16916\n", full_store());
    let mut out = Vec::new();
    run(&config, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        format!("logical address : 62493 physical address : 29 value : {}", store_byte(244, 29))
    );
    assert_eq!(
        lines[1],
        format!("logical address : 16916 physical address : 276 value : {}", store_byte(66, 20))
    );
}

#[test]
fn test_rates_partition_references() {
    let input = "0\n256\n0\n512\n256\n768\n0\n";
    let (_dir, config) = setup(input, full_store());
    let stats = run(&config, &mut io::sink()).unwrap();

    assert_eq!(
        stats.tlb_hits + stats.page_table_hits + stats.page_faults,
        stats.references
    );
    assert!((0.0..=1.0).contains(&stats.page_fault_rate()));
    assert!((0.0..=1.0).contains(&stats.tlb_hit_rate()));
}

#[test]
fn test_malformed_line_keeps_earlier_output() {
    let (_dir, config) = setup("1\n2\nbogus\n3\n", full_store());
    let mut out = Vec::new();
    let err = run(&config, &mut out).unwrap_err();

    assert!(matches!(err, VmError::MalformedAddress { line: 3, .. }));
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_short_backing_store_aborts() {
    let (_dir, config) = setup("5\n300\n", PAGE_SIZE);
    let mut out = Vec::new();
    let err = run(&config, &mut out).unwrap_err();

    assert!(matches!(err, VmError::BackingStore { page: 1, .. }));
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
}

#[test]
fn test_frame_exhaustion() {
    let (_dir, mut config) = setup("0\n256\n512\n", full_store());
    config.frames = 2;
    let err = run(&config, &mut io::sink()).unwrap_err();
    assert!(matches!(err, VmError::FramesExhausted { page: 2, frames: 2 }));
}

#[test]
fn test_frame_count_out_of_range() {
    for frames in [0, 257] {
        let (_dir, mut config) = setup("1\n", full_store());
        config.frames = frames;
        let mut out = Vec::new();
        let err = run(&config, &mut out).unwrap_err();
        assert!(matches!(err, VmError::InvalidFrameCount { max: 256, .. }));
        assert!(out.is_empty());
    }
}

#[test]
fn test_missing_backing_store() {
    let (dir, mut config) = setup("1\n", full_store());
    config.backing_store = dir.path().join("missing.bin");
    let err = run(&config, &mut io::sink()).unwrap_err();
    assert!(matches!(err, VmError::Open { ref path, .. } if path.ends_with("missing.bin")));
}

#[test]
fn test_missing_address_file() {
    let (_dir, config) = setup("", full_store());
    let config = Config {
        address_file: PathBuf::from("/nonexistent/addresses.txt"),
        ..config
    };
    assert!(matches!(run(&config, &mut io::sink()), Err(VmError::Open { .. })));
}

#[test]
fn test_empty_address_file() {
    let (_dir, config) = setup("", full_store());
    let mut out = Vec::new();
    let stats = run(&config, &mut out).unwrap();
    assert_eq!(stats.references, 0);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Page-fault rate : 0.000000 (0.00%)\nTLB hit rate : 0.000000 (0.00%)\n"
    );
}
