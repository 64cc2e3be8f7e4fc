// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.
//!
//! A minimal record walker for produced bags: enough parsing to assert the
//! on-disk layout byte by byte, without being a read path.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::PathBuf;

use byteorder::{LittleEndian, ReadBytesExt};

// ============================================================================
// Temp files
// ============================================================================

/// Get a temporary directory for test files
fn temp_dir() -> PathBuf {
    // Use a combination of process ID and a random element to avoid collisions
    // when tests run in parallel
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    std::env::temp_dir().join(format!(
        "rosbag_writer_test_{}_{}",
        std::process::id(),
        random
    ))
}

/// Create a temporary bag file path and a cleanup guard for the directory.
/// The guard ensures the temporary directory is removed when the test completes.
pub fn temp_bag_path(name: &str) -> (PathBuf, CleanupGuard) {
    let dir = temp_dir();
    fs::create_dir_all(&dir).ok();
    let path = dir.join(format!("{}.bag", name));
    let guard = CleanupGuard(dir);
    (path, guard)
}

/// Cleanup guard for test temporary files.
#[derive(Debug)]
pub struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

// ============================================================================
// Record walking
// ============================================================================

/// One parsed record: key-value header plus raw data section.
#[derive(Debug, Clone)]
pub struct Record {
    /// Offset of the record's header length prefix within the walked bytes
    pub pos: u64,
    /// Value of the `op` field, if present
    pub op: Option<u8>,
    /// Header fields (op included)
    pub fields: HashMap<String, Vec<u8>>,
    /// Data section bytes
    pub data: Vec<u8>,
}

fn read_header(cursor: &mut Cursor<&[u8]>) -> HashMap<String, Vec<u8>> {
    let total = cursor.read_u32::<LittleEndian>().unwrap() as u64;
    let end = cursor.position() + total;
    let mut fields = HashMap::new();
    while cursor.position() < end {
        let len = cursor.read_u32::<LittleEndian>().unwrap() as usize;
        let mut buf = vec![0u8; len];
        cursor.read_exact(&mut buf).unwrap();
        let eq = buf
            .iter()
            .position(|&b| b == b'=')
            .expect("header field must contain '='");
        let key = String::from_utf8(buf[..eq].to_vec()).unwrap();
        fields.insert(key, buf[eq + 1..].to_vec());
    }
    assert_eq!(cursor.position(), end, "header fields must fill the header");
    fields
}

fn read_record(cursor: &mut Cursor<&[u8]>) -> Record {
    let pos = cursor.position();
    let fields = read_header(cursor);
    let data_len = cursor.read_u32::<LittleEndian>().unwrap() as usize;
    let mut data = vec![0u8; data_len];
    cursor.read_exact(&mut data).unwrap();
    let op = fields.get("op").and_then(|v| v.first().copied());
    Record {
        pos,
        op,
        fields,
        data,
    }
}

/// Walk every record from `start` to the end of `bytes`.
///
/// Record positions are offsets into `bytes`, so walking a full bag yields
/// absolute file offsets and walking a chunk body yields body offsets.
pub fn walk(bytes: &[u8], start: u64) -> Vec<Record> {
    let mut cursor = Cursor::new(bytes);
    cursor.set_position(start);
    let mut records = Vec::new();
    while (cursor.position() as usize) < bytes.len() {
        records.push(read_record(&mut cursor));
    }
    records
}

/// Assert the magic and walk every record of a produced bag.
pub fn read_bag(bytes: &[u8]) -> Vec<Record> {
    assert!(
        bytes.starts_with(b"#ROSBAG V2.0\n"),
        "bag must start with the version magic"
    );
    walk(bytes, 13)
}

// ============================================================================
// Field accessors
// ============================================================================

pub fn field_u32(record: &Record, key: &str) -> u32 {
    let value = record
        .fields
        .get(key)
        .unwrap_or_else(|| panic!("missing field '{key}'"));
    u32::from_le_bytes(value[..4].try_into().unwrap())
}

pub fn field_u64(record: &Record, key: &str) -> u64 {
    let value = record
        .fields
        .get(key)
        .unwrap_or_else(|| panic!("missing field '{key}'"));
    u64::from_le_bytes(value[..8].try_into().unwrap())
}

/// Decode a ROS time field back to nanoseconds.
pub fn field_time_ns(record: &Record, key: &str) -> u64 {
    let value = record
        .fields
        .get(key)
        .unwrap_or_else(|| panic!("missing field '{key}'"));
    let sec = u32::from_le_bytes(value[..4].try_into().unwrap()) as u64;
    let nsec = u32::from_le_bytes(value[4..8].try_into().unwrap()) as u64;
    sec * 1_000_000_000 + nsec
}

pub fn field_str(record: &Record, key: &str) -> String {
    let value = record
        .fields
        .get(key)
        .unwrap_or_else(|| panic!("missing field '{key}'"));
    String::from_utf8(value.clone()).unwrap()
}

/// Records carrying the given opcode, in file order.
pub fn records_with_op(records: &[Record], op: u8) -> Vec<&Record> {
    records.iter().filter(|r| r.op == Some(op)).collect()
}

/// Count non-overlapping-agnostic occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() || haystack.len() < needle.len() {
        return 0;
    }
    haystack
        .windows(needle.len())
        .filter(|window| window == &needle)
        .count()
}
