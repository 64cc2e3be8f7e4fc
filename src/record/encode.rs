// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Little-endian primitive encoders for the bag wire format.
//!
//! All multi-byte integers in a bag file are little-endian and unsigned.
//! ROS `time` values are carried as a pair of u32s (seconds, then
//! nanoseconds within the second).

/// Write u32 in little-endian format.
pub fn write_u32(buffer: &mut Vec<u8>, value: u32) {
    buffer.extend_from_slice(&value.to_le_bytes());
}

/// Convert u32 to little-endian bytes.
pub fn u32_to_bytes(value: u32) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// Convert u64 to little-endian bytes.
pub fn u64_to_bytes(value: u64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// Convert a (sec, nsec) time to its 8-byte little-endian wire form.
pub fn time_to_bytes(time: (u32, u32)) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8);
    bytes.extend_from_slice(&time.0.to_le_bytes());
    bytes.extend_from_slice(&time.1.to_le_bytes());
    bytes
}

/// Convert nanoseconds to a (sec, nsec) pair.
///
/// Seconds beyond u32 range are not expected from real timestamps; such
/// inputs wrap and the resulting bag is undefined.
pub fn ns_to_time(ns: u64) -> (u32, u32) {
    let sec = (ns / 1_000_000_000) as u32;
    let nsec = (ns % 1_000_000_000) as u32;
    (sec, nsec)
}

/// Convert a nanosecond timestamp directly to its 8-byte wire form.
pub fn ns_to_bytes(ns: u64) -> Vec<u8> {
    time_to_bytes(ns_to_time(ns))
}
