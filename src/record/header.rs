// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Key-value record headers.
//!
//! Every bag record starts with a header: a 4-byte little-endian total
//! length, then one `key=value` field per entry, each prefixed with its own
//! 4-byte length. Keys are ASCII, values are raw binary. Readers identify
//! the record type through the synthetic `op` field, which must come first
//! when present.
//!
//! Field order is significant for byte-exact output, so the header keeps
//! its fields in insertion order rather than in a sorted map.

use crate::record::encode::{ns_to_bytes, u32_to_bytes, u64_to_bytes, write_u32};

/// An ordered key-value map serialized as a bag record header.
#[derive(Debug, Clone, Default)]
pub struct RecordHeader {
    fields: Vec<(String, Vec<u8>)>,
}

impl RecordHeader {
    /// Create an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a u32 field.
    pub fn set_u32(&mut self, key: &str, value: u32) -> &mut Self {
        self.fields.push((key.to_string(), u32_to_bytes(value)));
        self
    }

    /// Insert a u64 field.
    pub fn set_u64(&mut self, key: &str, value: u64) -> &mut Self {
        self.fields.push((key.to_string(), u64_to_bytes(value)));
        self
    }

    /// Insert a string field (raw bytes, no terminator).
    pub fn set_string(&mut self, key: &str, value: &str) -> &mut Self {
        self.fields
            .push((key.to_string(), value.as_bytes().to_vec()));
        self
    }

    /// Insert a ROS time field from a nanosecond timestamp.
    pub fn set_time(&mut self, key: &str, ns: u64) -> &mut Self {
        self.fields.push((key.to_string(), ns_to_bytes(ns)));
        self
    }

    /// Number of fields inserted so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the header has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize the header, optionally prefixed with an `op` field.
    ///
    /// The result is the 4-byte total length followed by every field in
    /// insertion order; the `op` field, when given, is emitted first.
    pub fn serialize(&self, op: Option<u8>) -> Vec<u8> {
        let mut body = Vec::new();

        if let Some(op) = op {
            Self::write_field(&mut body, "op", &[op]);
        }
        for (key, value) in &self.fields {
            Self::write_field(&mut body, key, value);
        }

        let mut buffer = Vec::with_capacity(4 + body.len());
        write_u32(&mut buffer, body.len() as u32);
        buffer.extend(body);
        buffer
    }

    fn write_field(buffer: &mut Vec<u8>, key: &str, value: &[u8]) {
        // field_len (4 bytes) + key + '=' + value
        let field_len = key.len() + 1 + value.len();
        write_u32(buffer, field_len as u32);
        buffer.extend_from_slice(key.as_bytes());
        buffer.push(b'=');
        buffer.extend_from_slice(value);
    }
}
