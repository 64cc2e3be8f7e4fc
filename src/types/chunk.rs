// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Chunk accumulation for the bag writer.
//!
//! A chunk is an append-only byte buffer holding connection and message
//! records, together with the per-connection index entries needed to emit
//! IDXDATA records when the chunk is flushed. The writer always has exactly
//! one active [`ChunkBuilder`]; flushed chunks survive as [`ChunkInfo`]
//! summaries until the trailing index is written at close.

use std::collections::BTreeMap;

/// Sentinel for a chunk that never saw a message.
pub const TIME_UNSET: u64 = u64::MAX;

/// Index entry for one message within a chunk.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry {
    /// Message timestamp (nanoseconds)
    pub time_ns: u64,
    /// Offset of the MSGDATA record within the chunk body
    pub offset: u32,
}

/// The active, not-yet-flushed chunk.
#[derive(Debug)]
pub struct ChunkBuilder {
    /// Accumulated chunk body (connection + message records)
    data: Vec<u8>,
    /// Earliest message timestamp, `TIME_UNSET` until a message arrives
    start_ns: u64,
    /// Latest message timestamp
    end_ns: u64,
    /// Per-connection index entries, keyed by connection id
    connections: BTreeMap<u32, Vec<IndexEntry>>,
}

impl Default for ChunkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkBuilder {
    /// Create an empty chunk.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            start_ns: TIME_UNSET,
            end_ns: 0,
            connections: BTreeMap::new(),
        }
    }

    /// Append raw record bytes to the chunk body.
    pub fn append(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Current body size; also the offset the next appended record gets.
    pub fn offset(&self) -> usize {
        self.data.len()
    }

    /// Total bytes accumulated so far.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The accumulated chunk body.
    pub fn body(&self) -> &[u8] {
        &self.data
    }

    /// Record an index entry for a message about to be appended.
    ///
    /// Must be called before the MSGDATA record is appended so that the
    /// captured offset points at the record's first byte. Also folds the
    /// timestamp into the chunk's start/end bounds.
    pub fn record_message(&mut self, conn_id: u32, time_ns: u64) {
        let offset = self.data.len() as u32;
        self.connections
            .entry(conn_id)
            .or_default()
            .push(IndexEntry { time_ns, offset });

        if self.start_ns == TIME_UNSET || time_ns < self.start_ns {
            self.start_ns = time_ns;
        }
        if time_ns > self.end_ns {
            self.end_ns = time_ns;
        }
    }

    /// Earliest message timestamp, or `TIME_UNSET`.
    pub fn start_ns(&self) -> u64 {
        self.start_ns
    }

    /// Latest message timestamp.
    pub fn end_ns(&self) -> u64 {
        self.end_ns
    }

    /// Index entries per connection, in ascending id order.
    pub fn connections(&self) -> &BTreeMap<u32, Vec<IndexEntry>> {
        &self.connections
    }

    /// Summarize this chunk after it was flushed at `pos`.
    pub fn to_info(&self, pos: u64) -> ChunkInfo {
        let message_counts = self
            .connections
            .iter()
            .map(|(&id, entries)| (id, entries.len() as u32))
            .collect();

        ChunkInfo {
            pos,
            start_ns: self.start_ns,
            end_ns: self.end_ns,
            message_counts,
        }
    }
}

/// Summary of a flushed chunk, kept for the trailing CHUNK_INFO records.
#[derive(Debug, Clone)]
pub struct ChunkInfo {
    /// Absolute file offset of the chunk's CHUNK record
    pub pos: u64,
    /// Earliest message timestamp, `TIME_UNSET` if the chunk held no messages
    pub start_ns: u64,
    /// Latest message timestamp
    pub end_ns: u64,
    /// Message count per connection id, in ascending id order
    pub message_counts: BTreeMap<u32, u32>,
}
