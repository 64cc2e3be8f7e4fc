// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Connection bookkeeping.
//!
//! A connection binds a topic to a message schema. Connections are created
//! through [`BagWriter::add_connection`](crate::writer::BagWriter::add_connection)
//! and identified by dense zero-based ids. Their records are written twice:
//! into the chunk that was active when they were added, and again into the
//! trailing index region when the bag is closed.

use crate::record::{RecordHeader, OP_CONNECTION};

/// Opaque handle for a registered connection.
///
/// Only valid against the writer that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub(crate) u32);

impl ConnectionId {
    /// The dense zero-based index of this connection.
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Optional fields for [`BagWriter::add_connection_with`](crate::writer::BagWriter::add_connection_with).
///
/// When `msgdef` or `md5sum` is left out, the writer falls back to the
/// predefined schema table for the connection's message type.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    /// Full message definition text
    pub msgdef: Option<String>,
    /// MD5 sum of the message definition (32 hex characters)
    pub md5sum: Option<String>,
    /// Publishing node name
    pub callerid: Option<String>,
    /// Latching flag, serialized as its decimal form
    pub latching: Option<u32>,
}

impl ConnectionOptions {
    /// Create empty options (schema resolved from the predefined table).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message definition text.
    pub fn msgdef(mut self, msgdef: impl Into<String>) -> Self {
        self.msgdef = Some(msgdef.into());
        self
    }

    /// Set the md5sum.
    pub fn md5sum(mut self, md5sum: impl Into<String>) -> Self {
        self.md5sum = Some(md5sum.into());
        self
    }

    /// Set the callerid.
    pub fn callerid(mut self, callerid: impl Into<String>) -> Self {
        self.callerid = Some(callerid.into());
        self
    }

    /// Set the latching flag. Values outside {0, 1} are not validated.
    pub fn latching(mut self, latching: u32) -> Self {
        self.latching = Some(latching);
        self
    }
}

/// A registered connection.
#[derive(Debug, Clone)]
pub(crate) struct Connection {
    pub id: u32,
    pub topic: String,
    pub msgtype: String,
    pub msgdef: String,
    pub md5sum: String,
    pub callerid: Option<String>,
    pub latching: Option<u32>,
}

impl Connection {
    /// Whether this connection carries the identical six-field tuple.
    ///
    /// Connections differing only in an extension field (callerid or
    /// latching) are distinct.
    pub fn matches(
        &self,
        topic: &str,
        msgtype: &str,
        msgdef: &str,
        md5sum: &str,
        callerid: Option<&str>,
        latching: Option<u32>,
    ) -> bool {
        self.topic == topic
            && self.msgtype == msgtype
            && self.msgdef == msgdef
            && self.md5sum == md5sum
            && self.callerid.as_deref() == callerid
            && self.latching == latching
    }

    /// Serialize this connection's record pair.
    ///
    /// The first header names the record (`op`, `conn`, `topic`); the
    /// second carries the connection details and doubles as the record's
    /// data section.
    pub fn serialize_records(&self) -> Vec<u8> {
        let mut head = RecordHeader::new();
        head.set_u32("conn", self.id).set_string("topic", &self.topic);
        let mut out = head.serialize(Some(OP_CONNECTION));

        let mut data = RecordHeader::new();
        data.set_string("topic", &self.topic)
            .set_string("type", &self.msgtype)
            .set_string("md5sum", &self.md5sum)
            .set_string("message_definition", &self.msgdef);
        if let Some(callerid) = &self.callerid {
            data.set_string("callerid", callerid);
        }
        if let Some(latching) = self.latching {
            data.set_string("latching", &latching.to_string());
        }
        out.extend(data.serialize(None));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_connection() -> Connection {
        Connection {
            id: 0,
            topic: "/foo".to_string(),
            msgtype: "test_msgs/Test".to_string(),
            msgdef: "int8 data".to_string(),
            md5sum: "27ffa0c9c4b8fb8492252bcad9e5c57b".to_string(),
            callerid: None,
            latching: None,
        }
    }

    fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| w == &needle).count()
    }

    #[test]
    fn test_serialize_records_contains_both_headers() {
        let bytes = sample_connection().serialize_records();

        // topic appears in the record header and again in the data header
        assert_eq!(count_occurrences(&bytes, b"topic=/foo"), 2);
        assert_eq!(count_occurrences(&bytes, b"op=\x07"), 1);
        assert_eq!(count_occurrences(&bytes, b"message_definition=int8 data"), 1);
    }

    #[test]
    fn test_serialize_records_extension_fields() {
        let mut conn = sample_connection();
        conn.callerid = Some("src".to_string());
        conn.latching = Some(1);
        let bytes = conn.serialize_records();

        assert_eq!(count_occurrences(&bytes, b"callerid=src"), 1);
        assert_eq!(count_occurrences(&bytes, b"latching=1"), 1);
    }

    #[test]
    fn test_serialize_records_omits_absent_extensions() {
        let bytes = sample_connection().serialize_records();
        assert_eq!(count_occurrences(&bytes, b"callerid"), 0);
        assert_eq!(count_occurrences(&bytes, b"latching"), 0);
    }

    #[test]
    fn test_matches_full_tuple() {
        let conn = sample_connection();
        assert!(conn.matches(
            "/foo",
            "test_msgs/Test",
            "int8 data",
            "27ffa0c9c4b8fb8492252bcad9e5c57b",
            None,
            None
        ));
        // latching alone makes it a distinct connection
        assert!(!conn.matches(
            "/foo",
            "test_msgs/Test",
            "int8 data",
            "27ffa0c9c4b8fb8492252bcad9e5c57b",
            None,
            Some(1)
        ));
        assert!(!conn.matches(
            "/bar",
            "test_msgs/Test",
            "int8 data",
            "27ffa0c9c4b8fb8492252bcad9e5c57b",
            None,
            None
        ));
    }

    #[test]
    fn test_options_fluent_setters() {
        let options = ConnectionOptions::new()
            .msgdef("DEF")
            .md5sum("HASH")
            .callerid("node")
            .latching(0);
        assert_eq!(options.msgdef.as_deref(), Some("DEF"));
        assert_eq!(options.md5sum.as_deref(), Some("HASH"));
        assert_eq!(options.callerid.as_deref(), Some("node"));
        assert_eq!(options.latching, Some(0));
    }
}
