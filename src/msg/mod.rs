// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Convenience builders for common ROS1 message payloads.
//!
//! These produce the serialized message bytes handed to
//! [`BagWriter::write`](crate::writer::BagWriter::write). ROS1 serialization
//! is little-endian with length-prefixed strings and no padding; nested
//! messages are flattened in field order.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::core::Result;
use crate::record::encode::ns_to_time;

/// `std_msgs/Header`: sequence number, stamp, and frame id.
#[derive(Debug, Clone, Default)]
pub struct StampedHeader {
    /// Consecutively increasing sequence id
    pub seq: u32,
    /// Timestamp in nanoseconds
    pub stamp_ns: u64,
    /// Frame this data is associated with
    pub frame_id: String,
}

impl StampedHeader {
    /// Create a header.
    pub fn new(seq: u32, stamp_ns: u64, frame_id: impl Into<String>) -> Self {
        Self {
            seq,
            stamp_ns,
            frame_id: frame_id.into(),
        }
    }

    fn write_to(&self, buffer: &mut Vec<u8>) -> Result<()> {
        buffer.write_u32::<LittleEndian>(self.seq)?;
        let (sec, nsec) = ns_to_time(self.stamp_ns);
        buffer.write_u32::<LittleEndian>(sec)?;
        buffer.write_u32::<LittleEndian>(nsec)?;
        write_string(buffer, &self.frame_id)?;
        Ok(())
    }
}

/// `sensor_msgs/Image` payload builder.
#[derive(Debug, Clone)]
pub struct ImageMessage<'a> {
    /// Acquisition time and optical frame
    pub header: StampedHeader,
    /// Number of rows
    pub height: u32,
    /// Number of columns
    pub width: u32,
    /// Pixel encoding, e.g. `rgb8` or `mono8`
    pub encoding: &'a str,
    /// Whether the pixel data is big-endian
    pub is_bigendian: u8,
    /// Full row length in bytes
    pub step: u32,
    /// Raw pixel data, `step * height` bytes
    pub data: &'a [u8],
}

impl ImageMessage<'_> {
    /// Serialize to ROS1 message bytes.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(32 + self.data.len());
        self.header.write_to(&mut buffer)?;
        buffer.write_u32::<LittleEndian>(self.height)?;
        buffer.write_u32::<LittleEndian>(self.width)?;
        write_string(&mut buffer, self.encoding)?;
        buffer.write_u8(self.is_bigendian)?;
        buffer.write_u32::<LittleEndian>(self.step)?;
        buffer.write_u32::<LittleEndian>(self.data.len() as u32)?;
        buffer.write_all(self.data)?;
        Ok(buffer)
    }
}

/// `sensor_msgs/Imu` payload builder.
///
/// Covariance matrices are row-major; all zeros means "covariance
/// unknown", and -1 in the first element marks the estimate as absent.
#[derive(Debug, Clone, Default)]
pub struct ImuMessage {
    /// Measurement time and sensor frame
    pub header: StampedHeader,
    /// Orientation quaternion as (x, y, z, w)
    pub orientation: [f64; 4],
    /// Row-major orientation covariance about x, y, z
    pub orientation_covariance: [f64; 9],
    /// Angular velocity in rad/sec
    pub angular_velocity: [f64; 3],
    /// Row-major angular velocity covariance
    pub angular_velocity_covariance: [f64; 9],
    /// Linear acceleration in m/s^2
    pub linear_acceleration: [f64; 3],
    /// Row-major linear acceleration covariance
    pub linear_acceleration_covariance: [f64; 9],
}

impl ImuMessage {
    /// Serialize to ROS1 message bytes.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(320);
        self.header.write_to(&mut buffer)?;
        write_f64_array(&mut buffer, &self.orientation)?;
        write_f64_array(&mut buffer, &self.orientation_covariance)?;
        write_f64_array(&mut buffer, &self.angular_velocity)?;
        write_f64_array(&mut buffer, &self.angular_velocity_covariance)?;
        write_f64_array(&mut buffer, &self.linear_acceleration)?;
        write_f64_array(&mut buffer, &self.linear_acceleration_covariance)?;
        Ok(buffer)
    }
}

fn write_string(buffer: &mut Vec<u8>, value: &str) -> Result<()> {
    buffer.write_u32::<LittleEndian>(value.len() as u32)?;
    buffer.write_all(value.as_bytes())?;
    Ok(())
}

fn write_f64_array(buffer: &mut Vec<u8>, values: &[f64]) -> Result<()> {
    for &value in values {
        buffer.write_f64::<LittleEndian>(value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_serialization() {
        let header = StampedHeader::new(7, 1_500_000_042, "base_link");
        let mut buffer = Vec::new();
        header.write_to(&mut buffer).unwrap();

        // seq + sec + nsec + string length + string bytes
        assert_eq!(buffer.len(), 4 + 4 + 4 + 4 + 9);
        assert_eq!(&buffer[0..4], &7u32.to_le_bytes());
        assert_eq!(&buffer[4..8], &1u32.to_le_bytes());
        assert_eq!(&buffer[8..12], &500_000_042u32.to_le_bytes());
        assert_eq!(&buffer[12..16], &9u32.to_le_bytes());
        assert_eq!(&buffer[16..], b"base_link");
    }

    #[test]
    fn test_image_payload_layout() {
        let data = vec![0xAAu8; 2 * 3 * 3]; // 3x2 rgb8
        let image = ImageMessage {
            header: StampedHeader::new(0, 0, "camera"),
            height: 2,
            width: 3,
            encoding: "rgb8",
            is_bigendian: 0,
            step: 9,
            data: &data,
        };
        let payload = image.to_payload().unwrap();

        let header_len = 4 + 4 + 4 + 4 + 6;
        // height + width + encoding + is_bigendian + step + data length + data
        let expected = header_len + 4 + 4 + (4 + 4) + 1 + 4 + 4 + data.len();
        assert_eq!(payload.len(), expected);
        assert!(payload
            .windows(4)
            .any(|w| w == b"rgb8"));
    }

    #[test]
    fn test_imu_payload_length_is_fixed() {
        let imu = ImuMessage {
            header: StampedHeader::new(1, 42, "imu_link"),
            orientation: [0.0, 0.0, 0.0, 1.0],
            ..Default::default()
        };
        let payload = imu.to_payload().unwrap();

        let header_len = 4 + 4 + 4 + 4 + 8;
        // quaternion + three vectors + three covariance matrices
        assert_eq!(payload.len(), header_len + 8 * (4 + 9 + 3 + 9 + 3 + 9));
    }

    #[test]
    fn test_imu_orientation_is_little_endian() {
        let imu = ImuMessage {
            orientation: [1.5, 0.0, 0.0, 0.0],
            ..Default::default()
        };
        let payload = imu.to_payload().unwrap();

        // header for the default (empty frame_id) is 16 bytes
        assert_eq!(&payload[16..24], &1.5f64.to_le_bytes());
    }
}
