// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Predefined ROS1 message schemas.
//!
//! A handful of well-known message types ship with their full message
//! definition text and md5sum so that callers can add connections without
//! supplying a schema. Each type is reachable under both its ROS2-style
//! name (`sensor_msgs/msg/Image`) and its ROS1-style name
//! (`sensor_msgs/Image`).
//!
//! The definition texts are the `gendeps --cat` output for each type:
//! the type's own `.msg` source followed by every dependency, separated by
//! 80-column `=` rules. They must stay byte-for-byte stable because readers
//! verify the md5sum against them.

/// A predefined (message definition, md5sum) pair.
#[derive(Debug, Clone, Copy)]
pub struct PredefinedSchema {
    /// Full message definition text, dependencies concatenated
    pub msgdef: &'static str,
    /// MD5 sum over the definition, as 32 hex characters
    pub md5sum: &'static str,
}

/// Look up a predefined schema under either naming convention.
pub fn lookup(msgtype: &str) -> Option<&'static PredefinedSchema> {
    match msgtype {
        "std_msgs/msg/Int8" | "std_msgs/Int8" => Some(&INT8),
        "sensor_msgs/msg/CompressedImage" | "sensor_msgs/CompressedImage" => {
            Some(&COMPRESSED_IMAGE)
        }
        "sensor_msgs/msg/Image" | "sensor_msgs/Image" => Some(&IMAGE),
        "sensor_msgs/msg/Imu" | "sensor_msgs/Imu" => Some(&IMU),
        _ => None,
    }
}

static INT8: PredefinedSchema = PredefinedSchema {
    msgdef: "int8 data",
    md5sum: "27ffa0c9c4b8fb8492252bcad9e5c57b",
};

static COMPRESSED_IMAGE: PredefinedSchema = PredefinedSchema {
    msgdef: r#"# This message contains a compressed image

Header header        # Header timestamp should be acquisition time of image
                     # Header frame_id should be optical frame of camera
                     # origin of frame should be optical center of cameara
                     # +x should point to the right in the image
                     # +y should point down in the image
                     # +z should point into to plane of the image

string format        # Specifies the format of the data
#   Acceptable values:
#     jpeg, png
uint8[] data         # Compressed image buffer

================================================================================
MSG: std_msgs/Header
# Standard metadata for higher-level stamped data types.
# This is generally used to communicate timestamped data
# in a particular coordinate frame.
#
# sequence ID: consecutively increasing ID
uint32 seq
#Two-integer timestamp that is expressed as:
# * stamp.sec: seconds (stamp_secs) since epoch (in Python the variable is called 'secs')
# * stamp.nsec: nanoseconds since stamp_secs (in Python the variable is called 'nsecs')
# time-handling sugar is provided by the client library
time stamp
#Frame this data is associated with
string frame_id"#,
    md5sum: "8f7a12909da2c9d3332d540a0977563f",
};

static IMAGE: PredefinedSchema = PredefinedSchema {
    msgdef: r#"# This message contains an uncompressed image
# (0, 0) is at top-left corner of image
#

Header header        # Header timestamp should be acquisition time of image
                     # Header frame_id should be optical frame of camera
                     # origin of frame should be optical center of camera
                     # +x should point to the right in the image
                     # +y should point down in the image
                     # +z should point into to plane of the image
                     # If the frame_id here and the frame_id of the CameraInfo
                     # message associated with the image conflict
                     # the behavior is undefined

uint32 height         # image height, that is, number of rows
uint32 width          # image width, that is, number of columns

# The legal values for encoding are in file src/image_encodings.cpp
# If you want to standardize a new string format, join
# ros-users@lists.sourceforge.net and send an email proposing a new encoding.

string encoding       # Encoding of pixels -- channel meaning, ordering, size
                      # taken from the list of strings in include/sensor_msgs/image_encodings.h

uint8 is_bigendian    # is this data bigendian?
uint32 step           # Full row length in bytes
uint8[] data          # actual matrix data, size is (step * rows)

================================================================================
MSG: std_msgs/Header
# Standard metadata for higher-level stamped data types.
# This is generally used to communicate timestamped data
# in a particular coordinate frame.
#
# sequence ID: consecutively increasing ID
uint32 seq
#Two-integer timestamp that is expressed as:
# * stamp.sec: seconds (stamp_secs) since epoch (in Python the variable is called 'secs')
# * stamp.nsec: nanoseconds since stamp_secs (in Python the variable is called 'nsecs')
# time-handling sugar is provided by the client library
time stamp
#Frame this data is associated with
string frame_id"#,
    md5sum: "060021388200f6f0f447d0fcd9c64743",
};

static IMU: PredefinedSchema = PredefinedSchema {
    msgdef: r#"# This is a message to hold data from an IMU (Inertial Measurement Unit)
#
# Accelerations should be in m/s^2 (not in g's), and rotational velocity should be in rad/sec
#
# If the covariance of the measurement is known, it should be filled in (if all you know is the
# variance of each measurement, e.g. from the datasheet, just put those along the diagonal)
# A covariance matrix of all zeros will be interpreted as "covariance unknown", and to use the
# data a covariance will have to be assumed or gotten from some other source
#
# If you have no estimate for one of the data elements (e.g. your IMU doesn't produce an orientation
# estimate), please set element 0 of the associated covariance matrix to -1
# If you are interpreting this message, please check for a value of -1 in the first element of each
# covariance matrix, and disregard the associated estimate.

Header header

geometry_msgs/Quaternion orientation
float64[9] orientation_covariance # Row major about x, y, z axes

geometry_msgs/Vector3 angular_velocity
float64[9] angular_velocity_covariance # Row major about x, y, z axes

geometry_msgs/Vector3 linear_acceleration
float64[9] linear_acceleration_covariance # Row major x, y z

================================================================================
MSG: geometry_msgs/Quaternion
# This represents an orientation in free space in quaternion form.

float64 x
float64 y
float64 z
float64 w

================================================================================
MSG: geometry_msgs/Vector3
# This represents a vector in free space.
# It is only meant to represent a direction. Therefore, it does not
# make sense to apply a translation to it (e.g., when changing your
# reference frame should not be a translation added).
float64 x
float64 y
float64 z

================================================================================
MSG: std_msgs/Header
# Standard metadata for higher-level stamped data types.
# This is generally used to communicate timestamped data
# in a particular coordinate frame.
#
# sequence ID: consecutively increasing ID
uint32 seq
#Two-integer timestamp that is expressed as:
# * stamp.sec: seconds (stamp_secs) since epoch (in Python the variable is called 'secs')
# * stamp.nsec: nanoseconds since stamp_secs (in Python the variable is called 'nsecs')
# time-handling sugar is provided by the client library
time stamp
#Frame this data is associated with
string frame_id"#,
    md5sum: "6a62c6daae103f4ff57a132d6f95cec2",
};
