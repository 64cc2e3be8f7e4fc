// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # bagrec
//!
//! Demonstration recorder producing small ROS1 bag files.
//!
//! ## Usage
//!
//! ```sh
//! # Record ten std_msgs/Int8 values
//! bagrec int8 counter.bag
//!
//! # Record synthetic IMU samples
//! bagrec imu motion.bag --count 200
//!
//! # Record solid-color camera frames
//! bagrec image frames.bag --width 320 --height 240
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use rosbag_writer::msg::{ImageMessage, ImuMessage, StampedHeader};
use rosbag_writer::BagWriter;

/// Spacing between demo samples (10 Hz).
const SAMPLE_INTERVAL_NS: u64 = 100_000_000;

/// Bagrec - demonstration ROS1 bag recorder
#[derive(Parser)]
#[command(name = "bagrec")]
#[command(about = "Write demonstration ROS1 bag files", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Record a ramp of std_msgs/Int8 values
    Int8 {
        /// Output bag path (must not exist)
        output: PathBuf,
        /// Number of messages to record
        #[arg(long, default_value_t = 10)]
        count: u32,
        /// Topic to record on
        #[arg(long, default_value = "/counter")]
        topic: String,
    },

    /// Record synthetic sensor_msgs/Imu samples
    Imu {
        /// Output bag path (must not exist)
        output: PathBuf,
        /// Number of samples to record
        #[arg(long, default_value_t = 100)]
        count: u32,
        /// Topic to record on
        #[arg(long, default_value = "/imu/data_raw")]
        topic: String,
    },

    /// Record solid-color sensor_msgs/Image frames
    Image {
        /// Output bag path (must not exist)
        output: PathBuf,
        /// Number of frames to record
        #[arg(long, default_value_t = 4)]
        count: u32,
        /// Frame width in pixels
        #[arg(long, default_value_t = 64)]
        width: u32,
        /// Frame height in pixels
        #[arg(long, default_value_t = 48)]
        height: u32,
        /// Topic to record on
        #[arg(long, default_value = "/camera/image_raw")]
        topic: String,
    },
}

fn now_ns() -> u64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0) as u64
}

fn record_int8(output: &PathBuf, count: u32, topic: &str) -> anyhow::Result<()> {
    let mut writer = BagWriter::create(output);
    writer.open().context("opening bag")?;
    let conn = writer
        .add_connection(topic, "std_msgs/Int8")
        .context("adding connection")?;

    let start = now_ns();
    for i in 0..count {
        let stamp = start + u64::from(i) * SAMPLE_INTERVAL_NS;
        writer
            .write(conn, stamp, &[(i % 128) as u8])
            .context("writing message")?;
    }
    writer.close().context("closing bag")?;

    println!("Wrote {count} Int8 messages on {topic} to {}", output.display());
    Ok(())
}

fn record_imu(output: &PathBuf, count: u32, topic: &str) -> anyhow::Result<()> {
    let mut writer = BagWriter::create(output);
    writer.open().context("opening bag")?;
    let conn = writer
        .add_connection(topic, "sensor_msgs/Imu")
        .context("adding connection")?;

    let start = now_ns();
    for i in 0..count {
        let stamp = start + u64::from(i) * SAMPLE_INTERVAL_NS;
        let phase = f64::from(i) * 0.1;
        let sample = ImuMessage {
            header: StampedHeader::new(i, stamp, "imu_link"),
            orientation: [0.0, 0.0, phase.sin() * 0.05, 1.0],
            angular_velocity: [0.0, 0.0, phase.cos() * 0.5],
            linear_acceleration: [phase.sin() * 0.2, 0.0, 9.81],
            ..Default::default()
        };
        writer
            .write(conn, stamp, &sample.to_payload()?)
            .context("writing sample")?;
    }
    writer.close().context("closing bag")?;

    println!("Wrote {count} Imu samples on {topic} to {}", output.display());
    Ok(())
}

fn record_image(
    output: &PathBuf,
    count: u32,
    width: u32,
    height: u32,
    topic: &str,
) -> anyhow::Result<()> {
    let mut writer = BagWriter::create(output);
    writer.open().context("opening bag")?;
    let conn = writer
        .add_connection(topic, "sensor_msgs/Image")
        .context("adding connection")?;

    let step = width * 3;
    let start = now_ns();
    for i in 0..count {
        let stamp = start + u64::from(i) * SAMPLE_INTERVAL_NS;
        // one gray level per frame so frames are distinguishable
        let shade = ((i * 37) % 256) as u8;
        let pixels = vec![shade; (step * height) as usize];
        let frame = ImageMessage {
            header: StampedHeader::new(i, stamp, "camera_optical"),
            height,
            width,
            encoding: "rgb8",
            is_bigendian: 0,
            step,
            data: &pixels,
        };
        writer
            .write(conn, stamp, &frame.to_payload()?)
            .context("writing frame")?;
    }
    writer.close().context("closing bag")?;

    println!(
        "Wrote {count} {width}x{height} frames on {topic} to {}",
        output.display()
    );
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Int8 {
            output,
            count,
            topic,
        } => record_int8(&output, count, &topic),
        Commands::Imu {
            output,
            count,
            topic,
        } => record_imu(&output, count, &topic),
        Commands::Image {
            output,
            count,
            width,
            height,
            topic,
        } => record_image(&output, count, width, height, &topic),
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
