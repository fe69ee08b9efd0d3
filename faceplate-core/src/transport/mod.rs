//! Bounded record channels between the audio engine and the display.
//!
//! Two implementations share one interface: [`MessageQueue`] over named POSIX
//! message queues for the real multi-process setup, and [`LocalChannel`] for
//! tests and single-process setups.

mod local;
#[cfg(target_os = "linux")]
mod mqueue;

use std::io;
use std::time::Duration;

use faceplate_types::{ENVELOPE_RECORD_SIZE, SAMPLE_RECORD_SIZE};

pub use local::{LocalChannel, LocalReceiver, LocalSender};
#[cfg(target_os = "linux")]
pub use mqueue::MessageQueue;

/// Default system-wide name of the UI-state queue.
pub const UI_QUEUE_NAME: &str = "/nina_msg_queue";
/// Default system-wide name of the sample-frame queue.
pub const SAMPLES_QUEUE_NAME: &str = "/nina_samples_msg_queue";

pub const UI_QUEUE_CAPACITY: usize = 50;
pub const SAMPLES_QUEUE_CAPACITY: usize = 1;

/// How a producer behaves when the channel is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// The send fails with `WouldBlock`; queued records are kept.
    Reject,
    /// The oldest queued record is discarded to make room.
    ReplaceOldest,
}

/// Everything needed to open either end of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub name: String,
    pub capacity: usize,
    pub record_size: usize,
    pub overflow: Overflow,
}

impl ChannelSpec {
    /// UI-state channel: envelope records, producer sees back-pressure.
    pub fn ui_state(name: &str, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            capacity: capacity.max(1),
            record_size: ENVELOPE_RECORD_SIZE,
            overflow: Overflow::Reject,
        }
    }

    /// Sample-frame channel: a single slot where the newest frame wins.
    pub fn samples(name: &str) -> Self {
        Self {
            name: name.to_string(),
            capacity: SAMPLES_QUEUE_CAPACITY,
            record_size: SAMPLE_RECORD_SIZE,
            overflow: Overflow::ReplaceOldest,
        }
    }
}

/// Consumer end of a channel.
pub trait RecordReceiver: Send {
    /// Wait up to `timeout` for the next record.
    ///
    /// `Ok(None)` means the timeout elapsed. Any `Err` is terminal for the
    /// consumer.
    fn receive(&mut self, timeout: Duration) -> io::Result<Option<&[u8]>>;
}

/// Producer end of a channel.
pub trait RecordSender: Send {
    /// Queue one record without blocking, applying the channel's overflow policy.
    fn send(&self, record: &[u8]) -> io::Result<()>;
}

fn oversized(record: &[u8], record_size: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!(
            "record of {} bytes exceeds channel record size {}",
            record.len(),
            record_size
        ),
    )
}

fn full(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::WouldBlock,
        format!("channel {} is full", name),
    )
}
