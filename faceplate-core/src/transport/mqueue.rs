use std::io;
use std::time::Duration;

use nix::errno::Errno;
use nix::mqueue::{
    mq_close, mq_getattr, mq_open, mq_receive, mq_send, mq_timedreceive, mq_unlink, MqAttr,
    MqdT, MQ_OFlag,
};
use nix::sys::stat::Mode;
use nix::sys::time::TimeSpec;
use nix::time::{clock_gettime, ClockId};

use super::{full, oversized, ChannelSpec, Overflow, RecordReceiver, RecordSender};

/// One end of a named POSIX message queue.
///
/// The queue is created on first open with the channel's capacity and record
/// size, readable and writable by every user. The descriptor is closed on drop;
/// the queue itself persists until [`MessageQueue::unlink`].
pub struct MessageQueue {
    spec: ChannelSpec,
    mqd: Option<MqdT>,
    scratch: Vec<u8>,
}

impl MessageQueue {
    /// Open the consumer end. Receives block up to their timeout.
    pub fn open_consumer(spec: &ChannelSpec) -> io::Result<Self> {
        Self::open(spec, MQ_OFlag::O_RDONLY | MQ_OFlag::O_CREAT)
    }

    /// Open the producer end. Sends never block; read access is needed to
    /// discard the oldest record under [`Overflow::ReplaceOldest`].
    pub fn open_producer(spec: &ChannelSpec) -> io::Result<Self> {
        Self::open(
            spec,
            MQ_OFlag::O_RDWR | MQ_OFlag::O_CREAT | MQ_OFlag::O_NONBLOCK,
        )
    }

    fn open(spec: &ChannelSpec, flags: MQ_OFlag) -> io::Result<Self> {
        let attr = MqAttr::new(0, spec.capacity as _, spec.record_size as _, 0);
        let mode = Mode::from_bits_truncate(0o666);
        let mqd = mq_open(spec.name.as_str(), flags, mode, Some(&attr)).map_err(|e| {
            log::warn!(target: "transport", "failed to open queue {}: {}", spec.name, e);
            io::Error::from(e)
        })?;

        // An existing queue keeps the attributes it was created with.
        let msg_size = match mq_getattr(&mqd) {
            Ok(attr) => (attr.msgsize() as usize).max(spec.record_size),
            Err(_) => spec.record_size,
        };
        log::debug!(
            target: "transport",
            "opened queue {} (capacity {}, message size {})",
            spec.name, spec.capacity, msg_size
        );

        Ok(Self {
            spec: spec.clone(),
            mqd: Some(mqd),
            scratch: vec![0; msg_size],
        })
    }

    /// Remove a queue name from the system.
    pub fn unlink(name: &str) -> io::Result<()> {
        mq_unlink(name).map_err(io::Error::from)
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    fn descriptor(&self) -> io::Result<&MqdT> {
        self.mqd
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "queue closed"))
    }
}

fn deadline(timeout: Duration) -> io::Result<TimeSpec> {
    let now = clock_gettime(ClockId::CLOCK_REALTIME)?;
    Ok(now + TimeSpec::from(timeout))
}

impl RecordReceiver for MessageQueue {
    fn receive(&mut self, timeout: Duration) -> io::Result<Option<&[u8]>> {
        let abstime = deadline(timeout)?;
        let mut prio = 0u32;
        let mqd = match self.mqd.as_ref() {
            Some(mqd) => mqd,
            None => return Err(io::Error::new(io::ErrorKind::NotConnected, "queue closed")),
        };
        match mq_timedreceive(mqd, &mut self.scratch, &mut prio, &abstime) {
            Ok(len) => Ok(Some(&self.scratch[..len])),
            Err(Errno::ETIMEDOUT) | Err(Errno::EINTR) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl RecordSender for MessageQueue {
    fn send(&self, record: &[u8]) -> io::Result<()> {
        if record.len() > self.spec.record_size {
            return Err(oversized(record, self.spec.record_size));
        }
        let mqd = self.descriptor()?;
        let mut discard = vec![0u8; self.scratch.len()];
        loop {
            match mq_send(mqd, record, 0) {
                Ok(()) => return Ok(()),
                Err(Errno::EAGAIN) => match self.spec.overflow {
                    Overflow::Reject => return Err(full(&self.spec.name)),
                    Overflow::ReplaceOldest => {
                        let mut prio = 0u32;
                        match mq_receive(mqd, &mut discard, &mut prio) {
                            // Empty again: the consumer got there first.
                            Ok(_) | Err(Errno::EAGAIN) => {}
                            Err(e) => return Err(e.into()),
                        }
                    }
                },
                Err(Errno::EINTR) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl Drop for MessageQueue {
    fn drop(&mut self) {
        if let Some(mqd) = self.mqd.take() {
            if let Err(e) = mq_close(mqd) {
                log::warn!(target: "transport", "failed to close queue {}: {}", self.spec.name, e);
            }
        }
    }
}
