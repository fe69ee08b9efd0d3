use std::io;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};

use super::{full, oversized, ChannelSpec, Overflow, RecordReceiver, RecordSender};

/// In-process channel with the same bounded, fixed-record semantics as a
/// message queue.
pub struct LocalChannel;

impl LocalChannel {
    pub fn open(spec: &ChannelSpec) -> (LocalSender, LocalReceiver) {
        let (tx, rx) = crossbeam_channel::bounded(spec.capacity.max(1));
        let sender = LocalSender {
            spec: spec.clone(),
            tx,
            drain: rx.clone(),
        };
        let receiver = LocalReceiver {
            rx,
            scratch: Vec::with_capacity(spec.record_size),
        };
        (sender, receiver)
    }
}

#[derive(Clone)]
pub struct LocalSender {
    spec: ChannelSpec,
    tx: Sender<Vec<u8>>,
    drain: Receiver<Vec<u8>>,
}

impl RecordSender for LocalSender {
    fn send(&self, record: &[u8]) -> io::Result<()> {
        if record.len() > self.spec.record_size {
            return Err(oversized(record, self.spec.record_size));
        }
        let mut pending = record.to_vec();
        loop {
            match self.tx.try_send(pending) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Full(back)) => match self.spec.overflow {
                    Overflow::Reject => return Err(full(&self.spec.name)),
                    Overflow::ReplaceOldest => {
                        // The consumer may have taken the slot in the meantime.
                        match self.drain.try_recv() {
                            Ok(_) => {
                                log::trace!(target: "transport", "{}: replaced oldest record", self.spec.name)
                            }
                            Err(TryRecvError::Empty) => {}
                            Err(TryRecvError::Disconnected) => {
                                return Err(disconnected(&self.spec.name))
                            }
                        }
                        pending = back;
                    }
                },
                Err(TrySendError::Disconnected(_)) => return Err(disconnected(&self.spec.name)),
            }
        }
    }
}

pub struct LocalReceiver {
    rx: Receiver<Vec<u8>>,
    scratch: Vec<u8>,
}

impl RecordReceiver for LocalReceiver {
    fn receive(&mut self, timeout: Duration) -> io::Result<Option<&[u8]>> {
        match self.rx.recv_timeout(timeout) {
            Ok(record) => {
                self.scratch = record;
                Ok(Some(&self.scratch))
            }
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "all senders dropped",
            )),
        }
    }
}

fn disconnected(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::BrokenPipe,
        format!("channel {} has no receiver", name),
    )
}
