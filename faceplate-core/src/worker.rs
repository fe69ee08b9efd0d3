//! Background poll loop shared by every channel consumer.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::transport::RecordReceiver;

/// Default wait per receive, which also bounds shutdown latency.
pub const POLL_TIMEOUT: Duration = Duration::from_secs(1);

/// Cooperative shutdown signal polled once per worker cycle.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Consumer of complete records from one channel.
pub trait RecordHandler: Send + 'static {
    /// Records of any other length are dropped before reaching [`handle`](Self::handle).
    fn record_size(&self) -> usize;

    fn handle(&mut self, record: &[u8]);
}

/// A named background thread that owns one channel consumer.
///
/// Dropping the worker joins the thread; callers set the [`StopFlag`] first.
pub struct Worker {
    name: String,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a worker. The channel is opened on the worker thread; an open
    /// failure is logged and ends the worker without retry.
    pub fn spawn<R, H, F>(
        name: &str,
        open: F,
        mut handler: H,
        stop: StopFlag,
        poll_timeout: Duration,
    ) -> io::Result<Self>
    where
        R: RecordReceiver,
        H: RecordHandler,
        F: FnOnce() -> io::Result<R> + Send + 'static,
    {
        let thread_name = name.to_string();
        Self::spawn_fn(name, move || {
            let receiver = match open() {
                Ok(receiver) => receiver,
                Err(e) => {
                    log::error!(target: "transport", "{}: could not open channel: {}", thread_name, e);
                    return;
                }
            };
            poll_loop(&thread_name, receiver, &mut handler, &stop, poll_timeout);
        })
    }

    /// Spawn a worker running an arbitrary body. The body is expected to
    /// watch a [`StopFlag`] itself.
    pub fn spawn_fn<F>(name: &str, body: F) -> io::Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::Builder::new().name(name.to_string()).spawn(body)?;
        Ok(Self {
            name: name.to_string(),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the thread has exited, for whatever reason.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    pub fn join(mut self) {
        self.join_inner();
    }

    fn join_inner(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!(target: "transport", "{}: worker panicked", self.name);
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.join_inner();
    }
}

fn poll_loop<R, H>(name: &str, mut receiver: R, handler: &mut H, stop: &StopFlag, timeout: Duration)
where
    R: RecordReceiver,
    H: RecordHandler,
{
    log::debug!(target: "transport", "{}: polling", name);
    while !stop.is_stopped() {
        match receiver.receive(timeout) {
            Ok(Some(record)) => {
                if record.len() == handler.record_size() {
                    handler.handle(record);
                } else {
                    log::debug!(
                        target: "transport",
                        "{}: ignoring {} byte record (expected {})",
                        name,
                        record.len(),
                        handler.record_size()
                    );
                }
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!(target: "transport", "{}: receive failed, closing channel: {}", name, e);
                break;
            }
        }
    }
    log::debug!(target: "transport", "{}: stopped", name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ChannelSpec, LocalChannel, Overflow, RecordSender};
    use crossbeam_channel::Sender;

    struct Collect {
        size: usize,
        out: Sender<Vec<u8>>,
    }

    impl RecordHandler for Collect {
        fn record_size(&self) -> usize {
            self.size
        }

        fn handle(&mut self, record: &[u8]) {
            let _ = self.out.send(record.to_vec());
        }
    }

    fn spec() -> ChannelSpec {
        ChannelSpec {
            name: "worker-test".into(),
            capacity: 8,
            record_size: 2,
            overflow: Overflow::Reject,
        }
    }

    #[test]
    fn wrong_length_records_are_skipped() {
        let (tx, rx) = LocalChannel::open(&spec());
        let (out, seen) = crossbeam_channel::unbounded();
        let stop = StopFlag::new();
        let worker = Worker::spawn(
            "collect",
            move || Ok(rx),
            Collect { size: 2, out },
            stop.clone(),
            Duration::from_millis(10),
        )
        .unwrap();

        tx.send(&[1]).unwrap();
        tx.send(&[2, 3]).unwrap();
        assert_eq!(seen.recv_timeout(Duration::from_secs(1)).unwrap(), vec![2, 3]);
        assert!(seen.try_recv().is_err());

        stop.stop();
        worker.join();
    }

    #[test]
    fn open_failure_ends_worker() {
        let (out, _seen) = crossbeam_channel::unbounded();
        let worker = Worker::spawn(
            "broken",
            || -> io::Result<crate::transport::LocalReceiver> {
                Err(io::Error::new(io::ErrorKind::NotFound, "no queue"))
            },
            Collect { size: 2, out },
            StopFlag::new(),
            Duration::from_millis(10),
        )
        .unwrap();
        worker.join();
    }

    #[test]
    fn disconnect_ends_worker_without_stop() {
        let (tx, rx) = LocalChannel::open(&spec());
        let (out, _seen) = crossbeam_channel::unbounded();
        let worker = Worker::spawn(
            "disconnect",
            move || Ok(rx),
            Collect { size: 2, out },
            StopFlag::new(),
            Duration::from_millis(10),
        )
        .unwrap();
        drop(tx);
        worker.join();
    }
}
