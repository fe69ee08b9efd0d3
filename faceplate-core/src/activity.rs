//! Activity monitor: counts size changes of an engine log file.

use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;

use crate::dispatch::DisplayEvent;
use crate::worker::{StopFlag, Worker};

pub const ACTIVITY_LOG_PATH: &str = "/udata/spi.log";
pub const ACTIVITY_POLL_MS: u64 = 100;

/// Turns successive file-size observations into a change count.
///
/// The first size seen is the baseline. A missing file is a size of its own,
/// so the file disappearing counts as one change and its return sets a new
/// baseline.
#[derive(Debug, Default)]
pub struct ActivityTracker {
    last: Option<Option<u64>>,
    count: u32,
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Record one observation. Returns the new count if it changed.
    pub fn observe(&mut self, size: Option<u64>) -> Option<u32> {
        match self.last {
            None | Some(None) => {
                if size.is_some() {
                    self.last = Some(size);
                }
                None
            }
            Some(prev) if prev != size => {
                self.count = self.count.wrapping_add(1);
                self.last = Some(size);
                Some(self.count)
            }
            Some(_) => None,
        }
    }
}

fn probe(path: &Path) -> io::Result<u64> {
    Ok(std::fs::metadata(path)?.len())
}

/// Spawn the monitor thread. Each change is sent as [`DisplayEvent::Activity`].
pub fn spawn_monitor(
    path: PathBuf,
    poll: Duration,
    events: Sender<DisplayEvent>,
    stop: StopFlag,
) -> io::Result<Worker> {
    Worker::spawn_fn("activity-monitor", move || {
        let mut tracker = ActivityTracker::new();
        while !stop.is_stopped() {
            let size = match probe(&path) {
                Ok(size) => Some(size),
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => {
                    log::trace!(target: "activity", "{}: {}", path.display(), e);
                    None
                }
            };
            if let Some(count) = tracker.observe(size) {
                if events.send(DisplayEvent::Activity(count)).is_err() {
                    break;
                }
            }
            thread::sleep(poll);
        }
        log::debug!(target: "activity", "monitor stopped");
    })
}
