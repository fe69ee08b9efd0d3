mod handler;

pub use handler::{route, UiEventHandler};

use crossbeam_channel::Sender;
use faceplate_types::{Envelope, ENVELOPE_RECORD_SIZE};

use crate::worker::RecordHandler;

/// Request from the scope data source to change scope visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeDirective {
    Show,
    /// Hide the scope. `reset_mode` also returns it to foreground mode.
    Hide { reset_mode: bool },
}

/// Everything the background workers hand to the rendering loop.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    Ui(Envelope),
    Scope(ScopeDirective),
    /// Running count of activity-log changes.
    Activity(u32),
}

/// Decodes UI-state records and republishes them as [`DisplayEvent::Ui`].
pub struct EnvelopeDispatcher {
    events: Sender<DisplayEvent>,
    dispatched: u64,
}

impl EnvelopeDispatcher {
    pub fn new(events: Sender<DisplayEvent>) -> Self {
        Self {
            events,
            dispatched: 0,
        }
    }
}

impl Drop for EnvelopeDispatcher {
    fn drop(&mut self) {
        log::debug!(target: "dispatch", "{} updates dispatched", self.dispatched);
    }
}

impl RecordHandler for EnvelopeDispatcher {
    fn record_size(&self) -> usize {
        ENVELOPE_RECORD_SIZE
    }

    fn handle(&mut self, record: &[u8]) {
        let envelope = match Envelope::decode(record) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::debug!(target: "dispatch", "dropping record: {}", e);
                return;
            }
        };
        log::trace!(target: "dispatch", "{:?}", envelope.kind());
        if self.events.send(DisplayEvent::Ui(envelope)).is_err() {
            log::warn!(target: "dispatch", "display loop gone, dropping update");
            return;
        }
        self.dispatched += 1;
    }
}
