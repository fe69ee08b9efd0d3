use std::f32::consts::FRAC_PI_4;

use crossbeam_channel::Sender;
use faceplate_types::{SampleFrame, ScopeMode, SAMPLE_RECORD_SIZE, SCOPE_NUM_SAMPLES};

use super::mode::ScopeModeHandle;
use super::swap::{point_swap, PointReader, PointWriter};
use super::visibility::ScopeVisibility;
use crate::dispatch::{DisplayEvent, ScopeDirective};
use crate::worker::RecordHandler;

/// Idle frames before a background scope hides itself (3 s at 60 Hz).
pub const SCOPE_IDLE_FRAME_COUNT: u32 = 180;

/// XY mode plots left against right turned by this angle.
const XY_ROTATION: f32 = FRAC_PI_4;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScopePoint {
    pub x: f32,
    pub y: f32,
}

pub type ScopePoints = [ScopePoint; SCOPE_NUM_SAMPLES];

/// Turns sample frames into point sequences and runs the idle auto-hide.
///
/// Lives on the sample worker; the matching [`ScopeFeed`] lives on the
/// rendering loop.
pub struct ScopeDataSource {
    mode: ScopeModeHandle,
    visibility: ScopeVisibility,
    events: Sender<DisplayEvent>,
    writer: PointWriter<ScopePoints>,
    idle_threshold: f32,
    idle_frames: u32,
    idle_limit: u32,
}

/// Redraw-side view of the latest published point sequence.
pub struct ScopeFeed {
    reader: PointReader<ScopePoints>,
}

impl ScopeDataSource {
    pub fn new(
        mode: ScopeModeHandle,
        visibility: ScopeVisibility,
        events: Sender<DisplayEvent>,
        idle_limit: u32,
    ) -> (Self, ScopeFeed) {
        let (writer, reader) = point_swap([ScopePoint::default(); SCOPE_NUM_SAMPLES]);
        let source = Self {
            mode,
            visibility,
            events,
            writer,
            idle_threshold: 0.0,
            idle_frames: 0,
            idle_limit: idle_limit.max(1),
        };
        (source, ScopeFeed { reader })
    }

    /// Bind to a scope of the given pixel height. Samples within one pixel of
    /// the centre line count as idle.
    pub fn start(&mut self, display_height: u32) {
        self.idle_threshold = 1.0 / (display_height.max(2) / 2) as f32;
        self.idle_frames = 0;
        log::debug!(target: "scope", "idle threshold {}", self.idle_threshold);
    }

    pub fn idle_threshold(&self) -> f32 {
        self.idle_threshold
    }

    pub fn idle_frames(&self) -> u32 {
        self.idle_frames
    }

    pub fn ingest(&mut self, frame: &SampleFrame) {
        let xy = match self.mode.get() {
            ScopeMode::Off => return,
            ScopeMode::Osc => false,
            ScopeMode::Xy => true,
        };

        let threshold = self.idle_threshold;
        let mut idle = self.visibility.is_background();
        let mut woke = false;
        let (sin, cos) = XY_ROTATION.sin_cos();
        let n = SCOPE_NUM_SAMPLES as f32;

        let points = self.writer.back_mut();
        for (i, ((l, r), point)) in frame.pairs().zip(points.iter_mut()).enumerate() {
            if idle && (l.abs() > threshold || r.abs() > threshold) {
                idle = false;
                woke = true;
            }
            *point = if xy {
                ScopePoint {
                    x: l * cos - r * sin,
                    y: l * sin + r * cos,
                }
            } else {
                ScopePoint {
                    x: 2.0 * i as f32 / n - 1.0,
                    y: l + r,
                }
            };
        }
        self.writer.publish();

        if woke {
            self.idle_frames = 0;
            if self.visibility.show() {
                self.emit(ScopeDirective::Show);
            }
        }

        if idle && self.visibility.is_shown() && self.visibility.is_background() {
            self.idle_frames += 1;
            if self.idle_frames >= self.idle_limit {
                log::debug!(target: "scope", "idle for {} frames, hiding", self.idle_frames);
                self.visibility.hide(false);
                self.emit(ScopeDirective::Hide { reset_mode: false });
                self.idle_frames = 0;
            }
        }
    }

    fn emit(&self, directive: ScopeDirective) {
        if self.events.send(DisplayEvent::Scope(directive)).is_err() {
            log::warn!(target: "scope", "display loop gone, dropping {:?}", directive);
        }
    }
}

impl RecordHandler for ScopeDataSource {
    fn record_size(&self) -> usize {
        SAMPLE_RECORD_SIZE
    }

    fn handle(&mut self, record: &[u8]) {
        match SampleFrame::from_record(record) {
            Ok(frame) => self.ingest(&frame),
            Err(e) => log::debug!(target: "scope", "dropping frame: {}", e),
        }
    }
}

impl ScopeFeed {
    /// True if a frame was published since the last read.
    pub fn has_fresh(&self) -> bool {
        self.reader.has_fresh()
    }

    pub fn with<R>(&mut self, f: impl FnOnce(&ScopePoints) -> R) -> R {
        self.reader.with(f)
    }

    pub fn snapshot(&mut self) -> ScopePoints {
        self.reader.snapshot()
    }
}
