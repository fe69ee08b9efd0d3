//! Wavetable preview: load a multi-wave file and sweep through it.

mod chart;
mod scrubber;

pub use chart::{ChartState, WavetableChart};
pub use scrubber::{
    ScrubPhase, ScrubTiming, WavetableError, WavetableScrubber, MAX_NUM_WAVES, WAVETABLE_DIR,
    WAVETABLE_EXT, WAVE_DOWNSAMPLING_RATE, WAVE_LENGTH, WAVE_POINTS,
};
