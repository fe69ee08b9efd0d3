//! Display-side data pipeline for the synthesizer touchscreen.
//!
//! Background workers receive UI-state envelopes and scope sample frames
//! from the audio engine and hand the rendering loop typed events and
//! ready-to-draw point sequences. The wavetable scrubber animates
//! wavetable previews on the rendering loop's timer.

pub mod activity;
pub mod config;
pub mod dispatch;
pub mod pipeline;
pub mod scope;
pub mod timer;
pub mod transport;
pub mod wavetable;
pub mod worker;

pub use faceplate_types as types;
