//! # faceplate-types
//!
//! Shared type definitions for the Faceplate display pipeline.
//! This crate holds the wire records exchanged with the audio engine:
//! the UI-state [`Envelope`] and the scope [`SampleFrame`], together with
//! the fixed capacities that define their record sizes.

mod envelope;
mod frame;
mod scope_mode;
mod text;
mod wire;

pub use envelope::{
    entries, ConfirmationScreen, EditName, EditNameChangeChar, EditNameSelectChar, Entries,
    EnumParamUpdate, Envelope, HomeScreen, LayerStatus, LeftStatus, ListEntry, ListItems, ListSelectItem,
    MidiStatus, MsgKind, ParamUpdate, ParamValueUpdate, SoftButtons, SoftButtonsState,
    SystemColour, TempoStatus, WarningScreen, ENVELOPE_RECORD_SIZE,
};
pub use frame::{SampleFrame, SAMPLE_RECORD_SIZE};
pub use scope_mode::ScopeMode;
pub use text::Text;
pub use wire::DecodeError;

/// Capacity in bytes of every display string carried in an envelope.
pub const STD_STR_LEN: usize = 40;

/// Number of characters the name editor works with.
pub const EDIT_NAME_STR_LEN: usize = 20;

/// Maximum number of entries in a list-bearing envelope.
pub const LIST_MAX_ITEMS: usize = 128;

/// Number of stereo sample pairs in one scope frame.
pub const SCOPE_NUM_SAMPLES: usize = 128;

/// Number of interleaved floats in one scope frame.
pub const SCOPE_FRAME_LEN: usize = SCOPE_NUM_SAMPLES * 2;
