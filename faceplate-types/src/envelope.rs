//! UI-state envelope: one tagged, fixed-size record per state change.

use crate::scope_mode::ScopeMode;
use crate::text::Text;
use crate::wire::{
    align4, DecodeError, WirePayload, WireReader, WireWriter, BOOL_ARRAY_SIZE, BOOL_SIZE,
    TEXT_ARRAY_SIZE, TEXT_SIZE, U32_SIZE,
};
use crate::LIST_MAX_ITEMS;

/// Wire tag of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MsgKind {
    SetLeftStatus = 0,
    SetLayerStatus,
    SetMidiStatus,
    SetTempoStatus,
    ShowHomeScreen,
    ShowListItems,
    ListSelectItem,
    SetSoftButtons,
    SoftButtonsState,
    ParamUpdate,
    ParamValueUpdate,
    EnumParamUpdate,
    EnumParamUpdateValue,
    EditName,
    EditNameSelectChar,
    EditNameChangeChar,
    ShowConfirmationScreen,
    ShowWarningScreen,
    ClearBootWarningScreen,
    SetSystemColour,
}

impl MsgKind {
    pub const ALL: [MsgKind; 20] = [
        MsgKind::SetLeftStatus,
        MsgKind::SetLayerStatus,
        MsgKind::SetMidiStatus,
        MsgKind::SetTempoStatus,
        MsgKind::ShowHomeScreen,
        MsgKind::ShowListItems,
        MsgKind::ListSelectItem,
        MsgKind::SetSoftButtons,
        MsgKind::SoftButtonsState,
        MsgKind::ParamUpdate,
        MsgKind::ParamValueUpdate,
        MsgKind::EnumParamUpdate,
        MsgKind::EnumParamUpdateValue,
        MsgKind::EditName,
        MsgKind::EditNameSelectChar,
        MsgKind::EditNameChangeChar,
        MsgKind::ShowConfirmationScreen,
        MsgKind::ShowWarningScreen,
        MsgKind::ClearBootWarningScreen,
        MsgKind::SetSystemColour,
    ];

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }

    pub fn to_raw(self) -> u32 {
        self as u32
    }
}

/// One row of a list-bearing payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub label: Text,
    pub enabled: bool,
    pub separator: bool,
}

impl ListEntry {
    pub fn new(label: &str) -> Self {
        Self {
            label: Text::new(label),
            enabled: true,
            separator: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_separator(mut self) -> Self {
        self.separator = true;
        self
    }
}

/// Populated prefix of a list array.
pub type Entries = heapless::Vec<ListEntry, LIST_MAX_ITEMS>;

/// Collect labels into entries, keeping at most [`LIST_MAX_ITEMS`].
pub fn entries<'a>(labels: impl IntoIterator<Item = &'a str>) -> Entries {
    labels
        .into_iter()
        .take(LIST_MAX_ITEMS)
        .map(ListEntry::new)
        .collect()
}

fn selected_entry(items: &Entries, selected_item: u32) -> Option<&ListEntry> {
    items.get(selected_item as usize)
}

fn read_entries(
    r: &mut WireReader<'_>,
    count: usize,
) -> Entries {
    r.text_array(count)
        .into_iter()
        .map(|label| ListEntry {
            label,
            enabled: true,
            separator: false,
        })
        .collect()
}

fn read_count(r: &mut WireReader<'_>) -> usize {
    (r.u32() as usize).min(LIST_MAX_ITEMS)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeftStatus {
    pub status: Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerStatus {
    pub status: Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MidiStatus {
    pub midi_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TempoStatus {
    pub tempo: Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeScreen {
    pub patch_name: Text,
    pub patch_modified: bool,
    pub scope_mode: ScopeMode,
}

/// Main-area list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItems {
    pub selected_item: u32,
    pub items: Entries,
    pub process_enabled_state: bool,
}

impl ListItems {
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// The selected row, if it lies inside the populated prefix.
    pub fn selected(&self) -> Option<&ListEntry> {
        selected_entry(&self.items, self.selected_item)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSelectItem {
    pub selected_item: u32,
    /// The list is the wavetable picker.
    pub wt_list: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftButtons {
    pub button1: Text,
    pub button2: Text,
    pub button3: Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftButtonsState {
    pub state_button1: i32,
    pub state_button2: i32,
    pub state_button3: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamUpdate {
    pub name: Text,
    pub value_string: Text,
    pub display_string: Text,
    pub value_tag: Text,
    pub selected_item: u32,
    pub items: Entries,
    pub show_scope: bool,
}

impl ParamUpdate {
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn selected(&self) -> Option<&ListEntry> {
        selected_entry(&self.items, self.selected_item)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamValueUpdate {
    pub value_string: Text,
    pub display_string: Text,
    pub value_tag: Text,
    pub selected_item: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumParamUpdate {
    pub name: Text,
    pub selected_item: u32,
    pub items: Entries,
    /// The list is the wavetable picker.
    pub wt_list: bool,
}

impl EnumParamUpdate {
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn selected(&self) -> Option<&ListEntry> {
        selected_entry(&self.items, self.selected_item)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditName {
    pub name: Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditNameSelectChar {
    pub selected_char: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditNameChangeChar {
    pub change_char: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationScreen {
    pub line_1: Text,
    pub line_2: Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningScreen {
    pub show: bool,
    pub show_hourglass: bool,
    pub line_1: Text,
    pub line_2: Text,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemColour {
    pub colour: Text,
}

// ---------------------------------------------------------------------------
// Layouts
// ---------------------------------------------------------------------------

impl WirePayload for LeftStatus {
    const WIRE_SIZE: usize = TEXT_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.status);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self { status: r.text() }
    }
}

impl WirePayload for LayerStatus {
    const WIRE_SIZE: usize = TEXT_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.status);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self { status: r.text() }
    }
}

impl WirePayload for MidiStatus {
    const WIRE_SIZE: usize = BOOL_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.bool(self.midi_active);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            midi_active: r.bool(),
        }
    }
}

impl WirePayload for TempoStatus {
    const WIRE_SIZE: usize = TEXT_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.tempo);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self { tempo: r.text() }
    }
}

impl WirePayload for HomeScreen {
    const WIRE_SIZE: usize = align4(TEXT_SIZE + BOOL_SIZE) + U32_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.patch_name);
        w.bool(self.patch_modified);
        w.i32(self.scope_mode.to_raw());
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            patch_name: r.text(),
            patch_modified: r.bool(),
            scope_mode: ScopeMode::from_raw(r.i32()),
        }
    }
}

impl WirePayload for ListItems {
    const WIRE_SIZE: usize =
        align4(2 * U32_SIZE + TEXT_ARRAY_SIZE + BOOL_SIZE + BOOL_ARRAY_SIZE);

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.u32(self.items.len() as u32);
        w.u32(self.selected_item);
        w.text_array(self.items.iter().map(|e| &e.label));
        w.bool(self.process_enabled_state);
        w.bool_array(self.items.iter().map(|e| e.enabled));
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        let count = read_count(r);
        let selected_item = r.u32();
        let mut items = read_entries(r, count);
        let process_enabled_state = r.bool();
        for (entry, enabled) in items.iter_mut().zip(r.bool_array(count)) {
            entry.enabled = enabled;
        }
        Self {
            selected_item,
            items,
            process_enabled_state,
        }
    }
}

impl WirePayload for ListSelectItem {
    const WIRE_SIZE: usize = align4(U32_SIZE + BOOL_SIZE);

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.u32(self.selected_item);
        w.bool(self.wt_list);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            selected_item: r.u32(),
            wt_list: r.bool(),
        }
    }
}

impl WirePayload for SoftButtons {
    const WIRE_SIZE: usize = 3 * TEXT_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.button1);
        w.text(&self.button2);
        w.text(&self.button3);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            button1: r.text(),
            button2: r.text(),
            button3: r.text(),
        }
    }
}

impl WirePayload for SoftButtonsState {
    const WIRE_SIZE: usize = 3 * U32_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.i32(self.state_button1);
        w.i32(self.state_button2);
        w.i32(self.state_button3);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            state_button1: r.i32(),
            state_button2: r.i32(),
            state_button3: r.i32(),
        }
    }
}

impl WirePayload for ParamUpdate {
    const WIRE_SIZE: usize =
        align4(4 * TEXT_SIZE + 2 * U32_SIZE + TEXT_ARRAY_SIZE + 2 * BOOL_ARRAY_SIZE + BOOL_SIZE);

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.name);
        w.text(&self.value_string);
        w.text(&self.display_string);
        w.text(&self.value_tag);
        w.u32(self.items.len() as u32);
        w.u32(self.selected_item);
        w.text_array(self.items.iter().map(|e| &e.label));
        w.bool_array(self.items.iter().map(|e| e.enabled));
        w.bool_array(self.items.iter().map(|e| e.separator));
        w.bool(self.show_scope);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        let name = r.text();
        let value_string = r.text();
        let display_string = r.text();
        let value_tag = r.text();
        let count = read_count(r);
        let selected_item = r.u32();
        let mut items = read_entries(r, count);
        for (entry, enabled) in items.iter_mut().zip(r.bool_array(count)) {
            entry.enabled = enabled;
        }
        for (entry, separator) in items.iter_mut().zip(r.bool_array(count)) {
            entry.separator = separator;
        }
        Self {
            name,
            value_string,
            display_string,
            value_tag,
            selected_item,
            items,
            show_scope: r.bool(),
        }
    }
}

impl WirePayload for ParamValueUpdate {
    const WIRE_SIZE: usize = 3 * TEXT_SIZE + U32_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.value_string);
        w.text(&self.display_string);
        w.text(&self.value_tag);
        w.i32(self.selected_item);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            value_string: r.text(),
            display_string: r.text(),
            value_tag: r.text(),
            selected_item: r.i32(),
        }
    }
}

impl WirePayload for EnumParamUpdate {
    const WIRE_SIZE: usize = align4(TEXT_SIZE + 2 * U32_SIZE + TEXT_ARRAY_SIZE + BOOL_SIZE);

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.name);
        w.u32(self.items.len() as u32);
        w.u32(self.selected_item);
        w.text_array(self.items.iter().map(|e| &e.label));
        w.bool(self.wt_list);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        let name = r.text();
        let count = read_count(r);
        let selected_item = r.u32();
        let items = read_entries(r, count);
        Self {
            name,
            selected_item,
            items,
            wt_list: r.bool(),
        }
    }
}

impl WirePayload for EditName {
    const WIRE_SIZE: usize = TEXT_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.name);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self { name: r.text() }
    }
}

impl WirePayload for EditNameSelectChar {
    const WIRE_SIZE: usize = U32_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.u32(self.selected_char);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            selected_char: r.u32(),
        }
    }
}

impl WirePayload for EditNameChangeChar {
    const WIRE_SIZE: usize = U32_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.u32(self.change_char);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            change_char: r.u32(),
        }
    }
}

impl WirePayload for ConfirmationScreen {
    const WIRE_SIZE: usize = 2 * TEXT_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.line_1);
        w.text(&self.line_2);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            line_1: r.text(),
            line_2: r.text(),
        }
    }
}

impl WirePayload for WarningScreen {
    const WIRE_SIZE: usize = 2 * BOOL_SIZE + 2 * TEXT_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.bool(self.show);
        w.bool(self.show_hourglass);
        w.text(&self.line_1);
        w.text(&self.line_2);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self {
            show: r.bool(),
            show_hourglass: r.bool(),
            line_1: r.text(),
            line_2: r.text(),
        }
    }
}

impl WirePayload for SystemColour {
    const WIRE_SIZE: usize = TEXT_SIZE;

    fn write_to(&self, w: &mut WireWriter<'_>) {
        w.text(&self.colour);
    }

    fn read_from(r: &mut WireReader<'_>) -> Self {
        Self { colour: r.text() }
    }
}

const fn largest(sizes: &[usize]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < sizes.len() {
        if sizes[i] > max {
            max = sizes[i];
        }
        i += 1;
    }
    max
}

/// Size of every UI-state record: the tag plus the largest payload, padded
/// to the tag's alignment.
pub const ENVELOPE_RECORD_SIZE: usize = U32_SIZE
    + align4(largest(&[
        LeftStatus::WIRE_SIZE,
        LayerStatus::WIRE_SIZE,
        MidiStatus::WIRE_SIZE,
        TempoStatus::WIRE_SIZE,
        HomeScreen::WIRE_SIZE,
        ListItems::WIRE_SIZE,
        ListSelectItem::WIRE_SIZE,
        SoftButtons::WIRE_SIZE,
        SoftButtonsState::WIRE_SIZE,
        ParamUpdate::WIRE_SIZE,
        ParamValueUpdate::WIRE_SIZE,
        EnumParamUpdate::WIRE_SIZE,
        EditName::WIRE_SIZE,
        EditNameSelectChar::WIRE_SIZE,
        EditNameChangeChar::WIRE_SIZE,
        ConfirmationScreen::WIRE_SIZE,
        WarningScreen::WIRE_SIZE,
        SystemColour::WIRE_SIZE,
    ]));

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// A UI-state update from the engine. Exactly one kind per record.
///
/// The list-bearing payloads are boxed so that the enum itself stays small
/// when it travels through in-process channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    LeftStatus(LeftStatus),
    LayerStatus(LayerStatus),
    MidiStatus(MidiStatus),
    TempoStatus(TempoStatus),
    HomeScreen(HomeScreen),
    ListItems(Box<ListItems>),
    ListSelectItem(ListSelectItem),
    SoftButtons(SoftButtons),
    SoftButtonsState(SoftButtonsState),
    ParamUpdate(Box<ParamUpdate>),
    ParamValueUpdate(ParamValueUpdate),
    EnumParamUpdate(Box<EnumParamUpdate>),
    EnumParamUpdateValue(ListSelectItem),
    EditName(EditName),
    EditNameSelectChar(EditNameSelectChar),
    EditNameChangeChar(EditNameChangeChar),
    ConfirmationScreen(ConfirmationScreen),
    WarningScreen(WarningScreen),
    ClearBootWarning,
    SystemColour(SystemColour),
}

impl Envelope {
    pub fn kind(&self) -> MsgKind {
        match self {
            Envelope::LeftStatus(_) => MsgKind::SetLeftStatus,
            Envelope::LayerStatus(_) => MsgKind::SetLayerStatus,
            Envelope::MidiStatus(_) => MsgKind::SetMidiStatus,
            Envelope::TempoStatus(_) => MsgKind::SetTempoStatus,
            Envelope::HomeScreen(_) => MsgKind::ShowHomeScreen,
            Envelope::ListItems(_) => MsgKind::ShowListItems,
            Envelope::ListSelectItem(_) => MsgKind::ListSelectItem,
            Envelope::SoftButtons(_) => MsgKind::SetSoftButtons,
            Envelope::SoftButtonsState(_) => MsgKind::SoftButtonsState,
            Envelope::ParamUpdate(_) => MsgKind::ParamUpdate,
            Envelope::ParamValueUpdate(_) => MsgKind::ParamValueUpdate,
            Envelope::EnumParamUpdate(_) => MsgKind::EnumParamUpdate,
            Envelope::EnumParamUpdateValue(_) => MsgKind::EnumParamUpdateValue,
            Envelope::EditName(_) => MsgKind::EditName,
            Envelope::EditNameSelectChar(_) => MsgKind::EditNameSelectChar,
            Envelope::EditNameChangeChar(_) => MsgKind::EditNameChangeChar,
            Envelope::ConfirmationScreen(_) => MsgKind::ShowConfirmationScreen,
            Envelope::WarningScreen(_) => MsgKind::ShowWarningScreen,
            Envelope::ClearBootWarning => MsgKind::ClearBootWarningScreen,
            Envelope::SystemColour(_) => MsgKind::SetSystemColour,
        }
    }

    /// Encode into a full [`ENVELOPE_RECORD_SIZE`] record.
    pub fn encode(&self) -> Vec<u8> {
        let mut record = vec![0u8; ENVELOPE_RECORD_SIZE];
        let mut w = WireWriter::new(&mut record);
        w.u32(self.kind().to_raw());
        match self {
            Envelope::LeftStatus(p) => p.write_to(&mut w),
            Envelope::LayerStatus(p) => p.write_to(&mut w),
            Envelope::MidiStatus(p) => p.write_to(&mut w),
            Envelope::TempoStatus(p) => p.write_to(&mut w),
            Envelope::HomeScreen(p) => p.write_to(&mut w),
            Envelope::ListItems(p) => p.write_to(&mut w),
            Envelope::ListSelectItem(p) => p.write_to(&mut w),
            Envelope::SoftButtons(p) => p.write_to(&mut w),
            Envelope::SoftButtonsState(p) => p.write_to(&mut w),
            Envelope::ParamUpdate(p) => p.write_to(&mut w),
            Envelope::ParamValueUpdate(p) => p.write_to(&mut w),
            Envelope::EnumParamUpdate(p) => p.write_to(&mut w),
            Envelope::EnumParamUpdateValue(p) => p.write_to(&mut w),
            Envelope::EditName(p) => p.write_to(&mut w),
            Envelope::EditNameSelectChar(p) => p.write_to(&mut w),
            Envelope::EditNameChangeChar(p) => p.write_to(&mut w),
            Envelope::ConfirmationScreen(p) => p.write_to(&mut w),
            Envelope::WarningScreen(p) => p.write_to(&mut w),
            Envelope::ClearBootWarning => {}
            Envelope::SystemColour(p) => p.write_to(&mut w),
        }
        record
    }

    /// Decode a received record.
    ///
    /// The record must be exactly [`ENVELOPE_RECORD_SIZE`] bytes.
    pub fn decode(record: &[u8]) -> Result<Self, DecodeError> {
        if record.len() != ENVELOPE_RECORD_SIZE {
            return Err(DecodeError::WrongLength {
                expected: ENVELOPE_RECORD_SIZE,
                actual: record.len(),
            });
        }

        let mut r = WireReader::new(record);
        let tag = r.u32();
        let kind = MsgKind::from_raw(tag).ok_or(DecodeError::UnknownKind(tag))?;

        let envelope = match kind {
            MsgKind::SetLeftStatus => Envelope::LeftStatus(LeftStatus::read_from(&mut r)),
            MsgKind::SetLayerStatus => Envelope::LayerStatus(LayerStatus::read_from(&mut r)),
            MsgKind::SetMidiStatus => Envelope::MidiStatus(MidiStatus::read_from(&mut r)),
            MsgKind::SetTempoStatus => Envelope::TempoStatus(TempoStatus::read_from(&mut r)),
            MsgKind::ShowHomeScreen => Envelope::HomeScreen(HomeScreen::read_from(&mut r)),
            MsgKind::ShowListItems => {
                Envelope::ListItems(Box::new(ListItems::read_from(&mut r)))
            }
            MsgKind::ListSelectItem => {
                Envelope::ListSelectItem(ListSelectItem::read_from(&mut r))
            }
            MsgKind::SetSoftButtons => Envelope::SoftButtons(SoftButtons::read_from(&mut r)),
            MsgKind::SoftButtonsState => {
                Envelope::SoftButtonsState(SoftButtonsState::read_from(&mut r))
            }
            MsgKind::ParamUpdate => {
                Envelope::ParamUpdate(Box::new(ParamUpdate::read_from(&mut r)))
            }
            MsgKind::ParamValueUpdate => {
                Envelope::ParamValueUpdate(ParamValueUpdate::read_from(&mut r))
            }
            MsgKind::EnumParamUpdate => {
                Envelope::EnumParamUpdate(Box::new(EnumParamUpdate::read_from(&mut r)))
            }
            MsgKind::EnumParamUpdateValue => {
                Envelope::EnumParamUpdateValue(ListSelectItem::read_from(&mut r))
            }
            MsgKind::EditName => Envelope::EditName(EditName::read_from(&mut r)),
            MsgKind::EditNameSelectChar => {
                Envelope::EditNameSelectChar(EditNameSelectChar::read_from(&mut r))
            }
            MsgKind::EditNameChangeChar => {
                Envelope::EditNameChangeChar(EditNameChangeChar::read_from(&mut r))
            }
            MsgKind::ShowConfirmationScreen => {
                Envelope::ConfirmationScreen(ConfirmationScreen::read_from(&mut r))
            }
            MsgKind::ShowWarningScreen => {
                Envelope::WarningScreen(WarningScreen::read_from(&mut r))
            }
            MsgKind::ClearBootWarningScreen => Envelope::ClearBootWarning,
            MsgKind::SetSystemColour => Envelope::SystemColour(SystemColour::read_from(&mut r)),
        };
        Ok(envelope)
    }
}
