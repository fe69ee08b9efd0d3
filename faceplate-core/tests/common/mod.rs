#![allow(dead_code)]
//! Test harness utilities for faceplate-core integration tests.

use std::path::Path;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use faceplate_core::dispatch::{DisplayEvent, UiEventHandler};
use faceplate_core::pipeline::PipelineSettings;
use faceplate_core::transport::ChannelSpec;
use faceplate_core::wavetable::WAVE_LENGTH;
use faceplate_types::*;

/// In-process pipeline settings with a short poll timeout and no activity monitor.
pub fn local_settings() -> PipelineSettings {
    PipelineSettings {
        ui_channel: ChannelSpec::ui_state("/test_ui", 50),
        samples_channel: ChannelSpec::samples("/test_samples"),
        poll_timeout: Duration::from_millis(10),
        scope_idle_frames: 180,
        scope_display_height: 100,
        default_scope_mode: ScopeMode::Osc,
        activity: None,
    }
}

/// Write a float wavetable whose wave `w` holds the constant value `w`.
///
/// Only the first channel carries the waves; other channels hold -1.
pub fn write_wavetable(path: &Path, num_waves: usize, channels: u16) {
    write_wavetable_samples(path, num_waves * WAVE_LENGTH, channels);
}

/// Write a float wavetable with an arbitrary first-channel sample count.
pub fn write_wavetable_samples(path: &Path, samples: usize, channels: u16) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 48000,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..samples {
        writer.write_sample((i / WAVE_LENGTH) as f32).unwrap();
        for _ in 1..channels {
            writer.write_sample(-1.0f32).unwrap();
        }
    }
    writer.finalize().unwrap();
}

/// Write a 16-bit integer wavetable of `num_waves` full-scale positive waves.
pub fn write_int_wavetable(path: &Path, num_waves: usize) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 48000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..num_waves * WAVE_LENGTH {
        writer.write_sample(16384i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Wait for the next event, panicking after `timeout`.
pub fn next_event(events: &Receiver<DisplayEvent>, timeout: Duration) -> DisplayEvent {
    match events.recv_timeout(timeout) {
        Ok(event) => event,
        Err(e) => panic!("no display event within {:?}: {}", timeout, e),
    }
}

/// Poll `cond` until it holds, panicking after `timeout`.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("condition not met within {:?}", timeout);
}

/// One envelope of every kind, each with distinctive payload values.
pub fn one_of_each() -> Vec<Envelope> {
    let mut list_items = entries(["Init", "Bass", "Lead"]);
    list_items[2].enabled = false;
    let mut param_items = entries(["Off", "On"]);
    param_items[1].separator = true;

    vec![
        Envelope::LeftStatus(LeftStatus { status: "Layer 1".into() }),
        Envelope::LayerStatus(LayerStatus { status: "L2".into() }),
        Envelope::MidiStatus(MidiStatus { midi_active: true }),
        Envelope::TempoStatus(TempoStatus { tempo: "120.0".into() }),
        Envelope::HomeScreen(HomeScreen {
            patch_name: "Glass Pad".into(),
            patch_modified: true,
            scope_mode: ScopeMode::Xy,
        }),
        Envelope::ListItems(Box::new(ListItems {
            selected_item: 1,
            items: list_items,
            process_enabled_state: true,
        })),
        Envelope::ListSelectItem(ListSelectItem {
            selected_item: 2,
            wt_list: false,
        }),
        Envelope::SoftButtons(SoftButtons {
            button1: "EDIT".into(),
            button2: "SAVE".into(),
            button3: "BACK".into(),
        }),
        Envelope::SoftButtonsState(SoftButtonsState {
            state_button1: 0,
            state_button2: 1,
            state_button3: -1,
        }),
        Envelope::ParamUpdate(Box::new(ParamUpdate {
            name: "Cutoff".into(),
            value_string: "0.50".into(),
            display_string: "50%".into(),
            value_tag: "Hz".into(),
            selected_item: 1,
            items: param_items,
            show_scope: true,
        })),
        Envelope::ParamValueUpdate(ParamValueUpdate {
            value_string: "0.75".into(),
            display_string: "75%".into(),
            value_tag: "".into(),
            selected_item: -1,
        }),
        Envelope::EnumParamUpdate(Box::new(EnumParamUpdate {
            name: "Wave".into(),
            selected_item: 0,
            items: entries(["Saw", "Square", "Noise"]),
            wt_list: true,
        })),
        Envelope::EnumParamUpdateValue(ListSelectItem {
            selected_item: 1,
            wt_list: true,
        }),
        Envelope::EditName(EditName { name: "MY PATCH".into() }),
        Envelope::EditNameSelectChar(EditNameSelectChar { selected_char: 3 }),
        Envelope::EditNameChangeChar(EditNameChangeChar { change_char: 65 }),
        Envelope::ConfirmationScreen(ConfirmationScreen {
            line_1: "Overwrite patch?".into(),
            line_2: "Press SAVE".into(),
        }),
        Envelope::WarningScreen(WarningScreen {
            show: true,
            show_hourglass: true,
            line_1: "Calibrating".into(),
            line_2: "Please wait".into(),
        }),
        Envelope::ClearBootWarning,
        Envelope::SystemColour(SystemColour { colour: "FF8000".into() }),
    ]
}

/// Handler that rebuilds an envelope from every call it receives.
#[derive(Default)]
pub struct Recorder {
    pub seen: Vec<Envelope>,
}

impl UiEventHandler for Recorder {
    fn set_left_status(&mut self, msg: &LeftStatus) {
        self.seen.push(Envelope::LeftStatus(msg.clone()));
    }
    fn set_layer_status(&mut self, msg: &LayerStatus) {
        self.seen.push(Envelope::LayerStatus(msg.clone()));
    }
    fn set_midi_status(&mut self, msg: &MidiStatus) {
        self.seen.push(Envelope::MidiStatus(msg.clone()));
    }
    fn set_tempo_status(&mut self, msg: &TempoStatus) {
        self.seen.push(Envelope::TempoStatus(msg.clone()));
    }
    fn show_home_screen(&mut self, msg: &HomeScreen) {
        self.seen.push(Envelope::HomeScreen(msg.clone()));
    }
    fn show_list_items(&mut self, msg: &ListItems) {
        self.seen.push(Envelope::ListItems(Box::new(msg.clone())));
    }
    fn list_select_item(&mut self, msg: &ListSelectItem) {
        self.seen.push(Envelope::ListSelectItem(msg.clone()));
    }
    fn set_soft_buttons(&mut self, msg: &SoftButtons) {
        self.seen.push(Envelope::SoftButtons(msg.clone()));
    }
    fn soft_buttons_state(&mut self, msg: &SoftButtonsState) {
        self.seen.push(Envelope::SoftButtonsState(msg.clone()));
    }
    fn param_update(&mut self, msg: &ParamUpdate) {
        self.seen.push(Envelope::ParamUpdate(Box::new(msg.clone())));
    }
    fn param_value_update(&mut self, msg: &ParamValueUpdate) {
        self.seen.push(Envelope::ParamValueUpdate(msg.clone()));
    }
    fn enum_param_update(&mut self, msg: &EnumParamUpdate) {
        self.seen.push(Envelope::EnumParamUpdate(Box::new(msg.clone())));
    }
    fn enum_param_update_value(&mut self, msg: &ListSelectItem) {
        self.seen.push(Envelope::EnumParamUpdateValue(msg.clone()));
    }
    fn edit_name(&mut self, msg: &EditName) {
        self.seen.push(Envelope::EditName(msg.clone()));
    }
    fn edit_name_select_char(&mut self, msg: &EditNameSelectChar) {
        self.seen.push(Envelope::EditNameSelectChar(msg.clone()));
    }
    fn edit_name_change_char(&mut self, msg: &EditNameChangeChar) {
        self.seen.push(Envelope::EditNameChangeChar(msg.clone()));
    }
    fn show_confirmation_screen(&mut self, msg: &ConfirmationScreen) {
        self.seen.push(Envelope::ConfirmationScreen(msg.clone()));
    }
    fn show_warning_screen(&mut self, msg: &WarningScreen) {
        self.seen.push(Envelope::WarningScreen(msg.clone()));
    }
    fn clear_boot_warning_screen(&mut self) {
        self.seen.push(Envelope::ClearBootWarning);
    }
    fn set_system_colour(&mut self, msg: &SystemColour) {
        self.seen.push(Envelope::SystemColour(msg.clone()));
    }
}
