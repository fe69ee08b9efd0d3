use std::sync::Arc;

use faceplate_types::{EnumParamUpdate, ListSelectItem};

use super::scrubber::{WavetableScrubber, WAVE_POINTS};

/// What the wavetable chart should display after a list update.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartState {
    /// No wavetable list is showing; the chart is hidden and cleared.
    Hidden,
    /// A wavetable is animating; keep the tick timer running.
    Animating,
    /// The selected wavetable failed to load; draw a flat line at zero.
    Flat,
}

/// Drives a [`WavetableScrubber`] from wavetable-list updates.
pub struct WavetableChart {
    scrubber: Arc<WavetableScrubber>,
    names: Vec<String>,
    state: ChartState,
    points: Vec<f32>,
}

impl WavetableChart {
    pub fn new(scrubber: Arc<WavetableScrubber>) -> Self {
        Self {
            scrubber,
            names: Vec::new(),
            state: ChartState::Hidden,
            points: Vec::new(),
        }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    /// Currently drawn wave.
    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn is_animating(&self) -> bool {
        self.state == ChartState::Animating
    }

    /// A new enum list arrived. Only lists flagged as wavetable lists
    /// drive the chart; any other list hides it.
    pub fn on_enum_list(&mut self, msg: &EnumParamUpdate) {
        if !msg.wt_list {
            self.clear();
            return;
        }
        self.names = msg.items.iter().map(|e| e.label.to_string()).collect();
        // Out-of-range selections fall back to the first entry.
        let index = if (msg.selected_item as usize) < self.names.len() {
            msg.selected_item as usize
        } else {
            0
        };
        self.select(index);
    }

    /// The selection moved within the current list.
    pub fn on_select(&mut self, msg: &ListSelectItem) {
        if !msg.wt_list {
            return;
        }
        let index = msg.selected_item as usize;
        if index < self.names.len() {
            self.select(index);
        }
    }

    /// Advance the animation. Returns true if the drawn wave changed.
    pub fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        let next = self.scrubber.next_wave_samples();
        if next.is_empty() {
            return false;
        }
        self.points = next;
        true
    }

    fn select(&mut self, index: usize) {
        let loaded = self
            .names
            .get(index)
            .map_or(false, |name| self.scrubber.load(name));
        if loaded {
            self.state = ChartState::Animating;
        } else {
            self.state = ChartState::Flat;
            self.points = vec![0.0; WAVE_POINTS];
        }
    }

    /// Unload the wavetable and hide the chart.
    pub fn clear(&mut self) {
        self.scrubber.unload();
        self.names.clear();
        self.points.clear();
        self.state = ChartState::Hidden;
    }
}
