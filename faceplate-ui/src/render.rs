use std::sync::Arc;
use std::time::{Duration, Instant};

use faceplate_core::dispatch::{route, DisplayEvent};
use faceplate_core::pipeline::DisplayHandles;
use faceplate_core::scope::ScopePoints;
use faceplate_core::timer::Interval;
use faceplate_core::wavetable::{WavetableChart, WavetableScrubber};
use faceplate_types::Envelope;

use crate::model::DisplayModel;

/// Longest the loop sleeps when no timer is running.
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// The single-threaded rendering side: applies events to the model and
/// runs the scope redraw and wavetable animation timers.
pub struct RenderLoop {
    handles: DisplayHandles,
    model: DisplayModel,
    chart: WavetableChart,
    scope_timer: Interval,
    chart_timer: Interval,
    scope_points: Option<ScopePoints>,
    redraws: u64,
}

impl RenderLoop {
    pub fn new(
        handles: DisplayHandles,
        scrubber: Arc<WavetableScrubber>,
        scope_refresh: Duration,
    ) -> Self {
        let model = DisplayModel::new(handles.scope_mode.clone(), handles.visibility.clone());
        let chart_timer = Interval::new(scrubber.timing().tick);
        let mut scope_timer = Interval::new(scope_refresh);
        scope_timer.start(Instant::now());
        Self {
            handles,
            model,
            chart: WavetableChart::new(scrubber),
            scope_timer,
            chart_timer,
            scope_points: None,
            redraws: 0,
        }
    }

    pub fn model(&self) -> &DisplayModel {
        &self.model
    }

    /// Last scope trace drawn, if the scope is up.
    pub fn scope_trace(&self) -> Option<&ScopePoints> {
        self.scope_points.as_ref()
    }

    /// Run until `deadline` passes or every worker has gone away.
    pub fn run(&mut self, deadline: Option<Instant>) {
        loop {
            let now = Instant::now();
            if deadline.map_or(false, |d| now >= d) {
                break;
            }
            let wait = [
                self.scope_timer.time_until(now),
                self.chart_timer.time_until(now),
                deadline.map(|d| d.saturating_duration_since(now)),
            ]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(IDLE_WAIT);

            let received = crossbeam_channel::select! {
                recv(self.handles.events) -> event => Some(event),
                default(wait) => None,
            };
            match received {
                Some(Ok(event)) => self.apply(event),
                Some(Err(_)) => {
                    log::warn!(target: "dispatch", "all workers stopped");
                    break;
                }
                None => {}
            }

            let now = Instant::now();
            if self.scope_timer.poll(now) {
                self.redraw_scope();
            }
            if self.chart_timer.poll(now) && self.chart.tick() {
                log::trace!(target: "wavetable", "chart wave updated");
            }
        }
    }

    fn apply(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::Ui(envelope) => {
                log::debug!(target: "dispatch", "{:?}", envelope.kind());
                route(&envelope, &mut self.model);
                self.update_chart(&envelope);
            }
            DisplayEvent::Scope(directive) => {
                log::debug!(target: "scope", "{:?}", directive);
                if !self.model.scope_shown() {
                    self.scope_points = None;
                }
            }
            DisplayEvent::Activity(count) => {
                self.model.activity_count = count;
            }
        }
    }

    fn update_chart(&mut self, envelope: &Envelope) {
        match envelope {
            Envelope::EnumParamUpdate(msg) => self.chart.on_enum_list(msg),
            Envelope::EnumParamUpdateValue(msg) => self.chart.on_select(msg),
            // Leaving the enum list screen tears the chart down.
            Envelope::HomeScreen(_) | Envelope::ListItems(_) | Envelope::ParamUpdate(_) => {
                self.chart.clear()
            }
            _ => return,
        }
        if self.chart.is_animating() {
            if !self.chart_timer.is_running() {
                self.chart_timer.start(Instant::now());
            }
        } else {
            self.chart_timer.stop();
        }
    }

    fn redraw_scope(&mut self) {
        if !self.model.scope_shown() || !self.handles.scope.has_fresh() {
            return;
        }
        self.scope_points = Some(self.handles.scope.snapshot());
        self.redraws += 1;
        if self.redraws % 600 == 0 {
            log::debug!(target: "scope", "{} scope redraws", self.redraws);
        }
    }
}
