//! Wires the channel workers, the scope data source and the activity
//! monitor into one running unit.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::Receiver;
use faceplate_types::ScopeMode;

use crate::activity;
use crate::config::Config;
use crate::dispatch::{DisplayEvent, EnvelopeDispatcher};
use crate::scope::{ScopeDataSource, ScopeFeed, ScopeModeHandle, ScopeVisibility};
use crate::transport::{ChannelSpec, LocalChannel, LocalSender, RecordReceiver};
use crate::worker::{StopFlag, Worker};

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub ui_channel: ChannelSpec,
    pub samples_channel: ChannelSpec,
    pub poll_timeout: Duration,
    pub scope_idle_frames: u32,
    pub scope_display_height: u32,
    pub default_scope_mode: ScopeMode,
    /// Log file and poll period of the activity monitor, if enabled.
    pub activity: Option<(PathBuf, Duration)>,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ui_channel: config.ui_channel(),
            samples_channel: config.samples_channel(),
            poll_timeout: config.poll_timeout(),
            scope_idle_frames: config.scope_idle_frames(),
            scope_display_height: config.scope_display_height(),
            default_scope_mode: config.default_scope_mode(),
            activity: config
                .activity_enabled()
                .then(|| (config.activity_log_path(), config.activity_poll())),
        }
    }
}

/// What the rendering loop holds on to.
pub struct DisplayHandles {
    pub events: Receiver<DisplayEvent>,
    pub scope: ScopeFeed,
    pub scope_mode: ScopeModeHandle,
    pub visibility: ScopeVisibility,
}

/// Running background side of the display. Dropping it stops and joins
/// every worker, which takes at most one poll timeout.
pub struct DisplayPipeline {
    stop: StopFlag,
    workers: Vec<Worker>,
}

impl DisplayPipeline {
    /// Start with custom channel openers. Each opener runs on its worker
    /// thread.
    pub fn start<U, S, OU, OS>(
        settings: &PipelineSettings,
        open_ui: OU,
        open_samples: OS,
    ) -> io::Result<(Self, DisplayHandles)>
    where
        U: RecordReceiver,
        S: RecordReceiver,
        OU: FnOnce() -> io::Result<U> + Send + 'static,
        OS: FnOnce() -> io::Result<S> + Send + 'static,
    {
        let stop = StopFlag::new();
        let (events_tx, events) = crossbeam_channel::unbounded();
        let scope_mode = ScopeModeHandle::new(settings.default_scope_mode);
        let visibility = ScopeVisibility::new();

        let (mut source, scope) = ScopeDataSource::new(
            scope_mode.clone(),
            visibility.clone(),
            events_tx.clone(),
            settings.scope_idle_frames,
        );
        source.start(settings.scope_display_height);

        let mut pipeline = Self {
            stop: stop.clone(),
            workers: Vec::new(),
        };

        pipeline.workers.push(Worker::spawn(
            "ui-msg",
            open_ui,
            EnvelopeDispatcher::new(events_tx.clone()),
            stop.clone(),
            settings.poll_timeout,
        )?);
        pipeline.workers.push(Worker::spawn(
            "scope-msg",
            open_samples,
            source,
            stop.clone(),
            settings.poll_timeout,
        )?);
        if let Some((path, poll)) = &settings.activity {
            pipeline.workers.push(activity::spawn_monitor(
                path.clone(),
                *poll,
                events_tx,
                stop,
            )?);
        }

        log::info!(
            target: "dispatch",
            "display pipeline started ({} workers)",
            pipeline.workers.len()
        );

        Ok((
            pipeline,
            DisplayHandles {
                events,
                scope,
                scope_mode,
                visibility,
            },
        ))
    }

    /// Start on the system message queues named in the settings.
    #[cfg(target_os = "linux")]
    pub fn start_mqueue(settings: &PipelineSettings) -> io::Result<(Self, DisplayHandles)> {
        use crate::transport::MessageQueue;

        let ui = settings.ui_channel.clone();
        let samples = settings.samples_channel.clone();
        Self::start(
            settings,
            move || MessageQueue::open_consumer(&ui),
            move || MessageQueue::open_consumer(&samples),
        )
    }

    /// Start on in-process channels, returning the producer ends.
    pub fn start_local(
        settings: &PipelineSettings,
    ) -> io::Result<(Self, DisplayHandles, LocalSender, LocalSender)> {
        let (ui_tx, ui_rx) = LocalChannel::open(&settings.ui_channel);
        let (samples_tx, samples_rx) = LocalChannel::open(&settings.samples_channel);
        let (pipeline, handles) =
            Self::start(settings, move || Ok(ui_rx), move || Ok(samples_rx))?;
        Ok((pipeline, handles, ui_tx, samples_tx))
    }

    pub fn stop_flag(&self) -> &StopFlag {
        &self.stop
    }

    /// Names of workers whose thread has already exited.
    pub fn finished_workers(&self) -> Vec<&str> {
        self.workers
            .iter()
            .filter(|w| w.is_finished())
            .map(|w| w.name())
            .collect()
    }

    /// Signal every worker and wait for them to exit.
    pub fn shutdown(mut self) {
        self.stop.stop();
        for worker in self.workers.drain(..) {
            worker.join();
        }
    }
}

impl Drop for DisplayPipeline {
    fn drop(&mut self) {
        self.stop.stop();
    }
}
