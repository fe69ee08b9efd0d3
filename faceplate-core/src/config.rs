use std::path::{Path, PathBuf};
use std::time::Duration;

use faceplate_types::ScopeMode;
use serde::Deserialize;

use crate::scope::{SCOPE_IDLE_FRAME_COUNT, SCOPE_REFRESH_MS};
use crate::transport::{ChannelSpec, SAMPLES_QUEUE_NAME, UI_QUEUE_CAPACITY, UI_QUEUE_NAME};
use crate::wavetable::{ScrubTiming, WAVETABLE_DIR};
use crate::worker::POLL_TIMEOUT;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    transport: TransportConfig,
    #[serde(default)]
    scope: ScopeConfig,
    #[serde(default)]
    wavetable: WavetableConfig,
    #[serde(default)]
    activity: ActivityConfig,
}

#[derive(Deserialize, Default)]
struct TransportConfig {
    ui_queue: Option<String>,
    samples_queue: Option<String>,
    ui_queue_capacity: Option<usize>,
    poll_timeout_ms: Option<u64>,
}

#[derive(Deserialize, Default)]
struct ScopeConfig {
    refresh_ms: Option<u64>,
    idle_frames: Option<u32>,
    display_height: Option<u32>,
    default_mode: Option<ScopeMode>,
}

#[derive(Deserialize, Default)]
struct WavetableConfig {
    dir: Option<PathBuf>,
    display_time_ms: Option<u64>,
    tick_ms: Option<u64>,
}

#[derive(Deserialize, Default)]
struct ActivityConfig {
    enabled: Option<bool>,
    log_path: Option<PathBuf>,
    poll_ms: Option<u64>,
}

/// Runtime settings: embedded defaults overlaid with the user's config file.
pub struct Config {
    transport: TransportConfig,
    scope: ScopeConfig,
    wavetable: WavetableConfig,
    activity: ActivityConfig,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(user_config_path().as_deref())
    }

    /// Load defaults, then overlay `user` if it exists. Unreadable or
    /// malformed user files are logged and ignored.
    pub fn load_from(user: Option<&Path>) -> Self {
        let mut base = match toml::from_str::<ConfigFile>(DEFAULT_CONFIG) {
            Ok(base) => base,
            Err(e) => {
                log::error!(target: "config", "embedded config.toml is invalid: {}", e);
                ConfigFile::default()
            }
        };

        if let Some(path) = user.filter(|p| p.exists()) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                    Ok(user) => merge(&mut base, user),
                    Err(e) => {
                        log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                    }
                },
                Err(e) => {
                    log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                }
            }
        }

        Config {
            transport: base.transport,
            scope: base.scope,
            wavetable: base.wavetable,
            activity: base.activity,
        }
    }

    pub fn ui_channel(&self) -> ChannelSpec {
        ChannelSpec::ui_state(
            self.transport.ui_queue.as_deref().unwrap_or(UI_QUEUE_NAME),
            self.transport.ui_queue_capacity.unwrap_or(UI_QUEUE_CAPACITY),
        )
    }

    pub fn samples_channel(&self) -> ChannelSpec {
        ChannelSpec::samples(
            self.transport
                .samples_queue
                .as_deref()
                .unwrap_or(SAMPLES_QUEUE_NAME),
        )
    }

    /// Receive timeout of each worker (clamped to 10 ms..10 s).
    pub fn poll_timeout(&self) -> Duration {
        self.transport
            .poll_timeout_ms
            .map(|ms| Duration::from_millis(ms.clamp(10, 10_000)))
            .unwrap_or(POLL_TIMEOUT)
    }

    pub fn scope_refresh(&self) -> Duration {
        Duration::from_millis(self.scope.refresh_ms.unwrap_or(SCOPE_REFRESH_MS).max(1))
    }

    pub fn scope_idle_frames(&self) -> u32 {
        self.scope.idle_frames.unwrap_or(SCOPE_IDLE_FRAME_COUNT).max(1)
    }

    pub fn scope_display_height(&self) -> u32 {
        self.scope.display_height.unwrap_or(480)
    }

    pub fn default_scope_mode(&self) -> ScopeMode {
        self.scope.default_mode.unwrap_or_default()
    }

    pub fn wavetable_dir(&self) -> PathBuf {
        self.wavetable
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(WAVETABLE_DIR))
    }

    pub fn scrub_timing(&self) -> ScrubTiming {
        let fallback = ScrubTiming::default();
        ScrubTiming {
            display_time: self
                .wavetable
                .display_time_ms
                .map(|ms| Duration::from_millis(ms.max(1)))
                .unwrap_or(fallback.display_time),
            tick: self
                .wavetable
                .tick_ms
                .map(|ms| Duration::from_millis(ms.max(1)))
                .unwrap_or(fallback.tick),
        }
    }

    pub fn activity_enabled(&self) -> bool {
        self.activity.enabled.unwrap_or(true)
    }

    pub fn activity_log_path(&self) -> PathBuf {
        self.activity
            .log_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::activity::ACTIVITY_LOG_PATH))
    }

    pub fn activity_poll(&self) -> Duration {
        Duration::from_millis(
            self.activity
                .poll_ms
                .unwrap_or(crate::activity::ACTIVITY_POLL_MS)
                .max(1),
        )
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("faceplate").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    merge_transport(&mut base.transport, user.transport);
    merge_scope(&mut base.scope, user.scope);
    merge_wavetable(&mut base.wavetable, user.wavetable);
    merge_activity(&mut base.activity, user.activity);
}

fn merge_transport(base: &mut TransportConfig, user: TransportConfig) {
    if user.ui_queue.is_some() {
        base.ui_queue = user.ui_queue;
    }
    if user.samples_queue.is_some() {
        base.samples_queue = user.samples_queue;
    }
    if user.ui_queue_capacity.is_some() {
        base.ui_queue_capacity = user.ui_queue_capacity;
    }
    if user.poll_timeout_ms.is_some() {
        base.poll_timeout_ms = user.poll_timeout_ms;
    }
}

fn merge_scope(base: &mut ScopeConfig, user: ScopeConfig) {
    if user.refresh_ms.is_some() {
        base.refresh_ms = user.refresh_ms;
    }
    if user.idle_frames.is_some() {
        base.idle_frames = user.idle_frames;
    }
    if user.display_height.is_some() {
        base.display_height = user.display_height;
    }
    if user.default_mode.is_some() {
        base.default_mode = user.default_mode;
    }
}

fn merge_wavetable(base: &mut WavetableConfig, user: WavetableConfig) {
    if user.dir.is_some() {
        base.dir = user.dir;
    }
    if user.display_time_ms.is_some() {
        base.display_time_ms = user.display_time_ms;
    }
    if user.tick_ms.is_some() {
        base.tick_ms = user.tick_ms;
    }
}

fn merge_activity(base: &mut ActivityConfig, user: ActivityConfig) {
    if user.enabled.is_some() {
        base.enabled = user.enabled;
    }
    if user.log_path.is_some() {
        base.log_path = user.log_path;
    }
    if user.poll_ms.is_some() {
        base.poll_ms = user.poll_ms;
    }
}
