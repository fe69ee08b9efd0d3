use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Samples per wave in a wavetable file.
pub const WAVE_LENGTH: usize = 2048;
/// Every Nth sample of a wave is drawn.
pub const WAVE_DOWNSAMPLING_RATE: usize = 8;
/// Points per drawn wave.
pub const WAVE_POINTS: usize = WAVE_LENGTH / WAVE_DOWNSAMPLING_RATE;
pub const MAX_NUM_WAVES: usize = 256;

pub const WAVETABLE_DIR: &str = "/udata/nina/wavetables/";
pub const WAVETABLE_EXT: &str = "wav";

/// Why a wavetable file was rejected.
#[derive(Debug)]
pub enum WavetableError {
    /// The file could not be opened or decoded.
    Read(hound::Error),
    NoChannels,
    /// The first channel is not a whole number of waves.
    Misaligned { samples: usize },
    NoWaves,
    TooManyWaves(usize),
}

impl fmt::Display for WavetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavetableError::Read(e) => write!(f, "could not read wavetable: {}", e),
            WavetableError::NoChannels => write!(f, "wavetable has no channels"),
            WavetableError::Misaligned { samples } => write!(
                f,
                "{} samples is not a multiple of the {} sample wave length",
                samples, WAVE_LENGTH
            ),
            WavetableError::NoWaves => write!(f, "wavetable contains no waves"),
            WavetableError::TooManyWaves(n) => {
                write!(f, "{} waves exceeds the maximum of {}", n, MAX_NUM_WAVES)
            }
        }
    }
}

impl std::error::Error for WavetableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WavetableError::Read(e) => Some(e),
            _ => None,
        }
    }
}

impl From<hound::Error> for WavetableError {
    fn from(e: hound::Error) -> Self {
        WavetableError::Read(e)
    }
}

/// Animation speed of the scrubber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrubTiming {
    /// Time to sweep every wave once in one direction.
    pub display_time: Duration,
    /// Period between `next_wave_samples` calls.
    pub tick: Duration,
}

impl Default for ScrubTiming {
    fn default() -> Self {
        Self {
            display_time: Duration::from_millis(2000),
            tick: Duration::from_millis(34),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrubPhase {
    Unloaded,
    Forward,
    Reverse,
}

struct LoadedTable {
    samples: Vec<f32>,
    num_waves: usize,
    // 0..num_waves going forward, num_waves..2*num_waves coming back.
    wave_index: usize,
    forward: bool,
    wavetable_time: f32,
    wave_time: f32,
    cursor: usize,
}

impl LoadedTable {
    fn new(samples: Vec<f32>, timing: &ScrubTiming) -> Self {
        let num_waves = samples.len() / WAVE_LENGTH;
        Self {
            samples,
            num_waves,
            wave_index: 0,
            forward: true,
            wavetable_time: 0.0,
            wave_time: timing.display_time.as_secs_f32() * 1000.0 / num_waves as f32,
            cursor: 0,
        }
    }

    fn last_wave_start(&self) -> usize {
        (self.num_waves - 1) * WAVE_LENGTH
    }

    fn advance(&mut self, tick_ms: f32) -> Vec<f32> {
        self.wavetable_time += tick_ms;
        let target = (self.wavetable_time / self.wave_time).round() as usize;
        let inc = target.saturating_sub(self.wave_index);
        if inc == 0 {
            return Vec::new();
        }

        let start = self.cursor.min(self.last_wave_start());
        let points = self.samples[start..start + WAVE_LENGTH]
            .iter()
            .step_by(WAVE_DOWNSAMPLING_RATE)
            .copied()
            .collect();
        self.cursor = start + WAVE_LENGTH;

        self.wave_index += inc;
        if self.forward {
            if self.wave_index >= self.num_waves {
                self.wave_index = self.num_waves - 1;
                self.cursor = self.last_wave_start();
                self.forward = false;
                log::trace!(target: "wavetable", "reversing");
            } else {
                self.cursor += WAVE_LENGTH * (inc - 1);
            }
        } else if self.wave_index >= 2 * self.num_waves {
            self.wave_index = 0;
            self.cursor = 0;
            self.wavetable_time = 0.0;
            self.forward = true;
        } else {
            // Steps back one wave further than forward travel steps on.
            self.cursor = self.cursor.saturating_sub((inc + 1) * WAVE_LENGTH);
        }
        points
    }
}

/// Ping-pong animator over the waves of one wavetable file.
///
/// All operations take the same lock, so the chart timer and list updates
/// can share one scrubber.
pub struct WavetableScrubber {
    dir: PathBuf,
    timing: ScrubTiming,
    table: Mutex<Option<LoadedTable>>,
}

impl WavetableScrubber {
    pub fn new(dir: impl Into<PathBuf>, timing: ScrubTiming) -> Self {
        Self {
            dir: dir.into(),
            timing,
            table: Mutex::new(None),
        }
    }

    pub fn timing(&self) -> ScrubTiming {
        self.timing
    }

    /// Path of the file for a wavetable name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, WAVETABLE_EXT))
    }

    /// Load a wavetable by name. Failures are logged and leave the scrubber
    /// unloaded.
    pub fn load(&self, name: &str) -> bool {
        let path = self.path_for(name);
        match self.load_path(&path) {
            Ok(num_waves) => {
                log::debug!(target: "wavetable", "loaded {} ({} waves)", path.display(), num_waves);
                true
            }
            Err(e) => {
                log::warn!(target: "wavetable", "{}: {}", path.display(), e);
                false
            }
        }
    }

    /// Load a wavetable file, returning its wave count.
    pub fn load_path(&self, path: &Path) -> Result<usize, WavetableError> {
        let mut table = self.lock();
        *table = None;
        let samples = read_first_channel(path)?;
        let loaded = LoadedTable::new(validate(samples)?, &self.timing);
        let num_waves = loaded.num_waves;
        *table = Some(loaded);
        Ok(num_waves)
    }

    pub fn unload(&self) {
        *self.lock() = None;
    }

    /// Advance one tick. Returns the down-sampled points of the next wave, or
    /// nothing when the visible wave does not change or nothing is loaded.
    pub fn next_wave_samples(&self) -> Vec<f32> {
        let tick_ms = self.timing.tick.as_secs_f32() * 1000.0;
        match self.lock().as_mut() {
            Some(table) => table.advance(tick_ms),
            None => Vec::new(),
        }
    }

    pub fn phase(&self) -> ScrubPhase {
        match self.lock().as_ref() {
            None => ScrubPhase::Unloaded,
            Some(t) if t.forward => ScrubPhase::Forward,
            Some(_) => ScrubPhase::Reverse,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    pub fn num_waves(&self) -> usize {
        self.lock().as_ref().map_or(0, |t| t.num_waves)
    }

    pub fn wave_index(&self) -> Option<usize> {
        self.lock().as_ref().map(|t| t.wave_index)
    }

    /// Sample index the next emitted wave is read from.
    pub fn cursor(&self) -> Option<usize> {
        self.lock().as_ref().map(|t| t.cursor)
    }

    fn lock(&self) -> MutexGuard<'_, Option<LoadedTable>> {
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn validate(samples: Vec<f32>) -> Result<Vec<f32>, WavetableError> {
    if samples.len() % WAVE_LENGTH != 0 {
        return Err(WavetableError::Misaligned {
            samples: samples.len(),
        });
    }
    match samples.len() / WAVE_LENGTH {
        0 => Err(WavetableError::NoWaves),
        n if n > MAX_NUM_WAVES => Err(WavetableError::TooManyWaves(n)),
        _ => Ok(samples),
    }
}

fn read_first_channel(path: &Path) -> Result<Vec<f32>, WavetableError> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(WavetableError::NoChannels);
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .step_by(channels)
                .map(|s| s.map(|s| s as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .step_by(channels)
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(samples)
}
