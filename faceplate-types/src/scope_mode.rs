use serde::{Deserialize, Serialize};

/// How the engine wants the scope drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeMode {
    #[default]
    Off,
    /// Oscilloscope trace of the summed channels.
    Osc,
    /// Lissajous plot of left against right.
    Xy,
}

impl ScopeMode {
    /// Wire value. Unknown values decode as `Off`.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => ScopeMode::Osc,
            2 => ScopeMode::Xy,
            _ => ScopeMode::Off,
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            ScopeMode::Off => 0,
            ScopeMode::Osc => 1,
            ScopeMode::Xy => 2,
        }
    }
}
