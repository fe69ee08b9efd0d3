//! Scope data source: sample frames in, display-ready points out.

mod mode;
mod source;
mod swap;
mod visibility;

pub use mode::ScopeModeHandle;
pub use source::{ScopeDataSource, ScopeFeed, ScopePoint, ScopePoints, SCOPE_IDLE_FRAME_COUNT};
pub use swap::{point_swap, PointReader, PointWriter};
pub use visibility::{DisplayMode, ScopeVisibility};

/// Redraw period of the scope (about 60 Hz).
pub const SCOPE_REFRESH_MS: u64 = 16;
