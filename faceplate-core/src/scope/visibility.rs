use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const SHOWN: u8 = 0b01;
const BACKGROUND: u8 = 0b10;

/// How the scope shares the screen with other content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// The scope is the main content.
    #[default]
    Foreground,
    /// The scope is drawn behind other content and hides itself when idle.
    Background,
}

/// Shared shown flag and display mode of the scope.
///
/// Both fields live in one atomic byte so readers always see a consistent pair.
#[derive(Debug, Clone, Default)]
pub struct ScopeVisibility(Arc<AtomicU8>);

impl ScopeVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self) -> bool {
        self.0.load(Ordering::Acquire) & SHOWN != 0
    }

    pub fn display_mode(&self) -> DisplayMode {
        if self.0.load(Ordering::Acquire) & BACKGROUND != 0 {
            DisplayMode::Background
        } else {
            DisplayMode::Foreground
        }
    }

    pub fn is_background(&self) -> bool {
        self.display_mode() == DisplayMode::Background
    }

    /// Show the scope in the given mode.
    pub fn show_mode(&self, mode: DisplayMode) {
        let bits = match mode {
            DisplayMode::Foreground => SHOWN,
            DisplayMode::Background => SHOWN | BACKGROUND,
        };
        self.0.store(bits, Ordering::Release);
    }

    /// Show the scope keeping its current mode. Returns false if it was
    /// already shown.
    pub fn show(&self) -> bool {
        self.0.fetch_or(SHOWN, Ordering::AcqRel) & SHOWN == 0
    }

    /// Hide the scope. With `reset_mode` it also returns to foreground.
    pub fn hide(&self, reset_mode: bool) {
        if reset_mode {
            self.0.store(0, Ordering::Release);
        } else {
            self.0.fetch_and(!SHOWN, Ordering::AcqRel);
        }
    }
}
