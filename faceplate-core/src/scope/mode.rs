use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use faceplate_types::ScopeMode;

/// Shared scope-mode cell. The rendering loop writes it when a home-screen
/// update arrives; the sample worker reads it once per frame.
#[derive(Debug, Clone, Default)]
pub struct ScopeModeHandle(Arc<AtomicU8>);

impl ScopeModeHandle {
    pub fn new(mode: ScopeMode) -> Self {
        let handle = Self::default();
        handle.set(mode);
        handle
    }

    pub fn get(&self) -> ScopeMode {
        ScopeMode::from_raw(self.0.load(Ordering::Acquire) as i32)
    }

    pub fn set(&self, mode: ScopeMode) {
        self.0.store(mode.to_raw() as u8, Ordering::Release);
    }
}
