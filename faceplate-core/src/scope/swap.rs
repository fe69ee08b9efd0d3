//! Lock-free latest-value cell for scope point sequences.
//!
//! Three slots rotate between the writer (back), the hand-off position
//! (middle) and the reader (front). The writer fills back and swaps it with
//! middle; the reader swaps middle into front when it is fresh. Neither side
//! ever waits and the reader never sees a half-written sequence.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

// State byte: [fresh:1][unused:1][back:2][middle:2][front:2]
const FRONT_SHIFT: u8 = 0;
const MIDDLE_SHIFT: u8 = 2;
const BACK_SHIFT: u8 = 4;
const SLOT_MASK: u8 = 0b11;
const FRESH: u8 = 0x80;

const INITIAL_STATE: u8 = (2 << BACK_SHIFT) | (1 << MIDDLE_SHIFT) | (0 << FRONT_SHIFT);

#[derive(Clone, Copy)]
struct Slots(u8);

impl Slots {
    fn back(self) -> usize {
        ((self.0 >> BACK_SHIFT) & SLOT_MASK) as usize
    }

    fn middle(self) -> usize {
        ((self.0 >> MIDDLE_SHIFT) & SLOT_MASK) as usize
    }

    fn front(self) -> usize {
        ((self.0 >> FRONT_SHIFT) & SLOT_MASK) as usize
    }

    fn fresh(self) -> bool {
        self.0 & FRESH != 0
    }

    fn pack(back: usize, middle: usize, front: usize, fresh: bool) -> u8 {
        ((back as u8) << BACK_SHIFT)
            | ((middle as u8) << MIDDLE_SHIFT)
            | ((front as u8) << FRONT_SHIFT)
            | if fresh { FRESH } else { 0 }
    }
}

struct Shared<T> {
    slots: [UnsafeCell<T>; 3],
    state: AtomicU8,
}

// Safety: each slot is reachable from exactly one side at a time; ownership
// moves only through the atomic state.
unsafe impl<T: Send> Send for Shared<T> {}
unsafe impl<T: Send> Sync for Shared<T> {}

impl<T> Shared<T> {
    fn load(&self) -> Slots {
        Slots(self.state.load(Ordering::Acquire))
    }

    fn update(&self, f: impl Fn(Slots) -> Option<u8>) {
        let mut current = self.state.load(Ordering::Acquire);
        while let Some(next) = f(Slots(current)) {
            match self
                .state
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }
}

/// Create a connected writer/reader pair, all slots starting at `initial`.
pub fn point_swap<T: Clone + Send>(initial: T) -> (PointWriter<T>, PointReader<T>) {
    let shared = Arc::new(Shared {
        slots: [
            UnsafeCell::new(initial.clone()),
            UnsafeCell::new(initial.clone()),
            UnsafeCell::new(initial),
        ],
        state: AtomicU8::new(INITIAL_STATE),
    });
    (
        PointWriter {
            shared: shared.clone(),
        },
        PointReader { shared },
    )
}

/// Single writer. Not `Clone`, so the back slot has one owner.
pub struct PointWriter<T> {
    shared: Arc<Shared<T>>,
}

impl<T> PointWriter<T> {
    /// The inactive slot. Its contents are whatever was published two
    /// rounds ago, so callers overwrite it fully.
    pub fn back_mut(&mut self) -> &mut T {
        let back = self.shared.load().back();
        // Safety: only the writer ever holds the back index, and `&mut self`
        // keeps this borrow unique.
        unsafe { &mut *self.shared.slots[back].get() }
    }

    /// Make the back slot the current value.
    pub fn publish(&mut self) {
        self.shared.update(|s| Some(Slots::pack(s.middle(), s.back(), s.front(), true)));
    }
}

/// Single reader. Not `Clone`, so the front slot has one owner.
pub struct PointReader<T> {
    shared: Arc<Shared<T>>,
}

impl<T> PointReader<T> {
    /// True if a publish happened since the last read.
    pub fn has_fresh(&self) -> bool {
        self.shared.load().fresh()
    }

    /// Borrow the latest published value.
    pub fn with<R>(&mut self, f: impl FnOnce(&T) -> R) -> R {
        self.shared.update(|s| {
            s.fresh()
                .then(|| Slots::pack(s.back(), s.front(), s.middle(), false))
        });
        let front = self.shared.load().front();
        // Safety: only the reader ever holds the front index, and `&mut self`
        // keeps the reader from swapping while `f` runs.
        f(unsafe { &*self.shared.slots[front].get() })
    }

    pub fn snapshot(&mut self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }
}
