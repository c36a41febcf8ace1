use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Condvar, Mutex};

enum Slot<T> {
    Pending,
    Ready(T),
    Delivered,
    Interrupted,
}

/// What a waiter gets back from [`CompletionGate::wait`].
#[derive(Debug, PartialEq)]
pub enum GateWait<T> {
    /// The gate was signalled; the value is handed over exactly once.
    Released(T),
    /// The gate was interrupted before any signal arrived.
    Interrupted,
    /// Another waiter already took the value.
    AlreadyDelivered,
}

/// Blocks a caller until an asynchronously driven workflow finishes.
///
/// The first [`signal`](Self::signal) stores the result and wakes the waiter;
/// later signals are ignored. The value is written under the gate's lock, so
/// everything the signalling thread did before signalling is visible to the
/// waiter once it wakes.
pub struct CompletionGate<T> {
    slot: Mutex<Slot<T>>,
    released: Condvar,
    signals: AtomicUsize,
}

impl<T> Default for CompletionGate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CompletionGate<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Pending),
            released: Condvar::new(),
            signals: AtomicUsize::new(0),
        }
    }

    /// Release the gate with `value`. Returns `false` if it was already released.
    pub fn signal(&self, value: T) -> bool {
        self.signals.fetch_add(1, Ordering::SeqCst);
        let mut slot = self.slot.lock();
        if !matches!(*slot, Slot::Pending) {
            log::warn!("completion gate released more than once, ignoring");
            return false;
        }
        *slot = Slot::Ready(value);
        self.released.notify_all();
        true
    }

    /// Wake the waiter without a value. No-op once released.
    pub fn interrupt(&self) -> bool {
        let mut slot = self.slot.lock();
        if !matches!(*slot, Slot::Pending) {
            return false;
        }
        *slot = Slot::Interrupted;
        self.released.notify_all();
        true
    }

    /// Block until signalled or interrupted. There is no timeout.
    pub fn wait(&self) -> GateWait<T> {
        let mut slot = self.slot.lock();
        loop {
            match std::mem::replace(&mut *slot, Slot::Delivered) {
                Slot::Pending => {
                    *slot = Slot::Pending;
                    self.released.wait(&mut slot);
                }
                Slot::Ready(value) => return GateWait::Released(value),
                Slot::Interrupted => {
                    *slot = Slot::Interrupted;
                    return GateWait::Interrupted;
                }
                Slot::Delivered => return GateWait::AlreadyDelivered,
            }
        }
    }

    pub fn is_released(&self) -> bool {
        !matches!(*self.slot.lock(), Slot::Pending)
    }

    /// How many times [`signal`](Self::signal) has been called, accepted or not.
    pub fn signal_count(&self) -> usize {
        self.signals.load(Ordering::SeqCst)
    }
}
