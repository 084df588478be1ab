//! Pending-state handle shared with the presentation layer.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::broadcast;

use crate::events::ChatEvent;

/// A cloneable view of whether an exchange is in flight.
///
/// Clones share the same flag.
#[derive(Clone, Default)]
pub struct ExchangeHandle {
    pending: Arc<AtomicBool>,
}

impl ExchangeHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether an exchange is currently pending.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Claim the pending slot. `None` if another exchange holds it.
    pub(crate) fn try_begin(&self, events: broadcast::Sender<ChatEvent>) -> Option<PendingGuard> {
        self.pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(PendingGuard {
            handle: self.clone(),
            events,
        })
    }
}

/// Holds the pending slot; releasing it is tied to drop so every exit path,
/// including cancellation of the exchange future, returns to idle.
pub(crate) struct PendingGuard {
    handle: ExchangeHandle,
    events: broadcast::Sender<ChatEvent>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.handle.pending.store(false, Ordering::Release);
        let _ = self.events.send(ChatEvent::PendingChanged { pending: false });
    }
}
