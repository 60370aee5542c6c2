//! Exposed channels which can be used to share key events across contexts.

use embassy_sync::blocking_mutex::raw;
use embassy_sync::channel::{Channel, Sender};
pub use embassy_sync::{blocking_mutex, channel};

use crate::event::KeyEvent;
use crate::{KEY_EVENT_CHANNEL_SIZE, RawMutex};

/// Channel for debounced key transition events.
///
/// Single producer (the scan-dispatch engine, in interrupt context), single
/// consumer (application logic, draining at its own pace with
/// `receive().await` or `try_receive`). This is a notification fast-path,
/// not the system of record: on overflow events are dropped and
/// [`crate::state::MatrixState`] remains authoritative.
pub static KEY_EVENT_CHANNEL: Channel<RawMutex, KeyEvent, KEY_EVENT_CHANNEL_SIZE> = Channel::new();

/// Capability through which the scan-dispatch engine publishes transitions.
///
/// Injected at engine construction, so the engine is testable without a row
/// driver or a live channel.
pub trait EventPublisher {
    /// Hand off one transition. Must be non-blocking: this is called from
    /// the scan notification context.
    fn publish(&self, event: KeyEvent);
}

impl<T: EventPublisher + ?Sized> EventPublisher for &T {
    fn publish(&self, event: KeyEvent) {
        (**self).publish(event)
    }
}

impl<M: raw::RawMutex, const N: usize> EventPublisher for Sender<'_, M, KeyEvent, N> {
    fn publish(&self, event: KeyEvent) {
        // Bounded, non-blocking enqueue. A full queue means the consumer is
        // behind; the event is dropped rather than stalling the scan.
        if self.try_send(event).is_err() {
            error!("Key event dropped, channel is full");
        }
    }
}
